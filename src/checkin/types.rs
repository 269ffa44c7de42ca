// src/checkin/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{validation_error, ApiError, ApiResult};

// Closed option sets offered by the check-in form.

pub const MOOD_DESCRIPTIONS: [&str; 8] = [
    "Very Happy",
    "Happy",
    "Content",
    "Neutral",
    "Anxious",
    "Stressed",
    "Sad",
    "Very Sad",
];

pub const ACTIVITIES: [&str; 10] = [
    "Exercise",
    "Reading",
    "Meditation",
    "Work",
    "Study",
    "Social Activity",
    "Hobby",
    "Entertainment",
    "Outdoor Activity",
    "Rest",
];

pub const GRATITUDE_CATEGORIES: [&str; 10] = [
    "Family",
    "Friends",
    "Health",
    "Career",
    "Personal Growth",
    "Nature",
    "Home",
    "Learning",
    "Experiences",
    "Basic Needs",
];

pub const MAX_THOUGHTS_LEN: usize = 1000;
pub const MAX_GRATITUDE_DETAIL_LEN: usize = 200;
pub const MAX_GOAL_LEN: usize = 100;

// Serialized with the document-store field names the frontend expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub mood: CheckinMood,
    pub activities: Vec<String>,
    pub thoughts: String,
    pub gratitude: Vec<GratitudeItem>,
    pub goals: Goals,
    pub sleep: Sleep,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinMood {
    pub rating: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GratitudeItem {
    pub category: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub upcoming: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sleep {
    pub hours: f64,
    pub quality: i64,
}

// Request types for API

#[derive(Debug, Deserialize)]
pub struct CreateCheckinRequest {
    pub mood: CheckinMood,
    pub activities: Vec<String>,
    pub thoughts: String,
    pub gratitude: Vec<GratitudeItem>,
    pub goals: Goals,
    pub sleep: Sleep,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCheckinRequest {
    pub mood: Option<UpdateMood>,
    pub activities: Option<Vec<String>>,
    pub thoughts: Option<String>,
    pub gratitude: Option<Vec<GratitudeItem>>,
    pub goals: Option<UpdateGoals>,
    pub sleep: Option<UpdateSleep>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMood {
    pub rating: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoals {
    pub completed: Option<Vec<String>>,
    pub upcoming: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSleep {
    pub hours: Option<f64>,
    pub quality: Option<i64>,
}

impl CreateCheckinRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_mood_rating(self.mood.rating)?;
        validate_mood_description(&self.mood.description)?;
        validate_activities(&self.activities)?;
        validate_thoughts(&self.thoughts)?;
        validate_gratitude(&self.gratitude)?;
        validate_goal_list(&self.goals.completed)?;
        validate_goal_list(&self.goals.upcoming)?;
        validate_sleep_hours(self.sleep.hours)?;
        validate_sleep_quality(self.sleep.quality)?;
        Ok(())
    }
}

impl UpdateCheckinRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.mood.is_none()
            && self.activities.is_none()
            && self.thoughts.is_none()
            && self.gratitude.is_none()
            && self.goals.is_none()
            && self.sleep.is_none()
        {
            return Err(ApiError::bad_request(
                "At least one field must be provided for update",
            ));
        }

        if let Some(mood) = &self.mood {
            if let Some(rating) = mood.rating {
                validate_mood_rating(rating)?;
            }
            if let Some(description) = &mood.description {
                validate_mood_description(description)?;
            }
        }
        if let Some(activities) = &self.activities {
            validate_activities(activities)?;
        }
        if let Some(thoughts) = &self.thoughts {
            validate_thoughts(thoughts)?;
        }
        if let Some(gratitude) = &self.gratitude {
            validate_gratitude(gratitude)?;
        }
        if let Some(goals) = &self.goals {
            if let Some(completed) = &goals.completed {
                validate_goal_list(completed)?;
            }
            if let Some(upcoming) = &goals.upcoming {
                validate_goal_list(upcoming)?;
            }
        }
        if let Some(sleep) = &self.sleep {
            if let Some(hours) = sleep.hours {
                validate_sleep_hours(hours)?;
            }
            if let Some(quality) = sleep.quality {
                validate_sleep_quality(quality)?;
            }
        }
        Ok(())
    }
}

fn validate_mood_rating(rating: i64) -> ApiResult<()> {
    if !(1..=10).contains(&rating) {
        return Err(validation_error("mood.rating", "must be between 1 and 10"));
    }
    Ok(())
}

fn validate_mood_description(description: &str) -> ApiResult<()> {
    if !MOOD_DESCRIPTIONS.contains(&description) {
        return Err(validation_error(
            "mood.description",
            "must be one of the known mood descriptions",
        ));
    }
    Ok(())
}

fn validate_activities(activities: &[String]) -> ApiResult<()> {
    if activities.is_empty() {
        return Err(validation_error("activities", "select at least one activity"));
    }
    if activities.len() > 5 {
        return Err(validation_error("activities", "maximum 5 activities allowed"));
    }
    if activities.iter().any(|a| !ACTIVITIES.contains(&a.as_str())) {
        return Err(validation_error("activities", "contains an unknown activity"));
    }
    Ok(())
}

fn validate_thoughts(thoughts: &str) -> ApiResult<()> {
    if thoughts.chars().count() > MAX_THOUGHTS_LEN {
        return Err(validation_error(
            "thoughts",
            "must be at most 1000 characters",
        ));
    }
    Ok(())
}

fn validate_gratitude(gratitude: &[GratitudeItem]) -> ApiResult<()> {
    if gratitude.is_empty() {
        return Err(validation_error("gratitude", "share at least one gratitude"));
    }
    if gratitude.len() > 3 {
        return Err(validation_error("gratitude", "maximum 3 gratitudes allowed"));
    }
    for item in gratitude {
        if !GRATITUDE_CATEGORIES.contains(&item.category.as_str()) {
            return Err(validation_error(
                "gratitude",
                "contains an unknown category",
            ));
        }
        if item.detail.chars().count() > MAX_GRATITUDE_DETAIL_LEN {
            return Err(validation_error(
                "gratitude",
                "each detail must be at most 200 characters",
            ));
        }
    }
    Ok(())
}

fn validate_goal_list(goals: &[String]) -> ApiResult<()> {
    if goals.iter().any(|g| g.chars().count() > MAX_GOAL_LEN) {
        return Err(validation_error(
            "goals",
            "each goal must be at most 100 characters",
        ));
    }
    Ok(())
}

fn validate_sleep_hours(hours: f64) -> ApiResult<()> {
    if !(0.0..=24.0).contains(&hours) {
        return Err(validation_error("sleep.hours", "must be between 0 and 24"));
    }
    Ok(())
}

fn validate_sleep_quality(quality: i64) -> ApiResult<()> {
    if !(1..=10).contains(&quality) {
        return Err(validation_error("sleep.quality", "must be between 1 and 10"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinHistoryPage {
    pub checkins: Vec<CheckinEntry>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}
