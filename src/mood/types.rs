// src/mood/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{validation_error, ApiError, ApiResult};

pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_TAG_LEN: usize = 30;

// Serialized with the document-store field names the frontend expects
// (`_id`, camelCase keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub rating: i64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// Request/Response types for API

#[derive(Debug, Deserialize)]
pub struct CreateMoodRequest {
    pub rating: i64,
    pub description: String,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMoodRequest {
    pub rating: Option<i64>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateMoodRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_rating(self.rating)?;
        validate_description(&self.description)?;
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

impl UpdateMoodRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.rating.is_none() && self.description.is_none() && self.tags.is_none() {
            return Err(ApiError::bad_request(
                "At least one field must be provided for update",
            ));
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

fn validate_rating(rating: i64) -> ApiResult<()> {
    if !(1..=10).contains(&rating) {
        return Err(validation_error("rating", "must be between 1 and 10"));
    }
    Ok(())
}

fn validate_description(description: &str) -> ApiResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(validation_error(
            "description",
            "must be at most 500 characters",
        ));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> ApiResult<()> {
    if tags.iter().any(|tag| tag.chars().count() > MAX_TAG_LEN) {
        return Err(validation_error(
            "tags",
            "each tag must be at most 30 characters",
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodHistoryPage {
    pub moods: Vec<MoodEntry>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub overall_stats: OverallStats,
    pub weekly_trends: Vec<TrendPoint>,
    pub monthly_trends: Vec<TrendPoint>,
    pub popular_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub average_rating: f64,
    pub total_entries: i64,
    pub highest_rating: i64,
    pub lowest_rating: i64,
}

// `date` is the YYYY-MM-DD start of the aggregation window.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub average_rating: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rating_boundaries() {
        for rating in [1, 10] {
            let request = CreateMoodRequest {
                rating,
                description: "fine".to_string(),
                tags: None,
            };
            assert!(request.validate().is_ok(), "rating {rating} should pass");
        }

        for rating in [0, 11, -4] {
            let request = CreateMoodRequest {
                rating,
                description: "fine".to_string(),
                tags: None,
            };
            let error = request.validate().unwrap_err();
            assert!(error.message.contains("rating"), "rating {rating} should fail");
        }
    }

    #[test]
    fn test_create_request_length_limits() {
        let request = CreateMoodRequest {
            rating: 5,
            description: "x".repeat(501),
            tags: None,
        };
        assert!(request.validate().is_err());

        let request = CreateMoodRequest {
            rating: 5,
            description: "ok".to_string(),
            tags: Some(vec!["y".repeat(31)]),
        };
        assert!(request.validate().is_err());

        let request = CreateMoodRequest {
            rating: 5,
            description: "x".repeat(500),
            tags: Some(vec!["y".repeat(30)]),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_requires_a_field() {
        let error = UpdateMoodRequest::default().validate().unwrap_err();
        assert_eq!(error.message, "At least one field must be provided for update");

        let request = UpdateMoodRequest {
            rating: Some(7),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_mood_entry_wire_shape() {
        let entry = MoodEntry {
            id: "abc-123".to_string(),
            user_id: "default-user".to_string(),
            rating: 8,
            description: "felt good".to_string(),
            tags: vec!["happy".to_string()],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["_id"], "abc-123");
        assert_eq!(json["userId"], "default-user");
        assert_eq!(json["rating"], 8);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
