// src/exercise/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::error::{validation_error, ApiResult};

/// Skill level of an exercise, ordered easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(()),
        }
    }
}

/// One catalog entry: a guided coping exercise with its steps and benefits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration: i64,
    pub steps: Vec<String>,
    pub benefits: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Query parameters of the catalog endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExerciseQuery {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub duration: Option<i64>,
}

/// Resolved catalog filters. `max_duration` is an upper bound in minutes.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilters {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub max_duration: Option<i64>,
}

impl ExerciseQuery {
    /// Empty-string filters are treated as absent; non-positive durations
    /// are ignored rather than matching nothing.
    pub fn resolve(&self) -> ApiResult<ExerciseFilters> {
        let difficulty = match self.difficulty.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Difficulty>().map_err(|_| {
                validation_error(
                    "difficulty",
                    "must be one of beginner, intermediate, advanced",
                )
            })?),
        };

        Ok(ExerciseFilters {
            category: self.category.clone().filter(|value| !value.is_empty()),
            difficulty,
            max_duration: self.duration.filter(|minutes| *minutes > 0),
        })
    }
}
