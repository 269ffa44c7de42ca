// src/checkin/store.rs

use anyhow::Result;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::api::http::common::{total_pages, HistoryFilter};
use crate::checkin::types::{
    CheckinEntry, CheckinHistoryPage, CheckinMood, Goals, GratitudeItem, Sleep,
    UpdateCheckinRequest,
};

/// Check-in creation error type
#[derive(Error, Debug)]
pub enum CheckinError {
    #[error("You have already submitted a check-in for today")]
    AlreadySubmitted,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct CheckinStore {
    pub pool: SqlitePool,
}

impl CheckinStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a check-in, enforcing the one-per-calendar-day rule. The day
    /// boundary is midnight UTC.
    pub async fn create_checkin(
        &self,
        user_id: &str,
        mood: CheckinMood,
        activities: Vec<String>,
        thoughts: String,
        gratitude: Vec<GratitudeItem>,
        goals: Goals,
        sleep: Sleep,
    ) -> Result<CheckinEntry, CheckinError> {
        let now = Utc::now();

        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM checkins WHERE user_id = ? AND created_at >= ? LIMIT 1")
                .bind(user_id)
                .bind(day_start(now.date_naive()))
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(CheckinError::AlreadySubmitted);
        }

        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO checkins (
                id, user_id, mood_rating, mood_description, activities, thoughts,
                gratitude, goals_completed, goals_upcoming, sleep_hours, sleep_quality, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(mood.rating)
        .bind(&mood.description)
        .bind(json_text(&activities))
        .bind(&thoughts)
        .bind(json_text(&gratitude))
        .bind(json_text(&goals.completed))
        .bind(json_text(&goals.upcoming))
        .bind(sleep.hours)
        .bind(sleep.quality)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(CheckinEntry {
            id,
            user_id: user_id.to_string(),
            mood,
            activities,
            thoughts,
            gratitude,
            goals,
            sleep,
            created_at: now,
        })
    }

    /// Most recent check-in made today, if any.
    pub async fn today_checkin(&self, user_id: &str) -> Result<Option<CheckinEntry>> {
        let row = sqlx::query(
            r#"
            SELECT * FROM checkins
            WHERE user_id = ? AND created_at >= ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(day_start(Utc::now().date_naive()))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_checkin(row)?)),
            None => Ok(None),
        }
    }

    pub async fn checkin_history(
        &self,
        user_id: &str,
        filter: &HistoryFilter,
    ) -> Result<CheckinHistoryPage> {
        let since = filter.start_date.map(day_start);
        let until = filter.end_date.and_then(day_after);
        let offset = (filter.page - 1) * filter.limit;

        let rows = sqlx::query(
            r#"
            SELECT * FROM checkins
            WHERE user_id = ?
              AND (? IS NULL OR created_at >= ?)
              AND (? IS NULL OR created_at < ?)
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(since)
        .bind(until)
        .bind(until)
        .bind(filter.limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let checkins = rows
            .into_iter()
            .map(|row| self.row_to_checkin(row))
            .collect::<Result<Vec<_>>>()?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM checkins
            WHERE user_id = ?
              AND (? IS NULL OR created_at >= ?)
              AND (? IS NULL OR created_at < ?)
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(since)
        .bind(until)
        .bind(until)
        .fetch_one(&self.pool)
        .await?;

        Ok(CheckinHistoryPage {
            checkins,
            total,
            page: filter.page,
            total_pages: total_pages(total, filter.limit),
        })
    }

    pub async fn get_checkin(&self, user_id: &str, checkin_id: &str) -> Result<Option<CheckinEntry>> {
        let row = sqlx::query("SELECT * FROM checkins WHERE id = ? AND user_id = ?")
            .bind(checkin_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_checkin(row)?)),
            None => Ok(None),
        }
    }

    /// Partial update with field-wise merge: absent nested fields keep their
    /// stored values rather than being replaced wholesale.
    pub async fn update_checkin(
        &self,
        user_id: &str,
        checkin_id: &str,
        update: UpdateCheckinRequest,
    ) -> Result<Option<CheckinEntry>> {
        let Some(mut checkin) = self.get_checkin(user_id, checkin_id).await? else {
            return Ok(None);
        };

        if let Some(mood) = update.mood {
            if let Some(rating) = mood.rating {
                checkin.mood.rating = rating;
            }
            if let Some(description) = mood.description {
                checkin.mood.description = description;
            }
        }
        if let Some(activities) = update.activities {
            checkin.activities = activities;
        }
        if let Some(thoughts) = update.thoughts {
            checkin.thoughts = thoughts;
        }
        if let Some(gratitude) = update.gratitude {
            checkin.gratitude = gratitude;
        }
        if let Some(goals) = update.goals {
            if let Some(completed) = goals.completed {
                checkin.goals.completed = completed;
            }
            if let Some(upcoming) = goals.upcoming {
                checkin.goals.upcoming = upcoming;
            }
        }
        if let Some(sleep) = update.sleep {
            if let Some(hours) = sleep.hours {
                checkin.sleep.hours = hours;
            }
            if let Some(quality) = sleep.quality {
                checkin.sleep.quality = quality;
            }
        }

        sqlx::query(
            r#"
            UPDATE checkins
            SET mood_rating = ?, mood_description = ?, activities = ?, thoughts = ?,
                gratitude = ?, goals_completed = ?, goals_upcoming = ?,
                sleep_hours = ?, sleep_quality = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(checkin.mood.rating)
        .bind(&checkin.mood.description)
        .bind(json_text(&checkin.activities))
        .bind(&checkin.thoughts)
        .bind(json_text(&checkin.gratitude))
        .bind(json_text(&checkin.goals.completed))
        .bind(json_text(&checkin.goals.upcoming))
        .bind(checkin.sleep.hours)
        .bind(checkin.sleep.quality)
        .bind(checkin_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(checkin))
    }

    pub async fn delete_checkin(&self, user_id: &str, checkin_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM checkins WHERE id = ? AND user_id = ?")
            .bind(checkin_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_checkin(&self, row: SqliteRow) -> Result<CheckinEntry> {
        let activities: String = row.get("activities");
        let gratitude: String = row.get("gratitude");
        let goals_completed: String = row.get("goals_completed");
        let goals_upcoming: String = row.get("goals_upcoming");
        let created_at: NaiveDateTime = row.get("created_at");

        Ok(CheckinEntry {
            id: row.get("id"),
            user_id: row.get("user_id"),
            mood: CheckinMood {
                rating: row.get("mood_rating"),
                description: row.get("mood_description"),
            },
            activities: serde_json::from_str(&activities).unwrap_or_default(),
            thoughts: row.get("thoughts"),
            gratitude: serde_json::from_str(&gratitude).unwrap_or_default(),
            goals: Goals {
                completed: serde_json::from_str(&goals_completed).unwrap_or_default(),
                upcoming: serde_json::from_str(&goals_upcoming).unwrap_or_default(),
            },
            sleep: Sleep {
                hours: row.get("sleep_hours"),
                quality: row.get("sleep_quality"),
            },
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }
}

fn json_text<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or("[]".to_string())
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_after(date: NaiveDate) -> Option<NaiveDateTime> {
    date.checked_add_days(Days::new(1)).map(day_start)
}
