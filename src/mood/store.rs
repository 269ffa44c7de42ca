// src/mood/store.rs

use std::collections::HashMap;

use anyhow::Result;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::api::http::common::{total_pages, HistoryFilter};
use crate::mood::types::{
    MoodEntry, MoodHistoryPage, MoodStats, OverallStats, TagCount, TrendPoint,
};

const WEEKLY_TREND_WINDOWS: u64 = 4;
const MONTHLY_TREND_WINDOWS: u32 = 6;
const POPULAR_TAG_LIMIT: usize = 10;

pub struct MoodStore {
    pub pool: SqlitePool,
}

impl MoodStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_mood(
        &self,
        user_id: &str,
        rating: i64,
        description: String,
        tags: Vec<String>,
    ) -> Result<MoodEntry> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let tags_json = serde_json::to_string(&tags).unwrap_or("[]".to_string());

        sqlx::query(
            r#"
            INSERT INTO moods (id, user_id, rating, description, tags, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(rating)
        .bind(&description)
        .bind(&tags_json)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(MoodEntry {
            id,
            user_id: user_id.to_string(),
            rating,
            description,
            tags,
            created_at: now,
        })
    }

    /// Most recent entry for a user, if any.
    pub async fn latest_mood(&self, user_id: &str) -> Result<Option<MoodEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, rating, description, tags, created_at
            FROM moods
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| self.row_to_mood(row)).transpose()
    }

    pub async fn mood_history(
        &self,
        user_id: &str,
        filter: &HistoryFilter,
    ) -> Result<MoodHistoryPage> {
        let since = filter.start_date.map(day_start);
        let until = filter.end_date.and_then(day_after);
        let offset = (filter.page - 1) * filter.limit;

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, rating, description, tags, created_at
            FROM moods
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

        let moods = rows
            .into_iter()
            .map(|row| self.row_to_mood(row))
            .collect::<Result<Vec<_>>>()?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM moods
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

        Ok(MoodHistoryPage {
            moods,
            total,
            page: filter.page,
            total_pages: total_pages(total, filter.limit),
        })
    }

    pub async fn get_mood(&self, user_id: &str, mood_id: &str) -> Result<Option<MoodEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, rating, description, tags, created_at
            FROM moods
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(mood_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_mood(row)?)),
            None => Ok(None),
        }
    }

    pub async fn update_mood(
        &self,
        user_id: &str,
        mood_id: &str,
        rating: Option<i64>,
        description: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Option<MoodEntry>> {
        let Some(mut mood) = self.get_mood(user_id, mood_id).await? else {
            return Ok(None);
        };

        if let Some(r) = rating {
            mood.rating = r;
        }
        if let Some(d) = description {
            mood.description = d;
        }
        if let Some(t) = tags {
            mood.tags = t;
        }

        let tags_json = serde_json::to_string(&mood.tags).unwrap_or("[]".to_string());

        sqlx::query(
            r#"
            UPDATE moods
            SET rating = ?, description = ?, tags = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(mood.rating)
        .bind(&mood.description)
        .bind(&tags_json)
        .bind(mood_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(mood))
    }

    pub async fn delete_mood(&self, user_id: &str, mood_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM moods WHERE id = ? AND user_id = ?")
            .bind(mood_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mood_stats(&self, user_id: &str) -> Result<MoodStats> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, rating, description, tags, created_at
            FROM moods
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let moods = rows
            .into_iter()
            .map(|row| self.row_to_mood(row))
            .collect::<Result<Vec<_>>>()?;

        Ok(compute_stats(&moods, Utc::now().date_naive()))
    }

    fn row_to_mood(&self, row: SqliteRow) -> Result<MoodEntry> {
        let tags_json: Option<String> = row.get("tags");
        let tags = tags_json
            .as_ref()
            .and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
            .unwrap_or_default();

        let created_at: NaiveDateTime = row.get("created_at");

        Ok(MoodEntry {
            id: row.get("id"),
            user_id: row.get("user_id"),
            rating: row.get("rating"),
            description: row.get("description"),
            tags,
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// Exclusive upper bound covering the whole end day.
fn day_after(date: NaiveDate) -> Option<NaiveDateTime> {
    date.checked_add_days(Days::new(1)).map(day_start)
}

fn compute_stats(moods: &[MoodEntry], today: NaiveDate) -> MoodStats {
    let ratings: Vec<i64> = moods.iter().map(|m| m.rating).collect();

    let overall_stats = OverallStats {
        average_rating: rounded_average(&ratings),
        total_entries: moods.len() as i64,
        highest_rating: ratings.iter().copied().max().unwrap_or(0),
        lowest_rating: ratings.iter().copied().min().unwrap_or(0),
    };

    MoodStats {
        overall_stats,
        weekly_trends: trend_series(moods, weekly_windows(today)),
        monthly_trends: trend_series(moods, monthly_windows(today)),
        popular_tags: tag_frequencies(moods),
    }
}

// Four 7-day windows anchored on today's midnight, oldest first.
fn weekly_windows(today: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    for i in (0..WEEKLY_TREND_WINDOWS).rev() {
        let Some(start) = today.checked_sub_days(Days::new(i * 7)) else {
            continue;
        };
        let Some(end) = start.checked_add_days(Days::new(7)) else {
            continue;
        };
        windows.push((start, end));
    }
    windows
}

// Six calendar-month windows anchored on the first of the month, oldest first.
fn monthly_windows(today: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let Some(first_of_month) = today.with_day(1) else {
        return windows;
    };
    for i in (0..MONTHLY_TREND_WINDOWS).rev() {
        let Some(start) = first_of_month.checked_sub_months(Months::new(i)) else {
            continue;
        };
        let Some(end) = start.checked_add_months(Months::new(1)) else {
            continue;
        };
        windows.push((start, end));
    }
    windows
}

fn trend_series(moods: &[MoodEntry], windows: Vec<(NaiveDate, NaiveDate)>) -> Vec<TrendPoint> {
    windows
        .into_iter()
        .map(|(start, end)| {
            let ratings: Vec<i64> = moods
                .iter()
                .filter(|m| {
                    let day = m.created_at.date_naive();
                    day >= start && day < end
                })
                .map(|m| m.rating)
                .collect();

            TrendPoint {
                date: start.format("%Y-%m-%d").to_string(),
                average_rating: rounded_average(&ratings),
                count: ratings.len() as i64,
            }
        })
        .collect()
}

// Top tags by usage; ties break alphabetically so output is deterministic.
fn tag_frequencies(moods: &[MoodEntry]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for mood in moods {
        for tag in &mood.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();

    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags.truncate(POPULAR_TAG_LIMIT);
    tags
}

// Average rounded to two decimals; 0 for an empty slice.
fn rounded_average(ratings: &[i64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().sum();
    let average = sum as f64 / ratings.len() as f64;
    (average * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};

    async fn test_store() -> MoodStore {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        MoodStore::new(pool)
    }

    fn filter(page: i64, limit: i64) -> HistoryFilter {
        HistoryFilter {
            page,
            limit,
            start_date: None,
            end_date: None,
        }
    }

    fn entry_on(day: NaiveDate, rating: i64, tags: &[&str]) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4().to_string(),
            user_id: "default-user".to_string(),
            rating,
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        }
    }

    async fn insert_on(store: &MoodStore, user_id: &str, day: &str, rating: i64) {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        sqlx::query(
            "INSERT INTO moods (id, user_id, rating, description, tags, created_at)
             VALUES (?, ?, ?, '', '[]', ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(rating)
        .bind(date.and_time(NaiveTime::MIN))
        .execute(&store.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let store = test_store().await;

        let created = store
            .create_mood("default-user", 8, "felt good".to_string(), vec!["happy".to_string()])
            .await
            .unwrap();

        let fetched = store
            .get_mood("default-user", &created.id)
            .await
            .unwrap()
            .expect("mood should exist");

        assert_eq!(fetched.rating, 8);
        assert_eq!(fetched.description, "felt good");
        assert_eq!(fetched.tags, vec!["happy"]);

        // Different owner cannot see it
        assert!(store.get_mood("other-user", &created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_pagination() {
        let store = test_store().await;
        for i in 0..12 {
            store
                .create_mood("default-user", (i % 10) + 1, format!("entry {i}"), vec![])
                .await
                .unwrap();
        }

        let page1 = store
            .mood_history("default-user", &filter(1, 5))
            .await
            .unwrap();
        assert_eq!(page1.moods.len(), 5);
        assert_eq!(page1.total, 12);
        assert_eq!(page1.page, 1);
        assert_eq!(page1.total_pages, 3);

        let page3 = store
            .mood_history("default-user", &filter(3, 5))
            .await
            .unwrap();
        assert_eq!(page3.moods.len(), 2);

        let empty = store.mood_history("nobody", &filter(1, 5)).await.unwrap();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[tokio::test]
    async fn test_latest_mood_picks_newest() {
        let store = test_store().await;
        assert!(store.latest_mood("default-user").await.unwrap().is_none());

        insert_on(&store, "default-user", "2025-06-01", 3).await;
        insert_on(&store, "default-user", "2025-06-10", 9).await;

        let latest = store
            .latest_mood("default-user")
            .await
            .unwrap()
            .expect("entries exist");
        assert_eq!(latest.rating, 9);
    }

    #[tokio::test]
    async fn test_history_date_filter_is_inclusive() {
        let store = test_store().await;
        insert_on(&store, "default-user", "2025-06-01", 3).await;
        insert_on(&store, "default-user", "2025-06-10", 5).await;
        insert_on(&store, "default-user", "2025-06-20", 7).await;

        let mut f = filter(1, 10);
        f.start_date = Some(NaiveDate::parse_from_str("2025-06-10", "%Y-%m-%d").unwrap());
        f.end_date = Some(NaiveDate::parse_from_str("2025-06-10", "%Y-%m-%d").unwrap());

        let page = store.mood_history("default-user", &f).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.moods[0].rating, 5);

        let mut f = filter(1, 10);
        f.start_date = Some(NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").unwrap());
        let page = store.mood_history("default-user", &f).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = test_store().await;
        let created = store
            .create_mood("default-user", 4, "rough day".to_string(), vec!["tired".to_string()])
            .await
            .unwrap();

        let updated = store
            .update_mood("default-user", &created.id, Some(6), None, None)
            .await
            .unwrap()
            .expect("mood should exist");

        assert_eq!(updated.rating, 6);
        assert_eq!(updated.description, "rough day");
        assert_eq!(updated.tags, vec!["tired"]);

        let missing = store
            .update_mood("default-user", "no-such-id", Some(6), None, None)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_outcome() {
        let store = test_store().await;
        let created = store
            .create_mood("default-user", 5, "ok".to_string(), vec![])
            .await
            .unwrap();

        assert!(store.delete_mood("default-user", &created.id).await.unwrap());
        assert!(!store.delete_mood("default-user", &created.id).await.unwrap());
    }

    #[test]
    fn test_compute_stats_on_empty_history() {
        let today = NaiveDate::parse_from_str("2025-06-15", "%Y-%m-%d").unwrap();
        let stats = compute_stats(&[], today);

        assert_eq!(stats.overall_stats.average_rating, 0.0);
        assert_eq!(stats.overall_stats.total_entries, 0);
        assert_eq!(stats.overall_stats.highest_rating, 0);
        assert_eq!(stats.overall_stats.lowest_rating, 0);
        assert_eq!(stats.weekly_trends.len(), 4);
        assert_eq!(stats.monthly_trends.len(), 6);
        assert!(stats.weekly_trends.iter().all(|t| t.count == 0));
        assert!(stats.popular_tags.is_empty());
    }

    #[test]
    fn test_compute_stats_overall_and_windows() {
        let today = NaiveDate::parse_from_str("2025-06-15", "%Y-%m-%d").unwrap();
        let moods = vec![
            entry_on(today, 8, &["happy", "sunny"]),
            entry_on(today - Days::new(1), 5, &["happy"]),
            // Previous weekly window
            entry_on(today - Days::new(8), 2, &[]),
            // Outside every weekly window, inside a monthly one
            entry_on(NaiveDate::parse_from_str("2025-04-10", "%Y-%m-%d").unwrap(), 10, &[]),
        ];

        let stats = compute_stats(&moods, today);

        assert_eq!(stats.overall_stats.total_entries, 4);
        assert_eq!(stats.overall_stats.average_rating, 6.25);
        assert_eq!(stats.overall_stats.highest_rating, 10);
        assert_eq!(stats.overall_stats.lowest_rating, 2);

        // Oldest window first; the last weekly window starts today.
        let last_week = stats.weekly_trends.last().unwrap();
        assert_eq!(last_week.date, "2025-06-15");
        assert_eq!(last_week.count, 1);
        assert_eq!(last_week.average_rating, 8.0);

        // Yesterday's entry falls in the window that ends today.
        let second_last = &stats.weekly_trends[2];
        assert_eq!(second_last.date, "2025-06-08");
        assert_eq!(second_last.count, 1);
        assert_eq!(second_last.average_rating, 5.0);

        // The rating-2 entry from eight days ago lands one window earlier.
        let third_last = &stats.weekly_trends[1];
        assert_eq!(third_last.date, "2025-06-01");
        assert_eq!(third_last.count, 1);
        assert_eq!(third_last.average_rating, 2.0);

        let april = stats
            .monthly_trends
            .iter()
            .find(|t| t.date == "2025-04-01")
            .expect("april window");
        assert_eq!(april.count, 1);
        assert_eq!(april.average_rating, 10.0);

        assert_eq!(stats.popular_tags[0], TagCount { tag: "happy".to_string(), count: 2 });
        assert_eq!(stats.popular_tags[1], TagCount { tag: "sunny".to_string(), count: 1 });
    }

    #[test]
    fn test_rounded_average_two_decimals() {
        assert_eq!(rounded_average(&[1, 2, 2]), 1.67);
        assert_eq!(rounded_average(&[]), 0.0);
    }

    #[test]
    fn test_monthly_windows_cross_year_boundary() {
        let today = NaiveDate::parse_from_str("2025-02-10", "%Y-%m-%d").unwrap();
        let windows = monthly_windows(today);

        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].0.format("%Y-%m-%d").to_string(), "2024-09-01");
        assert_eq!(windows[5].0.format("%Y-%m-%d").to_string(), "2025-02-01");
    }
}
