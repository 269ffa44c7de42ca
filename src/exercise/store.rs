// src/exercise/store.rs

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use rand::Rng;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::exercise::types::{Difficulty, Exercise, ExerciseFilters};

const EXERCISE_LIST_LIMIT: i64 = 10;

struct ExerciseSeed {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: Difficulty,
    duration: i64,
    steps: &'static [&'static str],
    benefits: &'static [&'static str],
}

/// Starter catalog inserted on first boot.
const STARTER_EXERCISES: &[ExerciseSeed] = &[
    ExerciseSeed {
        title: "Thought Record",
        description: "Track and analyze negative thoughts to identify patterns.",
        category: "depression",
        difficulty: Difficulty::Beginner,
        duration: 15,
        steps: &[
            "Identify the triggering situation.",
            "Write down your automatic thoughts.",
            "Note your emotional response.",
            "Look for evidence that supports and challenges these thoughts.",
            "Develop a balanced perspective.",
        ],
        benefits: &[
            "Increased awareness of thought patterns.",
            "Better emotional regulation.",
            "Improved problem-solving skills.",
        ],
    },
    ExerciseSeed {
        title: "Journaling",
        description: "Write down your thoughts and feelings to process emotions.",
        category: "sadness",
        difficulty: Difficulty::Beginner,
        duration: 20,
        steps: &[
            "Find a quiet place to write.",
            "Set a timer for 20 minutes.",
            "Write freely about your thoughts and feelings.",
        ],
        benefits: &[
            "Helps in processing emotions.",
            "Improves self-awareness.",
            "Can reduce feelings of isolation.",
        ],
    },
    ExerciseSeed {
        title: "Mindfulness Meditation",
        description: "Practice mindfulness to stay present and reduce anxiety.",
        category: "anxiety",
        difficulty: Difficulty::Intermediate,
        duration: 10,
        steps: &[
            "Find a comfortable position.",
            "Close your eyes and focus on your breath.",
            "If your mind wanders, gently bring it back to your breath.",
        ],
        benefits: &[
            "Reduces stress and anxiety.",
            "Improves focus and concentration.",
            "Enhances emotional regulation.",
        ],
    },
    ExerciseSeed {
        title: "Social Connection",
        description: "Reach out to a friend or family member to talk.",
        category: "loneliness",
        difficulty: Difficulty::Beginner,
        duration: 30,
        steps: &[
            "Identify someone you trust.",
            "Send them a message or call them.",
            "Share your feelings and listen to their perspective.",
        ],
        benefits: &[
            "Reduces feelings of loneliness.",
            "Strengthens social bonds.",
            "Provides emotional support.",
        ],
    },
    ExerciseSeed {
        title: "Gratitude List",
        description: "Write down things you are grateful for to shift focus.",
        category: "sadness",
        difficulty: Difficulty::Beginner,
        duration: 10,
        steps: &[
            "Take a piece of paper.",
            "List at least five things you are grateful for.",
            "Reflect on why you are grateful for each item.",
        ],
        benefits: &[
            "Improves mood.",
            "Enhances overall well-being.",
            "Encourages positive thinking.",
        ],
    },
];

pub struct ExerciseStore {
    pub pool: SqlitePool,
}

impl ExerciseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Active exercises matching the filters, easiest and shortest first,
    /// capped at ten entries.
    pub async fn list_exercises(&self, filters: &ExerciseFilters) -> Result<Vec<Exercise>> {
        let difficulty = filters.difficulty.map(|d| d.as_str());

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, category, difficulty, duration, steps, benefits, is_active, created_at
            FROM exercises
            WHERE is_active = 1
              AND (? IS NULL OR category = ?)
              AND (? IS NULL OR difficulty = ?)
              AND (? IS NULL OR duration <= ?)
            ORDER BY
              CASE difficulty
                WHEN 'beginner' THEN 0
                WHEN 'intermediate' THEN 1
                ELSE 2
              END,
              duration
            LIMIT ?
            "#,
        )
        .bind(&filters.category)
        .bind(&filters.category)
        .bind(difficulty)
        .bind(difficulty)
        .bind(filters.max_duration)
        .bind(filters.max_duration)
        .bind(EXERCISE_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_exercise(row)).collect()
    }

    /// A uniformly random active exercise, optionally within one category.
    /// None when nothing matches.
    pub async fn random_exercise(&self, category: Option<&str>) -> Result<Option<Exercise>> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM exercises
            WHERE is_active = 1
              AND (? IS NULL OR category = ?)
            "#,
        )
        .bind(category)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        if count == 0 {
            return Ok(None);
        }

        let offset = rand::rng().random_range(0..count);

        let row = sqlx::query(
            r#"
            SELECT id, title, description, category, difficulty, duration, steps, benefits, is_active, created_at
            FROM exercises
            WHERE is_active = 1
              AND (? IS NULL OR category = ?)
            ORDER BY id
            LIMIT 1 OFFSET ?
            "#,
        )
        .bind(category)
        .bind(category)
        .bind(offset)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| self.row_to_exercise(row)).transpose()
    }

    /// Total rows including inactive ones, so seeding stays a one-time event.
    pub async fn count_exercises(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts the starter catalog when the table is empty. Returns the
    /// number of exercises inserted.
    pub async fn seed_defaults(&self) -> Result<usize> {
        if self.count_exercises().await? > 0 {
            return Ok(0);
        }

        for seed in STARTER_EXERCISES {
            self.insert_seed(seed).await?;
        }

        info!(inserted = STARTER_EXERCISES.len(), "Seeded exercise catalog");
        Ok(STARTER_EXERCISES.len())
    }

    async fn insert_seed(&self, seed: &ExerciseSeed) -> Result<()> {
        let steps_json = serde_json::to_string(seed.steps).unwrap_or("[]".to_string());
        let benefits_json = serde_json::to_string(seed.benefits).unwrap_or("[]".to_string());

        sqlx::query(
            r#"
            INSERT INTO exercises (id, title, description, category, difficulty, duration, steps, benefits, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(seed.title)
        .bind(seed.description)
        .bind(seed.category)
        .bind(seed.difficulty.as_str())
        .bind(seed.duration)
        .bind(&steps_json)
        .bind(&benefits_json)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_exercise(&self, row: SqliteRow) -> Result<Exercise> {
        let steps: Vec<String> = serde_json::from_str(&row.get::<String, _>("steps"))
            .ok()
            .unwrap_or_default();
        let benefits: Vec<String> = serde_json::from_str(&row.get::<String, _>("benefits"))
            .ok()
            .unwrap_or_default();

        let difficulty = row
            .get::<String, _>("difficulty")
            .parse()
            .unwrap_or(Difficulty::Beginner);
        let created_at: NaiveDateTime = row.get("created_at");

        Ok(Exercise {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            category: row.get("category"),
            difficulty,
            duration: row.get("duration"),
            steps,
            benefits,
            is_active: row.get("is_active"),
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }
}
