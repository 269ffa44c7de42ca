// src/db.rs
//! SQLite pool construction and schema migrations.
//! Run migrations at startup to guarantee schema compatibility.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, SqlitePool};
use std::str::FromStr;

/// Mood entries: rating 1-10, free-text description, JSON-encoded tags.
const CREATE_MOODS: &str = r#"
CREATE TABLE IF NOT EXISTS moods (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    rating INTEGER NOT NULL,
    description TEXT NOT NULL,
    tags TEXT,
    created_at DATETIME NOT NULL
);
"#;

/// Daily check-ins. Nested shapes (activities, gratitude, goals) are stored
/// as JSON text columns; the flat mood/sleep fields get their own columns.
const CREATE_CHECKINS: &str = r#"
CREATE TABLE IF NOT EXISTS checkins (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    mood_rating INTEGER NOT NULL,
    mood_description TEXT NOT NULL,
    activities TEXT NOT NULL,
    thoughts TEXT NOT NULL,
    gratitude TEXT NOT NULL,
    goals_completed TEXT NOT NULL,
    goals_upcoming TEXT NOT NULL,
    sleep_hours REAL NOT NULL,
    sleep_quality INTEGER NOT NULL,
    created_at DATETIME NOT NULL
);
"#;

/// Persisted chat exchanges (one row per user message + AI response pair).
const CREATE_CHAT_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS chat_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    message TEXT NOT NULL,
    response TEXT NOT NULL,
    timestamp DATETIME NOT NULL
);
"#;

/// Coping-exercise catalog, seeded at startup when empty.
const CREATE_EXERCISES: &str = r#"
CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    difficulty TEXT NOT NULL CHECK (difficulty IN ('beginner', 'intermediate', 'advanced')),
    duration INTEGER NOT NULL,
    steps TEXT NOT NULL,
    benefits TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at DATETIME NOT NULL
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_moods_user_created ON moods(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_checkins_user_created ON checkins(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_chat_messages_user_ts ON chat_messages(user_id, timestamp);
CREATE INDEX IF NOT EXISTS idx_exercises_category ON exercises(category);
"#;

/// Open (creating if missing) the SQLite database behind `database_url`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Runs all required migrations.
/// Safe to call at every startup (idempotent).
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_MOODS).await?;
    pool.execute(CREATE_CHECKINS).await?;
    pool.execute(CREATE_CHAT_MESSAGES).await?;
    pool.execute(CREATE_EXERCISES).await?;
    pool.execute(CREATE_INDICES).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('moods', 'checkins', 'chat_messages', 'exercises')")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count.0, 4);
    }

    #[tokio::test]
    async fn test_difficulty_check_constraint() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO exercises (id, title, description, category, difficulty, duration, steps, benefits, is_active, created_at)
             VALUES ('x', 't', 'd', 'c', 'impossible', 5, '[]', '[]', 1, CURRENT_TIMESTAMP)",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
