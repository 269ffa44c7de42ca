// src/chat/store.rs

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use crate::chat::types::ChatRecord;

pub struct ChatStore {
    pub pool: SqlitePool,
}

impl ChatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save_message(
        &self,
        user_id: &str,
        message: &str,
        response: &str,
    ) -> Result<ChatRecord> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO chat_messages (user_id, message, response, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(response)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(ChatRecord {
            user_id: user_id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            timestamp: now,
        })
    }

    /// Most recent exchanges first.
    pub async fn recent_messages(&self, user_id: &str, limit: u32) -> Result<Vec<ChatRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, message, response, timestamp
            FROM chat_messages
            WHERE user_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let timestamp: NaiveDateTime = row.get("timestamp");
                ChatRecord {
                    user_id: row.get("user_id"),
                    message: row.get("message"),
                    response: row.get("response"),
                    timestamp: Utc.from_utc_datetime(&timestamp),
                }
            })
            .collect())
    }

    /// Delete every stored exchange for the user; returns how many went.
    pub async fn clear_history(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};

    async fn test_store() -> ChatStore {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        ChatStore::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_fetch_round_trip() {
        let store = test_store().await;

        store
            .save_message("default-user", "hello", "hi there")
            .await
            .unwrap();

        let history = store.recent_messages("default-user", 50).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "hello");
        assert_eq!(history[0].response, "hi there");

        assert!(store.recent_messages("other-user", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_messages_orders_newest_first_and_caps() {
        let store = test_store().await;
        for i in 0..60 {
            store
                .save_message("default-user", &format!("message {i}"), "ok")
                .await
                .unwrap();
        }

        let history = store.recent_messages("default-user", 50).await.unwrap();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].message, "message 59");
        assert_eq!(history[49].message, "message 10");
    }

    #[tokio::test]
    async fn test_clear_history_counts_deletions() {
        let store = test_store().await;
        store.save_message("default-user", "one", "1").await.unwrap();
        store.save_message("default-user", "two", "2").await.unwrap();
        store.save_message("other-user", "keep", "k").await.unwrap();

        let removed = store.clear_history("default-user").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.recent_messages("default-user", 50).await.unwrap().is_empty());
        assert_eq!(store.recent_messages("other-user", 50).await.unwrap().len(), 1);

        assert_eq!(store.clear_history("default-user").await.unwrap(), 0);
    }
}
