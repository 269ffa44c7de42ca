// src/session.rs
//! In-memory conversation sessions for the voice/chat companion.
//! Sessions are ephemeral conversational context, lost on restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Role of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One immutable turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A single conversation with its bounded rolling history.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub session_id: String,
    pub history: Vec<ConversationTurn>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl ConversationSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            history: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Drop oldest turns until the history fits the cap.
    fn trim_history(&mut self, max_turns: usize) {
        if self.history.len() > max_turns {
            let excess = self.history.len() - max_turns;
            self.history.drain(0..excess);
        }
    }
}

/// Manages all live conversation sessions.
///
/// The write lock serializes every mutation, so turn order within a session
/// is FIFO even with requests racing on the multi-threaded runtime.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, ConversationSession>>,
    max_turns: usize,
}

impl SessionManager {
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_turns,
        }
    }

    /// Create a fresh session with empty history.
    pub async fn start_session(&self) -> ConversationSession {
        let session = ConversationSession::new();
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        session
    }

    /// Create a fresh session pre-seeded with caller-supplied history.
    /// The seed is trimmed to the cap like any other mutation.
    pub async fn resume_session(&self, turns: Vec<ConversationTurn>) -> ConversationSession {
        let mut session = ConversationSession::new();
        session.history = turns;
        session.trim_history(self.max_turns);

        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        session
    }

    /// Append a user turn followed by an assistant turn, then trim to the cap.
    /// Creates the session lazily when the id is unknown. Both turns land
    /// under one lock acquisition, so a pair is never split by another writer.
    pub async fn append_turn(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> ConversationSession {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_insert_with(|| {
            let mut s = ConversationSession::new();
            s.session_id = session_id.to_string();
            s
        });

        session
            .history
            .push(ConversationTurn::new(TurnRole::User, user_text));
        session
            .history
            .push(ConversationTurn::new(TurnRole::Assistant, assistant_text));
        session.trim_history(self.max_turns);
        session.last_updated = Utc::now();

        session.clone()
    }

    /// Current bounded history for prompt assembly; empty for unknown ids.
    pub async fn context(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }

    pub async fn get_session(&self, session_id: &str) -> Option<ConversationSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Remove a session. Returns false when the id was unknown.
    pub async fn end_session(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_start_session_has_empty_history() {
        let manager = SessionManager::new(10);
        let session = manager.start_session().await;

        assert!(!session.session_id.is_empty());
        assert!(session.history.is_empty());
        assert_eq!(manager.active_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_history_capped_fifo() {
        let manager = SessionManager::new(10);
        let session = manager.start_session().await;

        for i in 0..7 {
            manager
                .append_turn(
                    &session.session_id,
                    &format!("question {i}"),
                    &format!("answer {i}"),
                )
                .await;
        }

        let history = manager.context(&session.session_id).await;
        assert_eq!(history.len(), 10);

        // 7 pairs appended = 14 turns; the oldest 4 are gone.
        assert_eq!(history[0].content, "question 2");
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[9].content, "answer 6");
        assert_eq!(history[9].role, TurnRole::Assistant);
    }

    #[tokio::test]
    async fn test_append_preserves_call_order() {
        let manager = SessionManager::new(10);
        let session = manager.start_session().await;

        manager.append_turn(&session.session_id, "first", "one").await;
        manager.append_turn(&session.session_id, "second", "two").await;

        let history = manager.context(&session.session_id).await;
        let contents: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "one", "second", "two"]);
    }

    #[tokio::test]
    async fn test_append_turn_creates_session_lazily() {
        let manager = SessionManager::new(10);

        let session = manager.append_turn("lazy-id", "hi", "hello").await;
        assert_eq!(session.session_id, "lazy-id");
        assert_eq!(session.history.len(), 2);
        assert!(manager.get_session("lazy-id").await.is_some());
    }

    #[tokio::test]
    async fn test_end_session_semantics() {
        let manager = SessionManager::new(10);
        let session = manager.start_session().await;

        assert!(!manager.end_session("no-such-session").await);
        assert!(manager.end_session(&session.session_id).await);
        assert!(manager.get_session(&session.session_id).await.is_none());
        assert!(manager.context(&session.session_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_resume_session_trims_seed() {
        let manager = SessionManager::new(4);
        let seed: Vec<ConversationTurn> = (0..6)
            .map(|i| ConversationTurn::new(TurnRole::User, format!("turn {i}")))
            .collect();

        let session = manager.resume_session(seed).await;
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.history[0].content, "turn 2");
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_pairs_adjacent() {
        let manager = Arc::new(SessionManager::new(10));
        let session = manager.start_session().await;

        let mut handles = Vec::new();
        for i in 0..20 {
            let manager = manager.clone();
            let id = session.session_id.clone();
            handles.push(tokio::spawn(async move {
                manager
                    .append_turn(&id, &format!("q{i}"), &format!("a{i}"))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = manager.context(&session.session_id).await;
        assert_eq!(history.len(), 10);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, TurnRole::User);
            assert_eq!(pair[1].role, TurnRole::Assistant);
        }
    }
}
