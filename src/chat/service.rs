// src/chat/service.rs

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::chat::store::ChatStore;
use crate::chat::types::ChatRecord;
use crate::config::CONFIG;
use crate::llm::{GeminiClient, GenerationConfig};
use crate::prompt::{build_companion_prompt, build_conversation_context};
use crate::session::SessionManager;

/// Orchestrates one chat exchange: rolling per-user context, prompt assembly,
/// the provider call, persistence.
pub struct ChatService {
    store: Arc<ChatStore>,
    gemini: Arc<GeminiClient>,
    // Keyed by user id: chat context follows the user, not a client session.
    sessions: SessionManager,
}

impl ChatService {
    pub fn new(store: Arc<ChatStore>, gemini: Arc<GeminiClient>) -> Self {
        Self {
            store,
            gemini,
            sessions: SessionManager::new(CONFIG.chat_context_cap),
        }
    }

    /// Process a user message end to end. Provider failures surface as the
    /// canned fallback reply, never as an error; the exchange is persisted
    /// either way.
    pub async fn process_message(&self, user_id: &str, message: &str) -> Result<ChatRecord> {
        let history = self.sessions.context(user_id).await;
        let context = build_conversation_context(&history, CONFIG.chat_context_cap);
        let prompt = build_companion_prompt(message, &context);

        debug!(
            user_id,
            prompt_len = prompt.len(),
            context_turns = history.len(),
            "Assembled chat prompt"
        );

        let reply = self
            .gemini
            .generate_reply(&prompt, &[], &GenerationConfig::default())
            .await;

        if !reply.succeeded {
            warn!(user_id, "Chat reply degraded to fallback text");
        }

        let record = self.store.save_message(user_id, message, &reply.text).await?;
        self.sessions.append_turn(user_id, message, &reply.text).await;

        Ok(record)
    }

    pub async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatRecord>> {
        self.store
            .recent_messages(user_id, CONFIG.chat_history_limit)
            .await
    }

    pub async fn clear_history(&self, user_id: &str) -> Result<()> {
        let removed = self.store.clear_history(user_id).await?;
        info!(user_id, removed, "Cleared chat history");
        Ok(())
    }
}
