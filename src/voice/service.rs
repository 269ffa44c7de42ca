// src/voice/service.rs

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::llm::{GeminiClient, GenerationConfig};
use crate::prompt::build_listener_prompt;
use crate::session::{ConversationSession, ConversationTurn, SessionManager};
use crate::voice::types::VoiceExchange;

/// Orchestrates voice exchanges: session resolution, the listener prompt,
/// the provider call with role-tagged history, and the turn append.
pub struct VoiceService {
    gemini: Arc<GeminiClient>,
    sessions: SessionManager,
}

impl VoiceService {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self {
            gemini,
            sessions: SessionManager::new(CONFIG.session_history_cap),
        }
    }

    pub async fn start_session(&self) -> ConversationSession {
        self.sessions.start_session().await
    }

    /// Process one transcribed utterance. A live session id wins; otherwise
    /// a new session is created, seeded from any caller-supplied context.
    /// Provider failures surface as the canned fallback reply, never as an
    /// error, so the exchange always completes.
    pub async fn process_voice_input(
        &self,
        text: &str,
        context: Vec<ConversationTurn>,
        session_id: Option<&str>,
    ) -> VoiceExchange {
        let session = match session_id {
            Some(id) => match self.sessions.get_session(id).await {
                Some(session) => session,
                None => self.new_session(context).await,
            },
            None => self.new_session(context).await,
        };

        let prompt = build_listener_prompt(text);
        debug!(
            session_id = %session.session_id,
            prompt_len = prompt.len(),
            history_turns = session.history.len(),
            "Assembled voice prompt"
        );

        let reply = self
            .gemini
            .generate_reply(&prompt, &session.history, &GenerationConfig::voice())
            .await;

        if !reply.succeeded {
            warn!(session_id = %session.session_id, "Voice reply degraded to fallback text");
        }

        let session = self
            .sessions
            .append_turn(&session.session_id, text, &reply.text)
            .await;

        VoiceExchange {
            response: reply.text,
            history: session.history,
            session_id: session.session_id,
        }
    }

    async fn new_session(&self, context: Vec<ConversationTurn>) -> ConversationSession {
        if context.is_empty() {
            self.sessions.start_session().await
        } else {
            self.sessions.resume_session(context).await
        }
    }

    /// Remove a session. Returns false when the id was unknown.
    pub async fn end_session(&self, session_id: &str) -> bool {
        self.sessions.end_session(session_id).await
    }
}
