// src/voice/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::session::{ConversationTurn, TurnRole};

pub const MAX_VOICE_INPUT_LEN: usize = 1000;

/// One prior turn supplied by the client to seed a fresh session.
/// Unlike [`ConversationTurn`] it carries no timestamp; the seed turns are
/// stamped when the session is created.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ContextTurn {
    pub fn into_turn(self) -> ConversationTurn {
        ConversationTurn::new(self.role, self.content)
    }
}

/// Body of `POST /api/voice/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceChatRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub context: Vec<ContextTurn>,
}

impl VoiceChatRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let text = self.text.as_deref().unwrap_or_default();
        if text.is_empty() {
            return Err(ApiError::bad_request("Voice input cannot be empty"));
        }
        if text.chars().count() > MAX_VOICE_INPUT_LEN {
            return Err(ApiError::bad_request(
                "Voice input must be at most 1000 characters",
            ));
        }
        Ok(())
    }

    pub fn context_turns(&self) -> Vec<ConversationTurn> {
        self.context
            .iter()
            .cloned()
            .map(ContextTurn::into_turn)
            .collect()
    }
}

/// Result of one voice exchange: the reply plus the session's history
/// after both new turns were appended.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceExchange {
    pub response: String,
    pub history: Vec<ConversationTurn>,
    pub session_id: String,
}

/// Payload of `POST /api/voice/session/start`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> VoiceChatRequest {
        VoiceChatRequest {
            text: Some(text.to_string()),
            context: Vec::new(),
        }
    }

    #[test]
    fn test_validate_rejects_missing_and_empty_text() {
        let missing = VoiceChatRequest {
            text: None,
            context: Vec::new(),
        };
        let error = missing.validate().unwrap_err();
        assert_eq!(error.message, "Voice input cannot be empty");

        assert!(request("").validate().is_err());
        assert!(request("hello").validate().is_ok());
    }

    #[test]
    fn test_validate_length_boundary() {
        assert!(request(&"a".repeat(1000)).validate().is_ok());
        assert!(request(&"a".repeat(1001)).validate().is_err());
    }

    #[test]
    fn test_context_deserializes_role_tags() {
        let request: VoiceChatRequest = serde_json::from_str(
            r#"{"text":"hi","context":[
                {"role":"user","content":"earlier"},
                {"role":"assistant","content":"reply"}
            ]}"#,
        )
        .unwrap();

        let turns = request.context_turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[1].content, "reply");
    }

    #[test]
    fn test_exchange_wire_shape() {
        let exchange = VoiceExchange {
            response: "I hear you".to_string(),
            history: vec![ConversationTurn::new(TurnRole::User, "hello")],
            session_id: "abc-123".to_string(),
        };

        let json = serde_json::to_value(&exchange).unwrap();
        assert_eq!(json["sessionId"], "abc-123");
        assert_eq!(json["history"][0]["role"], "user");
        assert!(json["history"][0]["timestamp"].is_string());
    }
}
