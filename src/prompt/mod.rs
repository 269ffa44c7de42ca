// src/prompt/mod.rs
//! Assembles the instruction strings sent to the generative model.
//! Pure string templating: no I/O, deterministic for a given input.

use crate::persona::PersonaOverlay;
use crate::session::ConversationTurn;

/// Builds the chat prompt: persona instructions, the user's message, and
/// (when present) the prior conversation. User text is interpolated
/// verbatim; the model is trusted with raw input on this surface.
pub fn build_companion_prompt(message: &str, context: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(PersonaOverlay::Companion.prompt());
    prompt.push_str("\n\n### User Message:\n");
    prompt.push('"');
    prompt.push_str(message);
    prompt.push_str("\"\n");

    if !context.is_empty() {
        prompt.push_str("\n### Previous Conversation:\n");
        prompt.push_str(context);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nRespond as Dr. Jamie in a single short paragraph (30-90 words maximum). \
         Make it sound completely natural, as if speaking to a child in person:",
    );

    prompt
}

/// Builds the voice prompt around the transcribed user text.
pub fn build_listener_prompt(text: &str) -> String {
    format!(
        "{}\n- Respond naturally to: {}",
        PersonaOverlay::Listener.prompt(),
        text
    )
}

/// Renders recent turns as `role: content` lines for prompt context.
pub fn build_conversation_context(turns: &[ConversationTurn], max_turns: usize) -> String {
    let start_idx = turns.len().saturating_sub(max_turns);

    turns[start_idx..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TurnRole;

    #[test]
    fn test_companion_prompt_is_deterministic() {
        let a = build_companion_prompt("I feel sad", "user: hi\nassistant: hello");
        let b = build_companion_prompt("I feel sad", "user: hi\nassistant: hello");
        assert_eq!(a, b);
    }

    #[test]
    fn test_companion_prompt_interpolates_verbatim() {
        let prompt = build_companion_prompt("school was \"hard\" today", "");
        assert!(prompt.contains("school was \"hard\" today"));
        assert!(prompt.contains("Dr. Jamie"));
        assert!(prompt.ends_with("in person:"));
    }

    #[test]
    fn test_empty_context_omits_context_block() {
        let without = build_companion_prompt("hello", "");
        assert!(!without.contains("### Previous Conversation:"));

        let with = build_companion_prompt("hello", "user: earlier message");
        assert!(with.contains("### Previous Conversation:\nuser: earlier message"));
    }

    #[test]
    fn test_listener_prompt_embeds_text() {
        let prompt = build_listener_prompt("I'm feeling overwhelmed");
        assert!(prompt.contains("Respond naturally to: I'm feeling overwhelmed"));
        assert!(prompt.contains("I hear you"));
    }

    #[test]
    fn test_conversation_context_rendering() {
        let turns = vec![
            ConversationTurn::new(TurnRole::User, "hi"),
            ConversationTurn::new(TurnRole::Assistant, "hello there"),
            ConversationTurn::new(TurnRole::User, "how are you"),
        ];

        let context = build_conversation_context(&turns, 10);
        assert_eq!(context, "user: hi\nassistant: hello there\nuser: how are you");

        let capped = build_conversation_context(&turns, 2);
        assert_eq!(capped, "assistant: hello there\nuser: how are you");
    }

    #[test]
    fn test_conversation_context_empty() {
        assert_eq!(build_conversation_context(&[], 10), "");
    }
}
