// src/voice/mod.rs
// Voice companion: ephemeral sessions around the Gemini listener persona.

pub mod handlers;
pub mod service;
pub mod types;

pub use service::VoiceService;
pub use types::{VoiceChatRequest, VoiceExchange};
