// src/llm/mod.rs
// Gemini provider plumbing: generateContent client with retry plus the
// emotion classifier built on top of it.

pub mod emotion;
pub mod gemini;

pub use emotion::{Emotion, EmotionDetector, EmotionResult};
pub use gemini::{GeminiClient, GeminiReply, GenerationConfig, FALLBACK_REPLY};
