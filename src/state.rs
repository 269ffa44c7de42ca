// src/state.rs
// Shared application state handed to every handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::chat::{ChatService, ChatStore};
use crate::checkin::CheckinStore;
use crate::exercise::ExerciseStore;
use crate::llm::{EmotionDetector, GeminiClient};
use crate::mood::MoodStore;
use crate::voice::VoiceService;

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub pool: SqlitePool,
    pub mood_store: Arc<MoodStore>,
    pub checkin_store: Arc<CheckinStore>,
    pub chat_store: Arc<ChatStore>,
    pub exercise_store: Arc<ExerciseStore>,

    // -------- AI provider --------
    pub gemini: Arc<GeminiClient>,
    pub emotion_detector: Arc<EmotionDetector>,

    // -------- Services --------
    pub chat_service: Arc<ChatService>,
    pub voice_service: Arc<VoiceService>,
}

impl AppState {
    /// Wires every store and service over one pool and one Gemini client.
    /// Tests pass a client pointed at a stub endpoint; `main` builds one
    /// from the environment.
    pub fn new(pool: SqlitePool, gemini: GeminiClient) -> Self {
        let gemini = Arc::new(gemini);

        let mood_store = Arc::new(MoodStore::new(pool.clone()));
        let checkin_store = Arc::new(CheckinStore::new(pool.clone()));
        let chat_store = Arc::new(ChatStore::new(pool.clone()));
        let exercise_store = Arc::new(ExerciseStore::new(pool.clone()));

        let emotion_detector = Arc::new(EmotionDetector::new(gemini.clone()));
        let chat_service = Arc::new(ChatService::new(chat_store.clone(), gemini.clone()));
        let voice_service = Arc::new(VoiceService::new(gemini.clone()));

        Self {
            pool,
            mood_store,
            checkin_store,
            chat_store,
            exercise_store,
            gemini,
            emotion_detector,
            chat_service,
            voice_service,
        }
    }
}
