// src/api/http/router.rs
// HTTP router composition for the REST surface.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::health_handler;
use crate::chat::handlers::{chat_history_handler, clear_history_handler, send_message_handler};
use crate::checkin::handlers::{
    checkin_history_handler, create_checkin_handler, delete_checkin_handler,
    today_checkin_handler, update_checkin_handler,
};
use crate::config::CONFIG;
use crate::exercise::handlers::{list_exercises_handler, random_exercise_handler};
use crate::expression::handlers::detect_emotion_handler;
use crate::mood::handlers::{
    create_mood_handler, delete_mood_handler, get_mood_handler, mood_history_handler,
    mood_stats_handler, update_mood_handler,
};
use crate::state::AppState;
use crate::voice::handlers::{
    end_voice_session_handler, start_voice_session_handler, voice_chat_handler,
};

fn cors_layer() -> CorsLayer {
    if !CONFIG.cors_allow_any() {
        match CONFIG.cors_origin.parse::<HeaderValue>() {
            Ok(origin) => {
                return CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods(Any)
                    .allow_headers(Any);
            }
            Err(_) => {
                warn!(
                    origin = %CONFIG.cors_origin,
                    "Configured CORS origin is not a valid header value, allowing any origin"
                );
            }
        }
    }

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// The whole HTTP surface: health at the root, everything else under /api.
/// The outer timeout comfortably exceeds the Gemini retry worst case so the
/// degraded (fallback) path can still complete.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Voice companion
        .route("/voice/session/start", post(start_voice_session_handler))
        .route("/voice/session/end", post(end_voice_session_handler))
        .route("/voice/chat", post(voice_chat_handler))
        // Text chat
        .route("/chat", post(send_message_handler))
        .route("/chat/history/{user_id}", get(chat_history_handler))
        .route("/chat/history", delete(clear_history_handler))
        // Avatar expression
        .route("/expression/detect", post(detect_emotion_handler))
        // Mood tracking
        .route("/moods", post(create_mood_handler).get(mood_history_handler))
        .route("/moods/stats", get(mood_stats_handler))
        .route(
            "/moods/{mood_id}",
            get(get_mood_handler)
                .put(update_mood_handler)
                .delete(delete_mood_handler),
        )
        // Daily check-ins
        .route("/checkins", post(create_checkin_handler))
        .route("/checkins/today", get(today_checkin_handler))
        .route("/checkins/history", get(checkin_history_handler))
        .route(
            "/checkins/{checkin_id}",
            put(update_checkin_handler).delete(delete_checkin_handler),
        )
        // Coping exercises
        .route("/exercises", get(list_exercises_handler))
        .route("/exercises/random", get(random_exercise_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            CONFIG.request_timeout,
        )))
        .with_state(app_state)
}
