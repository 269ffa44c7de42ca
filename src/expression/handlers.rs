// src/expression/handlers.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::llm::{Emotion, EmotionResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DetectEmotionRequest {
    pub text: Option<String>,
}

// Avatar-facing surface: replies carry a `success` flag instead of the
// status envelope used by the rest of the API.
#[derive(Debug, Serialize)]
struct DetectEmotionResponse {
    success: bool,
    emotion: Emotion,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<EmotionResult> for DetectEmotionResponse {
    fn from(result: EmotionResult) -> Self {
        Self {
            success: true,
            emotion: result.emotion,
            confidence: result.confidence,
            details: result.details,
        }
    }
}

pub async fn detect_emotion_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<DetectEmotionRequest>,
) -> impl IntoResponse {
    let Some(text) = payload.text.filter(|text| !text.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Text input is required",
            })),
        )
            .into_response();
    };

    let result = app_state.emotion_detector.detect(&text).await;
    Json(DetectEmotionResponse::from(result)).into_response()
}
