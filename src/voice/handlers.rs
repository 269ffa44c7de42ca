// src/voice/handlers.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, IntoApiErrorOption};
use crate::api::http::common::{success_data, success_message};
use crate::state::AppState;
use crate::voice::types::{VoiceChatRequest, VoiceSessionInfo};

fn header_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-session-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn start_voice_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let session = app_state.voice_service.start_session().await;

    (
        StatusCode::CREATED,
        success_data(VoiceSessionInfo {
            session_id: session.session_id,
            created_at: session.created_at,
        }),
    )
}

pub async fn voice_chat_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<VoiceChatRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        payload.validate()?;

        let text = payload.text.as_deref().unwrap_or_default();
        let session_id = header_session_id(&headers);

        let exchange = app_state
            .voice_service
            .process_voice_input(text, payload.context_turns(), session_id.as_deref())
            .await;

        Ok(success_data(exchange))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn end_voice_session_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let session_id = header_session_id(&headers).ok_or_bad_request("Session ID is required")?;

        if !app_state.voice_service.end_session(&session_id).await {
            return Err(ApiError::not_found("Session not found"));
        }

        Ok(success_message("Session ended successfully"))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
