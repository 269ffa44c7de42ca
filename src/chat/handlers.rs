// src/chat/handlers.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::http::common::success_message;
use crate::chat::types::{ChatRequest, ClearHistoryRequest};
use crate::state::AppState;

pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let (user_id, message) = match (payload.user_id.as_deref(), payload.message.as_deref()) {
            (Some(user_id), Some(message)) if !user_id.is_empty() && !message.is_empty() => {
                (user_id, message)
            }
            _ => return Err(ApiError::bad_request("Message and userId are required")),
        };

        let record = app_state
            .chat_service
            .process_message(user_id, message)
            .await
            .into_api_error("Failed to process chat message")?;

        // The exchange is returned bare, without the status envelope.
        Ok(Json(record))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn chat_history_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        if user_id.is_empty() {
            return Err(ApiError::bad_request("UserId is required"));
        }

        let history = app_state
            .chat_service
            .chat_history(&user_id)
            .await
            .into_api_error("Failed to retrieve chat history")?;

        Ok(Json(history))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn clear_history_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ClearHistoryRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let user_id = match payload.user_id.as_deref() {
            Some(user_id) if !user_id.is_empty() => user_id,
            _ => return Err(ApiError::bad_request("UserId is required")),
        };

        app_state
            .chat_service
            .clear_history(user_id)
            .await
            .into_api_error("Failed to clear chat history")?;

        Ok(success_message("Chat history cleared successfully"))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
