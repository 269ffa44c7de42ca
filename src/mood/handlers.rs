// src/mood/handlers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::http::common::{success_data, success_message, HistoryQuery, DEFAULT_USER_ID};
use crate::mood::types::{CreateMoodRequest, UpdateMoodRequest};
use crate::state::AppState;

pub async fn create_mood_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateMoodRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        payload.validate()?;

        let mood = app_state
            .mood_store
            .create_mood(
                DEFAULT_USER_ID,
                payload.rating,
                payload.description,
                payload.tags.unwrap_or_default(),
            )
            .await
            .into_api_error("Failed to create mood entry")?;

        // Created entries are returned bare, without the status envelope.
        Ok((StatusCode::CREATED, Json(mood)))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn mood_history_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let filter = query.resolve()?;

        let history = app_state
            .mood_store
            .mood_history(DEFAULT_USER_ID, &filter)
            .await
            .into_api_error("Failed to retrieve mood history")?;

        Ok(success_data(history))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn mood_stats_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let stats = app_state
            .mood_store
            .mood_stats(DEFAULT_USER_ID)
            .await
            .into_api_error("Failed to retrieve mood statistics")?;

        Ok(success_data(stats))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn get_mood_handler(
    State(app_state): State<Arc<AppState>>,
    Path(mood_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let mood = app_state
            .mood_store
            .get_mood(DEFAULT_USER_ID, &mood_id)
            .await
            .into_api_error("Failed to retrieve mood entry")?
            .ok_or_not_found("Mood entry not found")?;

        Ok(success_data(mood))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update_mood_handler(
    State(app_state): State<Arc<AppState>>,
    Path(mood_id): Path<String>,
    Json(payload): Json<UpdateMoodRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        payload.validate()?;

        let mood = app_state
            .mood_store
            .update_mood(
                DEFAULT_USER_ID,
                &mood_id,
                payload.rating,
                payload.description,
                payload.tags,
            )
            .await
            .into_api_error("Failed to update mood entry")?
            .ok_or_not_found("Mood entry not found")?;

        Ok(success_data(mood))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn delete_mood_handler(
    State(app_state): State<Arc<AppState>>,
    Path(mood_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let deleted = app_state
            .mood_store
            .delete_mood(DEFAULT_USER_ID, &mood_id)
            .await
            .into_api_error("Failed to delete mood entry")?;

        if deleted {
            Ok(success_message("Mood entry deleted successfully"))
        } else {
            Err(ApiError::not_found("Mood entry not found"))
        }
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
