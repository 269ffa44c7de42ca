// src/checkin/handlers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::http::common::{success_data, success_message, HistoryQuery, DEFAULT_USER_ID};
use crate::checkin::store::CheckinError;
use crate::checkin::types::{CreateCheckinRequest, UpdateCheckinRequest};
use crate::state::AppState;

pub async fn create_checkin_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateCheckinRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        payload.validate()?;

        let checkin = app_state
            .checkin_store
            .create_checkin(
                DEFAULT_USER_ID,
                payload.mood,
                payload.activities,
                payload.thoughts,
                payload.gratitude,
                payload.goals,
                payload.sleep,
            )
            .await
            .map_err(|e| match e {
                CheckinError::AlreadySubmitted => ApiError::conflict(e.to_string()),
                CheckinError::Database(db) => {
                    error!("Failed to create check-in: {:?}", db);
                    ApiError::internal("Failed to create check-in")
                }
            })?;

        Ok((StatusCode::CREATED, success_data(checkin)))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn today_checkin_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let checkin = app_state
            .checkin_store
            .today_checkin(DEFAULT_USER_ID)
            .await
            .into_api_error("Failed to retrieve today's check-in")?
            .ok_or_not_found("No check-in found for today")?;

        Ok(success_data(checkin))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn checkin_history_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let filter = query.resolve()?;

        let history = app_state
            .checkin_store
            .checkin_history(DEFAULT_USER_ID, &filter)
            .await
            .into_api_error("Failed to retrieve check-in history")?;

        Ok(success_data(history))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update_checkin_handler(
    State(app_state): State<Arc<AppState>>,
    Path(checkin_id): Path<String>,
    Json(payload): Json<UpdateCheckinRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        payload.validate()?;

        let checkin = app_state
            .checkin_store
            .update_checkin(DEFAULT_USER_ID, &checkin_id, payload)
            .await
            .into_api_error("Failed to update check-in entry")?
            .ok_or_not_found("Check-in entry not found")?;

        Ok(success_data(checkin))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn delete_checkin_handler(
    State(app_state): State<Arc<AppState>>,
    Path(checkin_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let deleted = app_state
            .checkin_store
            .delete_checkin(DEFAULT_USER_ID, &checkin_id)
            .await
            .into_api_error("Failed to delete check-in entry")?;

        if deleted {
            Ok(success_message("Check-in entry deleted successfully"))
        } else {
            Err(ApiError::not_found("Check-in entry not found"))
        }
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
