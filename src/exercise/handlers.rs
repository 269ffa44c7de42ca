// src/exercise/handlers.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::api::error::{ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::http::common::success_data;
use crate::exercise::types::ExerciseQuery;
use crate::state::AppState;

pub async fn list_exercises_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ExerciseQuery>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let filters = query.resolve()?;

        let exercises = app_state
            .exercise_store
            .list_exercises(&filters)
            .await
            .into_api_error("Failed to retrieve exercises")?;

        Ok(success_data(exercises))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn random_exercise_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ExerciseQuery>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let filters = query.resolve()?;

        let exercise = app_state
            .exercise_store
            .random_exercise(filters.category.as_deref())
            .await
            .into_api_error("Failed to retrieve a random exercise")?
            .ok_or_not_found("No exercises found")?;

        Ok(success_data(exercise))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
