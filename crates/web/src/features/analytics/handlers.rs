use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use storage::dto::{
    analytics::{
        AnalyticsQuery, DashboardMetrics, ExerciseAnalytics, FrequencyStats, VolumeProgression,
        WorkoutStats,
    },
    common::ApiResponse,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/analytics/workout-stats",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Workout totals for the user", body = WorkoutStats),
        (status = 400, description = "Missing or malformed userId")
    ),
    tag = "analytics"
)]
pub async fn workout_stats(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let stats = services::workout_stats(&state.stores, &query).await?;

    Ok(Json(ApiResponse::ok(stats)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/analytics/volume-progression",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Training volume per day", body = VolumeProgression),
        (status = 400, description = "Missing or malformed userId")
    ),
    tag = "analytics"
)]
pub async fn volume_progression(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let progression = services::volume_progression(&state.stores, &query).await?;

    Ok(Json(ApiResponse::ok(progression)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/analytics/frequency",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Training frequency and streaks", body = FrequencyStats),
        (status = 400, description = "Missing or malformed userId")
    ),
    tag = "analytics"
)]
pub async fn frequency(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let frequency = services::frequency(&state.stores, &query).await?;

    Ok(Json(ApiResponse::ok(frequency)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/analytics/exercises",
    params(AnalyticsQuery),
    responses(
        (
            status = 200,
            description = "Per-exercise totals, highest volume first",
            body = Vec<ExerciseAnalytics>
        ),
        (status = 400, description = "Missing or malformed userId")
    ),
    tag = "analytics"
)]
pub async fn exercises(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let exercises = services::exercises(&state.stores, &query).await?;

    Ok(Json(ApiResponse::list(exercises)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Dashboard summary for the user", body = DashboardMetrics),
        (status = 400, description = "Missing or malformed userId")
    ),
    tag = "analytics"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let metrics = services::dashboard(&state.stores, &query).await?;

    Ok(Json(ApiResponse::ok(metrics)).into_response())
}
