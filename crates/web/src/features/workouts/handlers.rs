use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::ApiResponse,
        workout::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutFilter},
    },
    models::Workout,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts",
    params(WorkoutFilter),
    responses(
        (status = 200, description = "Workouts matching the filter", body = Vec<Workout>),
        (status = 400, description = "Malformed query")
    ),
    tag = "workouts"
)]
pub async fn list_workouts(
    State(state): State<AppState>,
    filter: Result<Query<WorkoutFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filter) = filter?;
    let workouts = services::list_workouts(state.stores.workouts.as_ref(), &filter).await?;

    Ok(Json(ApiResponse::list(workouts)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout found", body = Workout),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let workout = services::get_workout(state.stores.workouts.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(workout)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = CreateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Workout created successfully", body = Workout),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let workout = services::create_workout(state.stores.workouts.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(workout))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout id")
    ),
    request_body = UpdateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout updated successfully", body = Workout),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateWorkoutRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated =
        services::update_workout(state.stores.workouts.as_ref(), id, update_req).await?;

    Ok(Json(ApiResponse::ok(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout deleted successfully", body = Workout),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let deleted = services::delete_workout(state.stores.workouts.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(deleted).with_message("Workout deleted successfully")).into_response())
}
