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
        workout_plan::{CreateWorkoutPlanRequest, UpdateWorkoutPlanRequest, WorkoutPlanFilter},
    },
    models::WorkoutPlan,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workout-plans",
    params(WorkoutPlanFilter),
    responses(
        (status = 200, description = "Workout plans matching the filter", body = Vec<WorkoutPlan>),
        (status = 400, description = "Malformed query")
    ),
    tag = "workout-plans"
)]
pub async fn list_workout_plans(
    State(state): State<AppState>,
    filter: Result<Query<WorkoutPlanFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filter) = filter?;
    let plans = services::list_workout_plans(state.stores.workout_plans.as_ref(), &filter).await?;

    Ok(Json(ApiResponse::list(plans)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workout-plans/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout plan id")
    ),
    responses(
        (status = 200, description = "Workout plan found", body = WorkoutPlan),
        (status = 404, description = "Workout plan not found")
    ),
    tag = "workout-plans"
)]
pub async fn get_workout_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let plan = services::get_workout_plan(state.stores.workout_plans.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(plan)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workout-plans",
    request_body = CreateWorkoutPlanRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Workout plan created successfully", body = WorkoutPlan),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workout-plans"
)]
pub async fn create_workout_plan(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkoutPlanRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let plan = services::create_workout_plan(state.stores.workout_plans.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(plan))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/workout-plans/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout plan id")
    ),
    request_body = UpdateWorkoutPlanRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout plan updated successfully", body = WorkoutPlan),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout plan not found")
    ),
    tag = "workout-plans"
)]
pub async fn update_workout_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateWorkoutPlanRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated =
        services::update_workout_plan(state.stores.workout_plans.as_ref(), id, update_req).await?;

    Ok(Json(ApiResponse::ok(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workout-plans/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout plan id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout plan deleted successfully", body = WorkoutPlan),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout plan not found")
    ),
    tag = "workout-plans"
)]
pub async fn delete_workout_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let deleted = services::delete_workout_plan(state.stores.workout_plans.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(deleted).with_message("Workout plan deleted successfully"))
        .into_response())
}
