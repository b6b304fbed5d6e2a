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
        goal::{CreateGoalRequest, GoalFilter, UpdateGoalRequest},
    },
    models::Goal,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/goals",
    params(GoalFilter),
    responses(
        (status = 200, description = "Goals matching the filter", body = Vec<Goal>),
        (status = 400, description = "Malformed query")
    ),
    tag = "goals"
)]
pub async fn list_goals(
    State(state): State<AppState>,
    filter: Result<Query<GoalFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filter) = filter?;
    let goals = services::list_goals(state.stores.goals.as_ref(), &filter).await?;

    Ok(Json(ApiResponse::list(goals)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    params(
        ("id" = Uuid, Path, description = "Goal id")
    ),
    responses(
        (status = 200, description = "Goal found", body = Goal),
        (status = 404, description = "Goal not found")
    ),
    tag = "goals"
)]
pub async fn get_goal(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let goal = services::get_goal(state.stores.goals.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(goal)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = CreateGoalRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Goal created successfully", body = Goal),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "goals"
)]
pub async fn create_goal(
    State(state): State<AppState>,
    payload: Result<Json<CreateGoalRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let goal = services::create_goal(state.stores.goals.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(goal))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/goals/{id}",
    params(
        ("id" = Uuid, Path, description = "Goal id")
    ),
    request_body = UpdateGoalRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Goal updated successfully", body = Goal),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Goal not found")
    ),
    tag = "goals"
)]
pub async fn update_goal(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateGoalRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated =
        services::update_goal(state.stores.goals.as_ref(), id, update_req).await?;

    Ok(Json(ApiResponse::ok(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    params(
        ("id" = Uuid, Path, description = "Goal id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Goal deleted successfully", body = Goal),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Goal not found")
    ),
    tag = "goals"
)]
pub async fn delete_goal(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let deleted = services::delete_goal(state.stores.goals.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(deleted).with_message("Goal deleted successfully")).into_response())
}
