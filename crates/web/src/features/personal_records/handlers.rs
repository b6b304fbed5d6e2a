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
        personal_record::{
            CreatePersonalRecordRequest, PersonalRecordFilter, UpdatePersonalRecordRequest,
        },
    },
    models::PersonalRecord,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/personal-records",
    params(PersonalRecordFilter),
    responses(
        (
            status = 200,
            description = "Personal records matching the filter",
            body = Vec<PersonalRecord>
        ),
        (status = 400, description = "Malformed query")
    ),
    tag = "personal-records"
)]
pub async fn list_personal_records(
    State(state): State<AppState>,
    filter: Result<Query<PersonalRecordFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filter) = filter?;
    let records =
        services::list_personal_records(state.stores.personal_records.as_ref(), &filter).await?;

    Ok(Json(ApiResponse::list(records)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/personal-records/{id}",
    params(
        ("id" = Uuid, Path, description = "Personal record id")
    ),
    responses(
        (status = 200, description = "Personal record found", body = PersonalRecord),
        (status = 404, description = "Personal record not found")
    ),
    tag = "personal-records"
)]
pub async fn get_personal_record(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let record = services::get_personal_record(state.stores.personal_records.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(record)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/personal-records",
    request_body = CreatePersonalRecordRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Personal record created successfully", body = PersonalRecord),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "personal-records"
)]
pub async fn create_personal_record(
    State(state): State<AppState>,
    payload: Result<Json<CreatePersonalRecordRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let record =
        services::create_personal_record(state.stores.personal_records.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/personal-records/{id}",
    params(
        ("id" = Uuid, Path, description = "Personal record id")
    ),
    request_body = UpdatePersonalRecordRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Personal record updated successfully", body = PersonalRecord),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Personal record not found")
    ),
    tag = "personal-records"
)]
pub async fn update_personal_record(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePersonalRecordRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_personal_record(
        state.stores.personal_records.as_ref(),
        id,
        update_req,
    )
    .await?;

    Ok(Json(ApiResponse::ok(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/personal-records/{id}",
    params(
        ("id" = Uuid, Path, description = "Personal record id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Personal record deleted successfully", body = PersonalRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Personal record not found")
    ),
    tag = "personal-records"
)]
pub async fn delete_personal_record(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let deleted =
        services::delete_personal_record(state.stores.personal_records.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(deleted).with_message("Personal record deleted successfully"))
        .into_response())
}
