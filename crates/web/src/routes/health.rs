use axum::{Json, extract::State};
use serde::Serialize;
use storage::dto::common::ApiResponse;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    /// `memory` or `postgres`
    pub storage: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "ok".to_string(),
        storage: state.backend.as_str().to_string(),
    }))
}
