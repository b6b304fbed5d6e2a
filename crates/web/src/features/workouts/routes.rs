use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_workout, delete_workout, get_workout, list_workouts, update_workout};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_workout))
        .route("/:id", put(update_workout).delete(delete_workout))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_workouts))
        .route("/:id", get(get_workout))
        .merge(protected)
}
