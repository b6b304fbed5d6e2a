use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    create_workout_plan, delete_workout_plan, get_workout_plan, list_workout_plans,
    update_workout_plan,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_workout_plan))
        .route("/:id", put(update_workout_plan).delete(delete_workout_plan))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_workout_plans))
        .route("/:id", get(get_workout_plan))
        .merge(protected)
}
