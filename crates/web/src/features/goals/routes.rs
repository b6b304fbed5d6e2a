use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_goal, delete_goal, get_goal, list_goals, update_goal};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_goal))
        .route("/:id", put(update_goal).delete(delete_goal))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_goals))
        .route("/:id", get(get_goal))
        .merge(protected)
}
