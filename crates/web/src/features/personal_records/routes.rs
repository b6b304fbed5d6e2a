use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    create_personal_record, delete_personal_record, get_personal_record, list_personal_records,
    update_personal_record,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_personal_record))
        .route("/:id", put(update_personal_record).delete(delete_personal_record))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_personal_records))
        .route("/:id", get(get_personal_record))
        .merge(protected)
}
