use axum::{Router, routing::get};

use super::handlers::{dashboard, exercises, frequency, volume_progression, workout_stats};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workout-stats", get(workout_stats))
        .route("/volume-progression", get(volume_progression))
        .route("/frequency", get(frequency))
        .route("/exercises", get(exercises))
        .route("/dashboard", get(dashboard))
}
