use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::error::WebError;
use crate::features::{analytics, goals, personal_records, workout_plans, workouts};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub mod health;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState, api_keys: ApiKeys) -> Router {
    let api_routes = Router::new()
        .nest("/workout-plans", workout_plans::routes::routes(api_keys.clone()))
        .nest("/workouts", workouts::routes::routes(api_keys.clone()))
        .nest("/goals", goals::routes::routes(api_keys.clone()))
        .nest("/personal-records", personal_records::routes::routes(api_keys))
        .nest("/analytics", analytics::routes::routes());

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> WebError {
    WebError::NotFound("Route")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    const API_KEY: &str = "test-key";

    fn app() -> Router {
        build_router(AppState::in_memory(), ApiKeys::default())
    }

    fn secured_app() -> Router {
        build_router(AppState::in_memory(), ApiKeys::from_comma_separated(API_KEY))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        read(app.clone().oneshot(request).await.unwrap()).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn leg_day(created_by: Uuid) -> Value {
        json!({
            "name": "Leg Day",
            "description": "Squats and lunges",
            "exercises": [
                { "name": "Back Squat", "sets": 4, "reps": 8, "weight": 100.0 },
                { "name": "Walking Lunge", "sets": 3, "reps": 12 }
            ],
            "duration": 40,
            "difficulty": "intermediate",
            "category": "strength",
            "isPublic": true,
            "createdBy": created_by
        })
    }

    fn push_day(created_by: Uuid) -> Value {
        json!({
            "name": "Push Day",
            "exercises": [
                { "name": "Bench Press", "sets": 5, "reps": 5, "weight": 80.0 }
            ],
            "duration": 45,
            "difficulty": "advanced",
            "category": "strength",
            "createdBy": created_by
        })
    }

    fn workout(user_id: Uuid, started_at: &str) -> Value {
        json!({
            "userId": user_id,
            "name": "Morning lift",
            "exercises": [{
                "exerciseId": "squat",
                "name": "Back Squat",
                "sets": [
                    { "setNumber": 1, "reps": 5, "weight": 100.0, "completed": true },
                    { "setNumber": 2, "reps": 5, "weight": 100.0, "completed": false }
                ]
            }],
            "status": "completed",
            "startedAt": started_at,
            "completedAt": started_at,
            "duration": 45
        })
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (status, body) = send(&app(), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["storage"], "memory");
    }

    #[tokio::test]
    async fn test_create_search_update_leg_day() {
        let app = app();
        let owner = Uuid::new_v4();

        let (status, created) =
            send(&app, "POST", "/api/workout-plans", Some(leg_day(owner))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["duration"], 40);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert!(Uuid::parse_str(&id).is_ok());

        send(&app, "POST", "/api/workout-plans", Some(push_day(owner))).await;

        let (status, found) = send(&app, "GET", "/api/workout-plans?search=leg", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["count"], 1);
        assert_eq!(found["data"][0]["id"], id.as_str());

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/workout-plans/{}", id),
            Some(json!({ "duration": 50 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["duration"], 50);
        assert_eq!(updated["data"]["name"], "Leg Day");
        assert_eq!(updated["data"]["exercises"], created["data"]["exercises"]);
        assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);

        let (_, fetched) = send(&app, "GET", &format!("/api/workout-plans/{}", id), None).await;
        assert_eq!(fetched["data"], updated["data"]);
    }

    #[tokio::test]
    async fn test_list_filters_preserve_creation_order() {
        let app = app();
        let owner = Uuid::new_v4();
        for body in [leg_day(owner), push_day(owner), leg_day(Uuid::new_v4())] {
            send(&app, "POST", "/api/workout-plans", Some(body)).await;
        }

        let (_, all) = send(&app, "GET", "/api/workout-plans", None).await;
        assert_eq!(all["count"], 3);

        let uri = format!("/api/workout-plans?createdBy={}", owner);
        let (_, mine) = send(&app, "GET", &uri, None).await;
        let names: Vec<&str> = mine["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Leg Day", "Push Day"]);

        let (_, empty_filter) =
            send(&app, "GET", "/api/workout-plans?difficulty=&search=", None).await;
        assert_eq!(empty_filter["count"], 3);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let app = app();
        let owner = Uuid::new_v4();
        let (_, created) = send(&app, "POST", "/api/workout-plans", Some(leg_day(owner))).await;
        send(&app, "POST", "/api/workout-plans", Some(push_day(owner))).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/workout-plans/{}", id);
        let (status, deleted) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["data"]["id"], id.as_str());
        assert!(deleted["message"].is_string());

        let (_, remaining) = send(&app, "GET", "/api/workout-plans", None).await;
        assert_eq!(remaining["count"], 1);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Workout plan not found");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let uri = format!("/api/goals/{}", Uuid::new_v4());
        let (status, body) = send(&app(), "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Goal not found");
    }

    #[tokio::test]
    async fn test_validation_errors_list_every_field() {
        let mut plan = leg_day(Uuid::new_v4());
        plan["name"] = json!("");
        plan["duration"] = json!(0);
        plan["exercises"][1]["reps"] = json!(0);

        let (status, body) = send(&app(), "POST", "/api/workout-plans", Some(plan)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["duration", "exercises[1].reps", "name"]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/workouts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let (status, body) = read(app().oneshot(request).await.unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_malformed_query_and_path_are_bad_requests() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/workouts?userId=not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, "GET", "/api/workouts/42", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mutations_require_api_key_when_configured() {
        let app = secured_app();
        let owner = Uuid::new_v4();

        let (status, body) = send(&app, "POST", "/api/workout-plans", Some(leg_day(owner))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let request = Request::builder()
            .method("POST")
            .uri("/api/workout-plans")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", API_KEY))
            .body(Body::from(leg_day(owner).to_string()))
            .unwrap();
        let (status, _) = read(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = send(&app, "GET", "/api/workout-plans", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["count"], 1);
    }

    #[tokio::test]
    async fn test_completed_workout_filters_and_stats() {
        let app = app();
        let user = Uuid::new_v4();
        send(&app, "POST", "/api/workouts", Some(workout(user, "2024-07-01T08:00:00Z"))).await;
        send(&app, "POST", "/api/workouts", Some(workout(user, "2024-07-03T08:00:00Z"))).await;
        let stranger = workout(Uuid::new_v4(), "2024-07-03T08:00:00Z");
        send(&app, "POST", "/api/workouts", Some(stranger)).await;

        let uri = format!("/api/workouts?userId={}&dateFrom=2024-07-02&dateTo=2024-07-03", user);
        let (_, ranged) = send(&app, "GET", &uri, None).await;
        assert_eq!(ranged["count"], 1);
        assert_eq!(ranged["data"][0]["startedAt"], "2024-07-03T08:00:00Z");

        let uri = format!("/api/analytics/workout-stats?userId={}", user);
        let (status, stats) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["data"]["totalWorkouts"], 2);
        assert_eq!(stats["data"]["completedWorkouts"], 2);
        assert_eq!(stats["data"]["totalVolume"], 1000.0);
    }

    #[tokio::test]
    async fn test_analytics_requires_user_id() {
        let (status, body) = send(&app(), "GET", "/api/analytics/dashboard", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_personal_record_links_previous_best() {
        let app = app();
        let user = Uuid::new_v4();
        let record = |value: f64| {
            json!({
                "userId": user,
                "exerciseId": "deadlift",
                "exerciseName": "Deadlift",
                "recordType": "max_weight",
                "value": value,
                "unit": "kg",
                "workoutId": Uuid::new_v4(),
                "workoutDate": "2024-07-01T18:00:00Z"
            })
        };

        send(&app, "POST", "/api/personal-records", Some(record(170.0))).await;
        let (status, body) = send(&app, "POST", "/api/personal-records", Some(record(180.0))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["previousRecord"], 170.0);
        assert_eq!(body["data"]["improvement"], 10.0);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let (status, body) = send(&app(), "GET", "/api/unknown", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Route not found");
    }
}
