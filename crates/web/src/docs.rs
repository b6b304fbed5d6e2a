use utoipa::OpenApi;

use crate::features::{analytics, goals, personal_records, workout_plans, workouts};
use crate::routes::health;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        workout_plans::handlers::list_workout_plans,
        workout_plans::handlers::get_workout_plan,
        workout_plans::handlers::create_workout_plan,
        workout_plans::handlers::update_workout_plan,
        workout_plans::handlers::delete_workout_plan,
        workouts::handlers::list_workouts,
        workouts::handlers::get_workout,
        workouts::handlers::create_workout,
        workouts::handlers::update_workout,
        workouts::handlers::delete_workout,
        goals::handlers::list_goals,
        goals::handlers::get_goal,
        goals::handlers::create_goal,
        goals::handlers::update_goal,
        goals::handlers::delete_goal,
        personal_records::handlers::list_personal_records,
        personal_records::handlers::get_personal_record,
        personal_records::handlers::create_personal_record,
        personal_records::handlers::update_personal_record,
        personal_records::handlers::delete_personal_record,
        analytics::handlers::workout_stats,
        analytics::handlers::volume_progression,
        analytics::handlers::frequency,
        analytics::handlers::exercises,
        analytics::handlers::dashboard,
    ),
    components(
        schemas(
            storage::dto::workout_plan::CreateWorkoutPlanRequest,
            storage::dto::workout_plan::UpdateWorkoutPlanRequest,
            storage::dto::workout::CreateWorkoutRequest,
            storage::dto::workout::UpdateWorkoutRequest,
            storage::dto::goal::CreateGoalRequest,
            storage::dto::goal::UpdateGoalRequest,
            storage::dto::personal_record::CreatePersonalRecordRequest,
            storage::dto::personal_record::UpdatePersonalRecordRequest,
            storage::dto::analytics::WorkoutStats,
            storage::dto::analytics::VolumeProgression,
            storage::dto::analytics::VolumePoint,
            storage::dto::analytics::FrequencyStats,
            storage::dto::analytics::WeekdayCount,
            storage::dto::analytics::ExerciseAnalytics,
            storage::dto::analytics::GoalProgress,
            storage::dto::analytics::DashboardMetrics,
            storage::dto::common::ValidationIssue,
            storage::models::WorkoutPlan,
            storage::models::PlanExercise,
            storage::models::Difficulty,
            storage::models::WorkoutCategory,
            storage::models::Workout,
            storage::models::WorkoutExercise,
            storage::models::WorkoutSet,
            storage::models::WorkoutStatus,
            storage::models::Goal,
            storage::models::GoalType,
            storage::models::GoalStatus,
            storage::models::GoalPriority,
            storage::models::PersonalRecord,
            storage::models::RecordType,
            health::HealthStatus,
        )
    ),
    tags(
        (name = "workout-plans", description = "Reusable workout templates"),
        (name = "workouts", description = "Logged training sessions"),
        (name = "goals", description = "User fitness goals"),
        (name = "personal-records", description = "Personal bests per exercise"),
        (name = "analytics", description = "Aggregates over a user's training history"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
