use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

string_enum! {
    pub enum Difficulty {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    pub enum WorkoutCategory {
        Strength => "strength",
        Cardio => "cardio",
        Flexibility => "flexibility",
        Mixed => "mixed",
    }
}

/// One prescribed exercise inside a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Exercise name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(range(min = 1, message = "Sets must be at least 1"))]
    pub sets: i32,

    #[validate(range(min = 1, message = "Reps must be at least 1"))]
    pub reps: i32,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    #[serde(default)]
    pub weight: Option<f64>,

    /// Rest between sets, in seconds.
    #[validate(range(min = 0, message = "Rest time cannot be negative"))]
    #[serde(default)]
    pub rest_time: Option<i32>,

    #[validate(length(max = 500))]
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<PlanExercise>,
    /// Planned length in minutes.
    pub duration: i32,
    pub difficulty: Difficulty,
    pub category: WorkoutCategory,
    pub is_public: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
