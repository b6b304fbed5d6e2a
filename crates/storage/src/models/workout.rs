use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

string_enum! {
    #[derive(Default)]
    pub enum WorkoutStatus {
        #[default]
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    #[validate(range(min = 1, message = "Set number must be at least 1"))]
    pub set_number: i32,

    #[validate(range(min = 0, message = "Reps cannot be negative"))]
    pub reps: i32,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    #[serde(default)]
    pub weight: Option<f64>,

    #[validate(range(min = 0, message = "Rest time cannot be negative"))]
    #[serde(default)]
    pub rest_time: Option<i32>,

    #[serde(default)]
    pub completed: bool,

    #[validate(length(max = 500))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutSet {
    /// Load moved by this set; sets without a weight count as zero.
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    #[validate(length(min = 1, max = 100, message = "Exercise id is required"))]
    pub exercise_id: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Exercise name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "At least one set is required"))]
    #[validate(nested)]
    pub sets: Vec<WorkoutSet>,

    #[validate(length(max = 500))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutExercise {
    pub fn completed_sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sets.iter().filter(|set| set.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Option<Uuid>,
    pub plan_name: Option<String>,
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub status: WorkoutStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Length in minutes.
    pub duration: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Stamps completion time and derives the duration when the workout
    /// has just been marked completed.
    pub fn finalize_completion(&mut self, now: DateTime<Utc>) {
        if self.status != WorkoutStatus::Completed {
            return;
        }

        let completed_at = *self.completed_at.get_or_insert(now);

        if self.duration.is_none() && completed_at >= self.started_at {
            let minutes = (completed_at - self.started_at).num_minutes();
            self.duration = i32::try_from(minutes).ok();
        }
    }

    /// Total volume over completed sets.
    pub fn volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(WorkoutExercise::completed_sets)
            .map(WorkoutSet::volume)
            .sum()
    }
}
