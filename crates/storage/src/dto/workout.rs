use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{empty_as_none, lower_date_bound, upper_date_bound};
use crate::filter::{Filter, matches_date_range, matches_eq, matches_eq_opt, matches_search};
use crate::models::{Entity, Workout, WorkoutExercise, WorkoutStatus};

/// Request payload for logging a new workout
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub user_id: Uuid,

    #[serde(default)]
    pub plan_id: Option<Uuid>,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub plan_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "At least one exercise is required"))]
    #[validate(nested)]
    pub exercises: Vec<WorkoutExercise>,

    #[serde(default)]
    pub status: WorkoutStatus,

    pub started_at: DateTime<Utc>,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    #[serde(default)]
    pub duration: Option<i32>,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateWorkoutRequest {
    pub fn into_model(self, now: DateTime<Utc>) -> Workout {
        let mut workout = Workout {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            plan_id: self.plan_id,
            plan_name: self.plan_name,
            name: self.name,
            exercises: self.exercises,
            status: self.status,
            started_at: self.started_at,
            completed_at: self.completed_at,
            duration: self.duration,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        };
        workout.finalize_completion(now);
        workout
    }
}

/// Request payload for updating a logged workout
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    pub user_id: Option<Uuid>,

    pub plan_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub plan_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "At least one exercise is required"))]
    #[validate(nested)]
    pub exercises: Option<Vec<WorkoutExercise>>,

    pub status: Option<WorkoutStatus>,

    pub started_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl UpdateWorkoutRequest {
    /// Merges the provided fields over `workout`, stamps completion when the
    /// status moves to completed, and drops derived completion data when it
    /// moves away from completed.
    pub fn apply_to(self, workout: &mut Workout, now: DateTime<Utc>) {
        let was_completed = workout.status == WorkoutStatus::Completed;
        let explicit_completed_at = self.completed_at.is_some();
        let explicit_duration = self.duration.is_some();

        if let Some(user_id) = self.user_id {
            workout.user_id = user_id;
        }
        if let Some(plan_id) = self.plan_id {
            workout.plan_id = Some(plan_id);
        }
        if let Some(plan_name) = self.plan_name {
            workout.plan_name = Some(plan_name);
        }
        if let Some(name) = self.name {
            workout.name = name;
        }
        if let Some(exercises) = self.exercises {
            workout.exercises = exercises;
        }
        if let Some(status) = self.status {
            workout.status = status;
        }
        if let Some(started_at) = self.started_at {
            workout.started_at = started_at;
        }
        if let Some(completed_at) = self.completed_at {
            workout.completed_at = Some(completed_at);
        }
        if let Some(duration) = self.duration {
            workout.duration = Some(duration);
        }
        if let Some(notes) = self.notes {
            workout.notes = Some(notes);
        }
        if was_completed && workout.status != WorkoutStatus::Completed {
            if !explicit_completed_at {
                workout.completed_at = None;
            }
            if !explicit_duration {
                workout.duration = None;
            }
        }
        workout.finalize_completion(now);
        workout.touch(now);
    }
}

/// Query parameters for listing workouts
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkoutFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub plan_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<WorkoutStatus>,
    /// Earliest `startedAt` (inclusive); a plain date means start of day
    #[serde(default, deserialize_with = "lower_date_bound")]
    pub date_from: Option<DateTime<Utc>>,
    /// Latest `startedAt` (inclusive); a plain date means end of day
    #[serde(default, deserialize_with = "upper_date_bound")]
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive match against name, plan name and notes
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

impl WorkoutFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }
}

impl Filter<Workout> for WorkoutFilter {
    fn matches(&self, workout: &Workout) -> bool {
        matches_eq(self.user_id.as_ref(), &workout.user_id)
            && matches_eq_opt(self.plan_id.as_ref(), workout.plan_id.as_ref())
            && matches_eq(self.status.as_ref(), &workout.status)
            && matches_date_range(workout.started_at, self.date_from, self.date_to)
            && matches_search(
                self.search.as_deref(),
                [
                    Some(workout.name.as_str()),
                    workout.plan_name.as_deref(),
                    workout.notes.as_deref(),
                ],
            )
    }
}
