use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::empty_as_none;
use crate::filter::{Filter, matches_eq, matches_search};
use crate::models::{Difficulty, Entity, PlanExercise, WorkoutCategory, WorkoutPlan};

/// Request payload for creating a new workout plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutPlanRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "At least one exercise is required"))]
    #[validate(nested)]
    pub exercises: Vec<PlanExercise>,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: i32,

    pub difficulty: Difficulty,

    pub category: WorkoutCategory,

    #[serde(default)]
    pub is_public: bool,

    pub created_by: Uuid,
}

impl CreateWorkoutPlanRequest {
    pub fn into_model(self, now: DateTime<Utc>) -> WorkoutPlan {
        WorkoutPlan {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            exercises: self.exercises,
            duration: self.duration,
            difficulty: self.difficulty,
            category: self.category,
            is_public: self.is_public,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request payload for updating an existing workout plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutPlanRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "At least one exercise is required"))]
    #[validate(nested)]
    pub exercises: Option<Vec<PlanExercise>>,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: Option<i32>,

    pub difficulty: Option<Difficulty>,

    pub category: Option<WorkoutCategory>,

    pub is_public: Option<bool>,

    pub created_by: Option<Uuid>,
}

impl UpdateWorkoutPlanRequest {
    /// Merges the provided fields over `plan` and refreshes its timestamp.
    pub fn apply_to(self, plan: &mut WorkoutPlan, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            plan.name = name;
        }
        if let Some(description) = self.description {
            plan.description = Some(description);
        }
        if let Some(exercises) = self.exercises {
            plan.exercises = exercises;
        }
        if let Some(duration) = self.duration {
            plan.duration = duration;
        }
        if let Some(difficulty) = self.difficulty {
            plan.difficulty = difficulty;
        }
        if let Some(category) = self.category {
            plan.category = category;
        }
        if let Some(is_public) = self.is_public {
            plan.is_public = is_public;
        }
        if let Some(created_by) = self.created_by {
            plan.created_by = created_by;
        }
        plan.touch(now);
    }
}

/// Query parameters for listing workout plans
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkoutPlanFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<WorkoutCategory>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub created_by: Option<Uuid>,
    /// Case-insensitive match against name and description
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

impl Filter<WorkoutPlan> for WorkoutPlanFilter {
    fn matches(&self, plan: &WorkoutPlan) -> bool {
        matches_eq(self.difficulty.as_ref(), &plan.difficulty)
            && matches_eq(self.category.as_ref(), &plan.category)
            && matches_eq(self.is_public.as_ref(), &plan.is_public)
            && matches_eq(self.created_by.as_ref(), &plan.created_by)
            && matches_search(
                self.search.as_deref(),
                [Some(plan.name.as_str()), plan.description.as_deref()],
            )
    }
}
