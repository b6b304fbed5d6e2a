use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{empty_as_none, lower_date_bound, upper_date_bound};
use crate::filter::{Filter, matches_date_range, matches_eq, matches_search};
use crate::models::{Entity, Goal, GoalPriority, GoalStatus, GoalType};

/// Request payload for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub user_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub goal_type: GoalType,

    #[validate(range(min = 0.0, message = "Target value cannot be negative"))]
    pub target_value: f64,

    #[validate(range(min = 0.0, message = "Current value cannot be negative"))]
    #[serde(default)]
    pub current_value: f64,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1 and 20 characters"))]
    pub unit: String,

    pub target_date: DateTime<Utc>,

    #[serde(default)]
    pub status: GoalStatus,

    #[serde(default)]
    pub priority: GoalPriority,

    #[serde(default)]
    pub is_public: bool,
}

impl CreateGoalRequest {
    pub fn into_model(self, now: DateTime<Utc>) -> Goal {
        let mut goal = Goal {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            goal_type: self.goal_type,
            target_value: self.target_value,
            current_value: self.current_value,
            unit: self.unit,
            target_date: self.target_date,
            status: self.status,
            priority: self.priority,
            is_public: self.is_public,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        goal.finalize_completion(now);
        goal
    }
}

/// Request payload for updating a goal
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub user_id: Option<Uuid>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,

    #[validate(range(min = 0.0, message = "Target value cannot be negative"))]
    pub target_value: Option<f64>,

    #[validate(range(min = 0.0, message = "Current value cannot be negative"))]
    pub current_value: Option<f64>,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1 and 20 characters"))]
    pub unit: Option<String>,

    pub target_date: Option<DateTime<Utc>>,

    pub status: Option<GoalStatus>,

    pub priority: Option<GoalPriority>,

    pub is_public: Option<bool>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl UpdateGoalRequest {
    pub fn apply_to(self, goal: &mut Goal, now: DateTime<Utc>) {
        let was_completed = goal.status == GoalStatus::Completed;
        let explicit_completed_at = self.completed_at.is_some();

        if let Some(user_id) = self.user_id {
            goal.user_id = user_id;
        }
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = Some(description);
        }
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(target_value) = self.target_value {
            goal.target_value = target_value;
        }
        if let Some(current_value) = self.current_value {
            goal.current_value = current_value;
        }
        if let Some(unit) = self.unit {
            goal.unit = unit;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(is_public) = self.is_public {
            goal.is_public = is_public;
        }
        if let Some(completed_at) = self.completed_at {
            goal.completed_at = Some(completed_at);
        }
        if was_completed && goal.status != GoalStatus::Completed && !explicit_completed_at {
            goal.completed_at = None;
        }
        goal.finalize_completion(now);
        goal.touch(now);
    }
}

/// Query parameters for listing goals
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GoalFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<Uuid>,
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub goal_type: Option<GoalType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<GoalStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub priority: Option<GoalPriority>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_public: Option<bool>,
    /// Earliest `targetDate` (inclusive)
    #[serde(default, deserialize_with = "lower_date_bound")]
    pub date_from: Option<DateTime<Utc>>,
    /// Latest `targetDate` (inclusive)
    #[serde(default, deserialize_with = "upper_date_bound")]
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive match against title and description
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

impl Filter<Goal> for GoalFilter {
    fn matches(&self, goal: &Goal) -> bool {
        matches_eq(self.user_id.as_ref(), &goal.user_id)
            && matches_eq(self.goal_type.as_ref(), &goal.goal_type)
            && matches_eq(self.status.as_ref(), &goal.status)
            && matches_eq(self.priority.as_ref(), &goal.priority)
            && matches_eq(self.is_public.as_ref(), &goal.is_public)
            && matches_date_range(goal.target_date, self.date_from, self.date_to)
            && matches_search(
                self.search.as_deref(),
                [Some(goal.title.as_str()), goal.description.as_deref()],
            )
    }
}
