use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{empty_as_none, lower_date_bound, upper_date_bound};
use crate::models::PersonalRecord;

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub user_id: Uuid,
    /// Earliest `startedAt` (inclusive)
    #[serde(default, deserialize_with = "lower_date_bound")]
    pub date_from: Option<DateTime<Utc>>,
    /// Latest `startedAt` (inclusive)
    #[serde(default, deserialize_with = "upper_date_bound")]
    pub date_to: Option<DateTime<Utc>>,
    /// Restricts exercise analytics to one exercise (case-insensitive)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub exercise_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub completed_workouts: usize,
    pub in_progress_workouts: usize,
    pub cancelled_workouts: usize,
    /// Minutes, summed over workouts with a known duration
    pub total_duration: i64,
    pub average_duration: f64,
    pub total_sets: usize,
    pub total_reps: i64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume: f64,
    pub workout_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeProgression {
    pub points: Vec<VolumePoint>,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub weekday: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyStats {
    pub total_workouts: usize,
    pub active_days: usize,
    pub workouts_per_week: f64,
    pub by_weekday: Vec<WeekdayCount>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAnalytics {
    pub exercise_name: String,
    pub sessions: usize,
    pub total_sets: usize,
    pub total_reps: i64,
    pub total_volume: f64,
    pub max_weight: Option<f64>,
    pub last_performed: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub title: String,
    pub progress: f64,
    pub target_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub workout_stats: WorkoutStats,
    pub workouts_this_week: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub goal_completion_rate: f64,
    pub active_goal_progress: Vec<GoalProgress>,
    pub recent_records: Vec<PersonalRecord>,
    pub current_streak: u32,
}
