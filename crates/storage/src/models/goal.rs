use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

string_enum! {
    pub enum GoalType {
        WeightLoss => "weight_loss",
        MuscleGain => "muscle_gain",
        Strength => "strength",
        Endurance => "endurance",
        Flexibility => "flexibility",
        Consistency => "consistency",
        Custom => "custom",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum GoalStatus {
        #[default]
        Active => "active",
        Completed => "completed",
        Paused => "paused",
        Cancelled => "cancelled",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum GoalPriority {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub target_date: DateTime<Utc>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub is_public: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Percentage of the target reached, clamped to 0..=100.
    pub fn progress(&self) -> f64 {
        if self.target_value <= 0.0 {
            return 100.0;
        }
        (self.current_value / self.target_value * 100.0).clamp(0.0, 100.0)
    }

    /// Stamps `completed_at` once the goal is marked completed.
    pub fn finalize_completion(&mut self, now: DateTime<Utc>) {
        if self.status == GoalStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: f64, target: f64) -> Goal {
        let now = Utc::now();
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Bench bodyweight".to_string(),
            description: None,
            goal_type: GoalType::Strength,
            target_value: target,
            current_value: current,
            unit: "kg".to_string(),
            target_date: now,
            status: GoalStatus::Active,
            priority: GoalPriority::High,
            is_public: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_progress_is_percentage_of_target() {
        assert_eq!(goal(25.0, 100.0).progress(), 25.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(goal(150.0, 100.0).progress(), 100.0);
        assert_eq!(goal(3.0, 0.0).progress(), 100.0);
    }

    #[test]
    fn test_completion_stamp() {
        let mut g = goal(100.0, 100.0);
        let now = Utc::now();

        g.finalize_completion(now);
        assert!(g.completed_at.is_none());

        g.status = GoalStatus::Completed;
        g.finalize_completion(now);
        assert_eq!(g.completed_at, Some(now));
    }
}
