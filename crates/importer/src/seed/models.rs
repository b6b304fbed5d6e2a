use serde::{Deserialize, Serialize};
use storage::dto::{
    goal::CreateGoalRequest, personal_record::CreatePersonalRecordRequest,
    workout::CreateWorkoutRequest, workout_plan::CreateWorkoutPlanRequest,
};

pub const FORMAT_VERSION: &str = "1.0.0";

/// A JSON document of entities to seed into a store.
///
/// Entries use the same payload shape as the REST create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDocument {
    pub format_version: String,
    #[serde(default)]
    pub workout_plans: Vec<CreateWorkoutPlanRequest>,
    #[serde(default)]
    pub workouts: Vec<CreateWorkoutRequest>,
    #[serde(default)]
    pub goals: Vec<CreateGoalRequest>,
    #[serde(default)]
    pub personal_records: Vec<CreatePersonalRecordRequest>,
}

impl SeedDocument {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.workout_plans.len()
            + self.workouts.len()
            + self.goals.len()
            + self.personal_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
