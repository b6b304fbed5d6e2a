use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

string_enum! {
    pub enum RecordType {
        MaxWeight => "max_weight",
        MaxReps => "max_reps",
        MaxVolume => "max_volume",
        MaxDuration => "max_duration",
        BestTime => "best_time",
    }
}

impl RecordType {
    /// Whether a smaller value beats a larger one.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Self::BestTime)
    }

    /// Signed gain of `value` over `previous`, positive when it is better.
    pub fn improvement(&self, previous: f64, value: f64) -> f64 {
        if self.lower_is_better() {
            previous - value
        } else {
            value - previous
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_id: String,
    pub exercise_name: String,
    pub record_type: RecordType,
    pub value: f64,
    pub unit: String,
    pub previous_record: Option<f64>,
    pub improvement: Option<f64>,
    pub workout_id: Uuid,
    pub workout_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Best existing value for the same user, exercise and record type.
pub fn best_previous_record<'a>(
    records: impl IntoIterator<Item = &'a PersonalRecord>,
    user_id: Uuid,
    exercise_id: &str,
    record_type: RecordType,
) -> Option<f64> {
    records
        .into_iter()
        .filter(|r| {
            r.user_id == user_id && r.exercise_id == exercise_id && r.record_type == record_type
        })
        .map(|r| r.value)
        .reduce(|best, value| {
            let better = if record_type.lower_is_better() {
                value < best
            } else {
                value > best
            };
            if better { value } else { best }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        user_id: Uuid,
        exercise_id: &str,
        record_type: RecordType,
        value: f64,
    ) -> PersonalRecord {
        let now = Utc::now();
        PersonalRecord {
            id: Uuid::new_v4(),
            user_id,
            exercise_id: exercise_id.to_string(),
            exercise_name: exercise_id.to_string(),
            record_type,
            value,
            unit: "kg".to_string(),
            previous_record: None,
            improvement: None,
            workout_id: Uuid::new_v4(),
            workout_date: now,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_best_previous_picks_maximum() {
        let user = Uuid::new_v4();
        let records = vec![
            record(user, "squat", RecordType::MaxWeight, 100.0),
            record(user, "squat", RecordType::MaxWeight, 120.0),
            record(user, "squat", RecordType::MaxReps, 300.0),
            record(Uuid::new_v4(), "squat", RecordType::MaxWeight, 200.0),
        ];

        let best = best_previous_record(&records, user, "squat", RecordType::MaxWeight);
        assert_eq!(best, Some(120.0));
    }

    #[test]
    fn test_best_previous_time_picks_minimum() {
        let user = Uuid::new_v4();
        let records = vec![
            record(user, "5k", RecordType::BestTime, 1500.0),
            record(user, "5k", RecordType::BestTime, 1420.0),
        ];

        let best = best_previous_record(&records, user, "5k", RecordType::BestTime);
        assert_eq!(best, Some(1420.0));
        assert_eq!(RecordType::BestTime.improvement(1420.0, 1400.0), 20.0);
    }

    #[test]
    fn test_best_previous_none_without_history() {
        let records: Vec<PersonalRecord> = Vec::new();
        assert_eq!(
            best_previous_record(&records, Uuid::new_v4(), "deadlift", RecordType::MaxWeight),
            None
        );
    }
}
