use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{empty_as_none, lower_date_bound, upper_date_bound};
use crate::filter::{Filter, matches_date_range, matches_eq, matches_search};
use crate::models::{Entity, PersonalRecord, RecordType};

/// Request payload for recording a personal best
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonalRecordRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Exercise id is required"))]
    pub exercise_id: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Exercise name must be between 1 and 100 characters"
    ))]
    pub exercise_name: String,

    pub record_type: RecordType,

    #[validate(range(min = 0.0, message = "Value cannot be negative"))]
    pub value: f64,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1 and 20 characters"))]
    pub unit: String,

    #[validate(range(min = 0.0, message = "Previous record cannot be negative"))]
    #[serde(default)]
    pub previous_record: Option<f64>,

    #[serde(default)]
    pub improvement: Option<f64>,

    pub workout_id: Uuid,

    pub workout_date: DateTime<Utc>,

    #[validate(length(max = 500))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreatePersonalRecordRequest {
    /// Builds the record, filling `previousRecord`/`improvement` from
    /// `best_previous` when the caller left them out.
    pub fn into_model(self, now: DateTime<Utc>, best_previous: Option<f64>) -> PersonalRecord {
        let previous_record = self.previous_record.or(best_previous);
        let improvement = self.improvement.or_else(|| {
            previous_record.map(|previous| self.record_type.improvement(previous, self.value))
        });

        PersonalRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            exercise_id: self.exercise_id,
            exercise_name: self.exercise_name,
            record_type: self.record_type,
            value: self.value,
            unit: self.unit,
            previous_record,
            improvement,
            workout_id: self.workout_id,
            workout_date: self.workout_date,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request payload for correcting a personal record
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonalRecordRequest {
    pub user_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Exercise id is required"))]
    pub exercise_id: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Exercise name must be between 1 and 100 characters"
    ))]
    pub exercise_name: Option<String>,

    pub record_type: Option<RecordType>,

    #[validate(range(min = 0.0, message = "Value cannot be negative"))]
    pub value: Option<f64>,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1 and 20 characters"))]
    pub unit: Option<String>,

    #[validate(range(min = 0.0, message = "Previous record cannot be negative"))]
    pub previous_record: Option<f64>,

    pub improvement: Option<f64>,

    pub workout_id: Option<Uuid>,

    pub workout_date: Option<DateTime<Utc>>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl UpdatePersonalRecordRequest {
    /// Merges the provided fields. A new value, type or previous record
    /// recomputes `improvement` unless one is sent.
    pub fn apply_to(self, record: &mut PersonalRecord, now: DateTime<Utc>) {
        let remeasured =
            self.value.is_some() || self.record_type.is_some() || self.previous_record.is_some();
        let explicit_improvement = self.improvement.is_some();

        if let Some(user_id) = self.user_id {
            record.user_id = user_id;
        }
        if let Some(exercise_id) = self.exercise_id {
            record.exercise_id = exercise_id;
        }
        if let Some(exercise_name) = self.exercise_name {
            record.exercise_name = exercise_name;
        }
        if let Some(record_type) = self.record_type {
            record.record_type = record_type;
        }
        if let Some(value) = self.value {
            record.value = value;
        }
        if let Some(unit) = self.unit {
            record.unit = unit;
        }
        if let Some(previous_record) = self.previous_record {
            record.previous_record = Some(previous_record);
        }
        if let Some(improvement) = self.improvement {
            record.improvement = Some(improvement);
        }
        if let Some(workout_id) = self.workout_id {
            record.workout_id = workout_id;
        }
        if let Some(workout_date) = self.workout_date {
            record.workout_date = workout_date;
        }
        if let Some(notes) = self.notes {
            record.notes = Some(notes);
        }
        if remeasured && !explicit_improvement {
            if let Some(previous) = record.previous_record {
                record.improvement = Some(record.record_type.improvement(previous, record.value));
            }
        }
        record.touch(now);
    }
}

/// Query parameters for listing personal records
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PersonalRecordFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub exercise_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub record_type: Option<RecordType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub workout_id: Option<Uuid>,
    /// Earliest `workoutDate` (inclusive)
    #[serde(default, deserialize_with = "lower_date_bound")]
    pub date_from: Option<DateTime<Utc>>,
    /// Latest `workoutDate` (inclusive)
    #[serde(default, deserialize_with = "upper_date_bound")]
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive match against exercise name and notes
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

impl Filter<PersonalRecord> for PersonalRecordFilter {
    fn matches(&self, record: &PersonalRecord) -> bool {
        matches_eq(self.user_id.as_ref(), &record.user_id)
            && matches_eq(self.exercise_id.as_ref(), &record.exercise_id)
            && matches_eq(self.record_type.as_ref(), &record.record_type)
            && matches_eq(self.workout_id.as_ref(), &record.workout_id)
            && matches_date_range(record.workout_date, self.date_from, self.date_to)
            && matches_search(
                self.search.as_deref(),
                [Some(record.exercise_name.as_str()), record.notes.as_deref()],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: f64) -> CreatePersonalRecordRequest {
        serde_json::from_value(json!({
            "userId": Uuid::new_v4(),
            "exerciseId": "deadlift",
            "exerciseName": "Deadlift",
            "recordType": "max_weight",
            "value": value,
            "unit": "kg",
            "workoutId": Uuid::new_v4(),
            "workoutDate": "2024-06-01T18:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_history_fills_previous_and_improvement() {
        let record = request(180.0).into_model(Utc::now(), Some(170.0));
        assert_eq!(record.previous_record, Some(170.0));
        assert_eq!(record.improvement, Some(10.0));
    }

    #[test]
    fn test_explicit_previous_wins_over_history() {
        let mut req = request(180.0);
        req.previous_record = Some(175.0);

        let record = req.into_model(Utc::now(), Some(170.0));
        assert_eq!(record.previous_record, Some(175.0));
        assert_eq!(record.improvement, Some(5.0));
    }

    #[test]
    fn test_first_record_has_no_improvement() {
        let record = request(100.0).into_model(Utc::now(), None);
        assert!(record.previous_record.is_none());
        assert!(record.improvement.is_none());
    }

    #[test]
    fn test_corrected_value_recomputes_improvement() {
        let mut record = request(180.0).into_model(Utc::now(), Some(170.0));

        UpdatePersonalRecordRequest {
            value: Some(185.0),
            ..Default::default()
        }
        .apply_to(&mut record, Utc::now());
        assert_eq!(record.improvement, Some(15.0));

        UpdatePersonalRecordRequest {
            value: Some(190.0),
            improvement: Some(1.0),
            ..Default::default()
        }
        .apply_to(&mut record, Utc::now());
        assert_eq!(record.improvement, Some(1.0));
    }

    #[test]
    fn test_filter_by_exercise_and_type() {
        let record = request(100.0).into_model(Utc::now(), None);

        let filter = PersonalRecordFilter {
            exercise_id: Some("deadlift".to_string()),
            record_type: Some(RecordType::MaxWeight),
            search: Some("dead".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&record));

        let filter = PersonalRecordFilter {
            record_type: Some(RecordType::MaxReps),
            ..Default::default()
        };
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_negative_value_is_rejected() {
        assert!(request(-1.0).validate().is_err());
    }
}
