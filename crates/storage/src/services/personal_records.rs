use chrono::{DateTime, Utc};

use crate::dto::personal_record::CreatePersonalRecordRequest;
use crate::error::Result;
use crate::models::{PersonalRecord, best_previous_record};
use crate::repository::EntityStore;

/// Stores a new personal record, deriving `previousRecord` and
/// `improvement` from the user's best existing value when they are omitted.
pub async fn create_with_history(
    store: &dyn EntityStore<PersonalRecord>,
    request: CreatePersonalRecordRequest,
    now: DateTime<Utc>,
) -> Result<PersonalRecord> {
    let best_previous = if request.previous_record.is_some() {
        None
    } else {
        let existing = store.list().await?;
        best_previous_record(
            &existing,
            request.user_id,
            &request.exercise_id,
            request.record_type,
        )
    };

    tracing::debug!(
        exercise_id = %request.exercise_id,
        record_type = %request.record_type,
        ?best_previous,
        "Creating personal record"
    );

    store.insert(request.into_model(now, best_previous)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordType;
    use crate::repository::MemoryStore;
    use serde_json::json;
    use uuid::Uuid;

    fn request(user_id: Uuid, record_type: &str, value: f64) -> CreatePersonalRecordRequest {
        serde_json::from_value(json!({
            "userId": user_id,
            "exerciseId": "5k",
            "exerciseName": "5k run",
            "recordType": record_type,
            "value": value,
            "unit": "s",
            "workoutId": Uuid::new_v4(),
            "workoutDate": "2024-07-01T07:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_first_record_has_no_history() {
        let store: MemoryStore<PersonalRecord> = MemoryStore::new();
        let req = request(Uuid::new_v4(), "max_duration", 1500.0);
        let record = create_with_history(&store, req, Utc::now()).await.unwrap();

        assert!(record.previous_record.is_none());
        assert!(record.improvement.is_none());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_best_time_uses_fastest_previous() {
        let store: MemoryStore<PersonalRecord> = MemoryStore::new();
        let user_id = Uuid::new_v4();
        for value in [1500.0, 1420.0, 1480.0] {
            create_with_history(&store, request(user_id, "best_time", value), Utc::now())
                .await
                .unwrap();
        }

        let record = create_with_history(&store, request(user_id, "best_time", 1400.0), Utc::now())
            .await
            .unwrap();

        assert_eq!(record.record_type, RecordType::BestTime);
        assert_eq!(record.previous_record, Some(1420.0));
        assert_eq!(record.improvement, Some(20.0));
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_user() {
        let store: MemoryStore<PersonalRecord> = MemoryStore::new();
        create_with_history(&store, request(Uuid::new_v4(), "max_duration", 1500.0), Utc::now())
            .await
            .unwrap();

        let req = request(Uuid::new_v4(), "max_duration", 1600.0);
        let record = create_with_history(&store, req, Utc::now()).await.unwrap();

        assert!(record.previous_record.is_none());
    }
}
