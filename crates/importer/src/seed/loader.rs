use chrono::{DateTime, Utc};
use storage::repository::MemoryStore;
use storage::{BatchWriter, EntityBatch, Stores};
use storage::services::personal_records::create_with_history;
use tracing::{debug, info};

use super::models::SeedDocument;
use crate::Result;

/// Counts of entities written by a seed import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub workout_plans: usize,
    pub workouts: usize,
    pub goals: usize,
    pub personal_records: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.workout_plans + self.workouts + self.goals + self.personal_records
    }
}

/// Stages a validated seed document and writes it as one batch.
pub struct SeedLoader<'a> {
    stores: &'a Stores,
    writer: &'a dyn BatchWriter,
}

impl<'a> SeedLoader<'a> {
    /// `stores` supplies existing personal records for history linking;
    /// `writer` persists the staged batch.
    pub fn new(stores: &'a Stores, writer: &'a dyn BatchWriter) -> Self {
        Self { stores, writer }
    }

    /// Builds every entry in document order, then writes them all or none.
    /// Personal records are linked to earlier bests, including ones from
    /// this file.
    pub async fn load(&self, seed: SeedDocument, now: DateTime<Utc>) -> Result<ImportSummary> {
        let mut batch = EntityBatch::default();

        info!("Staging {} workout plan(s)...", seed.workout_plans.len());
        for request in seed.workout_plans {
            let plan = request.into_model(now);
            debug!(id = %plan.id, "Staged workout plan '{}'", plan.name);
            batch.workout_plans.push(plan);
        }

        info!("Staging {} workout(s)...", seed.workouts.len());
        for request in seed.workouts {
            let workout = request.into_model(now);
            debug!(id = %workout.id, "Staged workout '{}'", workout.name);
            batch.workouts.push(workout);
        }

        info!("Staging {} goal(s)...", seed.goals.len());
        for request in seed.goals {
            let goal = request.into_model(now);
            debug!(id = %goal.id, "Staged goal '{}'", goal.title);
            batch.goals.push(goal);
        }

        info!("Staging {} personal record(s)...", seed.personal_records.len());
        let history = MemoryStore::with_items(self.stores.personal_records.list().await?);
        for request in seed.personal_records {
            let record = create_with_history(&history, request, now).await?;
            debug!(id = %record.id, "Staged personal record for '{}'", record.exercise_name);
            batch.personal_records.push(record);
        }

        info!("Writing {} entities...", batch.len());
        self.writer.write_batch(&batch).await?;

        Ok(ImportSummary {
            workout_plans: batch.workout_plans.len(),
            workouts: batch.workouts.len(),
            goals: batch.goals.len(),
            personal_records: batch.personal_records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use storage::models::PersonalRecord;
    use storage::{EntityStore, StorageError};
    use uuid::Uuid;

    struct RejectingRecords;

    #[async_trait]
    impl EntityStore<PersonalRecord> for RejectingRecords {
        async fn list(&self) -> storage::Result<Vec<PersonalRecord>> {
            Ok(Vec::new())
        }

        async fn find(&self, _id: Uuid) -> storage::Result<PersonalRecord> {
            Err(StorageError::NotFound("Personal record"))
        }

        async fn insert(&self, _record: PersonalRecord) -> storage::Result<PersonalRecord> {
            Err(StorageError::ConstraintViolation("duplicate record".to_string()))
        }

        async fn replace(&self, _record: PersonalRecord) -> storage::Result<PersonalRecord> {
            Err(StorageError::NotFound("Personal record"))
        }

        async fn remove(&self, _id: Uuid) -> storage::Result<PersonalRecord> {
            Err(StorageError::NotFound("Personal record"))
        }
    }

    fn seed(user_id: Uuid) -> SeedDocument {
        let record = |value: f64| {
            json!({
                "userId": user_id,
                "exerciseId": "squat",
                "exerciseName": "Back Squat",
                "recordType": "max_weight",
                "value": value,
                "unit": "kg",
                "workoutId": Uuid::new_v4(),
                "workoutDate": "2024-05-01T10:00:00Z"
            })
        };

        serde_json::from_value(json!({
            "formatVersion": "1.0.0",
            "workouts": [{
                "userId": user_id,
                "name": "Squat session",
                "exercises": [{
                    "exerciseId": "squat",
                    "name": "Back Squat",
                    "sets": [{ "setNumber": 1, "reps": 5, "weight": 120.0, "completed": true }]
                }],
                "status": "completed",
                "startedAt": "2024-05-01T09:00:00Z",
                "completedAt": "2024-05-01T10:00:00Z"
            }],
            "personalRecords": [record(120.0), record(125.0)]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_into_memory_stores() {
        let stores = Stores::in_memory();
        let user_id = Uuid::new_v4();

        let summary = SeedLoader::new(&stores, &stores)
            .load(seed(user_id), Utc::now())
            .await
            .unwrap();

        assert_eq!(summary.workouts, 1);
        assert_eq!(summary.personal_records, 2);
        assert_eq!(summary.total(), 3);

        let workouts = stores.workouts.list().await.unwrap();
        assert_eq!(workouts[0].duration, Some(60));

        let records = stores.personal_records.list().await.unwrap();
        assert_eq!(records[0].previous_record, None);
        assert_eq!(records[1].previous_record, Some(120.0));
        assert_eq!(records[1].improvement, Some(5.0));
    }

    #[tokio::test]
    async fn test_failed_import_writes_nothing() {
        let mut stores = Stores::in_memory();
        stores.personal_records = Arc::new(RejectingRecords);

        let result = SeedLoader::new(&stores, &stores)
            .load(seed(Uuid::new_v4()), Utc::now())
            .await;

        assert!(result.is_err());
        assert!(stores.workouts.list().await.unwrap().is_empty());
    }
}
