use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use super::goal::insert_goal;
use super::personal_record::insert_personal_record;
use super::workout::insert_workout;
use super::workout_plan::insert_workout_plan;
use super::{EntityStore, Stores};
use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{Entity, Goal, PersonalRecord, Workout, WorkoutPlan};

/// Entities that are written together or not at all.
#[derive(Debug, Default, Clone)]
pub struct EntityBatch {
    pub workout_plans: Vec<WorkoutPlan>,
    pub workouts: Vec<Workout>,
    pub goals: Vec<Goal>,
    pub personal_records: Vec<PersonalRecord>,
}

impl EntityBatch {
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

/// All-or-nothing insertion of an [`EntityBatch`].
#[async_trait]
pub trait BatchWriter: Send + Sync {
    async fn write_batch(&self, batch: &EntityBatch) -> Result<()>;
}

#[async_trait]
impl BatchWriter for Database {
    async fn write_batch(&self, batch: &EntityBatch) -> Result<()> {
        let mut tx = self.pool().begin().await?;

        for plan in &batch.workout_plans {
            insert_workout_plan(&mut *tx, plan).await?;
        }
        for workout in &batch.workouts {
            insert_workout(&mut *tx, workout).await?;
        }
        for goal in &batch.goals {
            insert_goal(&mut *tx, goal).await?;
        }
        for record in &batch.personal_records {
            insert_personal_record(&mut *tx, record).await?;
        }

        tx.commit().await?;
        info!("Committed batch of {} entities", batch.len());
        Ok(())
    }
}

/// Inserts through the entity stores and removes what was written if any
/// insert fails.
#[async_trait]
impl BatchWriter for Stores {
    async fn write_batch(&self, batch: &EntityBatch) -> Result<()> {
        let mut plans = Vec::new();
        let mut workouts = Vec::new();
        let mut goals = Vec::new();
        let mut records = Vec::new();

        let result = async {
            insert_all(self.workout_plans.as_ref(), &batch.workout_plans, &mut plans).await?;
            insert_all(self.workouts.as_ref(), &batch.workouts, &mut workouts).await?;
            insert_all(self.goals.as_ref(), &batch.goals, &mut goals).await?;
            insert_all(self.personal_records.as_ref(), &batch.personal_records, &mut records)
                .await?;
            Ok::<(), StorageError>(())
        }
        .await;

        if let Err(error) = result {
            warn!("Batch write failed, rolling back: {}", error);
            remove_all(self.personal_records.as_ref(), &records).await;
            remove_all(self.goals.as_ref(), &goals).await;
            remove_all(self.workouts.as_ref(), &workouts).await;
            remove_all(self.workout_plans.as_ref(), &plans).await;
            return Err(error);
        }

        Ok(())
    }
}

async fn insert_all<E: Entity>(
    store: &dyn EntityStore<E>,
    items: &[E],
    written: &mut Vec<Uuid>,
) -> Result<()> {
    for item in items {
        store.insert(item.clone()).await?;
        written.push(item.id());
    }
    Ok(())
}

async fn remove_all<E: Entity>(store: &dyn EntityStore<E>, written: &[Uuid]) {
    for id in written.iter().rev() {
        if let Err(error) = store.remove(*id).await {
            warn!(entity = E::NAME, %id, "Failed to roll back insert: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalPriority, GoalStatus, GoalType, WorkoutStatus};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    struct RejectingStore;

    #[async_trait]
    impl<E: Entity> EntityStore<E> for RejectingStore {
        async fn list(&self) -> Result<Vec<E>> {
            Ok(Vec::new())
        }

        async fn find(&self, _id: Uuid) -> Result<E> {
            Err(StorageError::NotFound(E::NAME))
        }

        async fn insert(&self, _entity: E) -> Result<E> {
            Err(StorageError::ConstraintViolation("rejected".to_string()))
        }

        async fn replace(&self, _entity: E) -> Result<E> {
            Err(StorageError::NotFound(E::NAME))
        }

        async fn remove(&self, _id: Uuid) -> Result<E> {
            Err(StorageError::NotFound(E::NAME))
        }
    }

    fn workout() -> Workout {
        let now = Utc::now();
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: None,
            plan_name: None,
            name: "Easy run".to_string(),
            exercises: Vec::new(),
            status: WorkoutStatus::InProgress,
            started_at: now,
            completed_at: None,
            duration: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn goal() -> Goal {
        let now = Utc::now();
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Run 100km".to_string(),
            description: None,
            goal_type: GoalType::Endurance,
            target_value: 100.0,
            current_value: 0.0,
            unit: "km".to_string(),
            target_date: now + Duration::days(30),
            status: GoalStatus::Active,
            priority: GoalPriority::Medium,
            is_public: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn batch() -> EntityBatch {
        EntityBatch {
            workouts: vec![workout(), workout()],
            goals: vec![goal()],
            ..EntityBatch::default()
        }
    }

    #[tokio::test]
    async fn test_memory_batch_writes_every_entity() {
        let stores = Stores::in_memory();

        stores.write_batch(&batch()).await.unwrap();

        assert_eq!(stores.workouts.list().await.unwrap().len(), 2);
        assert_eq!(stores.goals.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_memory_batch_leaves_nothing_behind() {
        let mut stores = Stores::in_memory();
        stores.goals = Arc::new(RejectingStore);

        let err = stores.write_batch(&batch()).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
        assert!(stores.workouts.list().await.unwrap().is_empty());
        assert!(stores.workout_plans.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_batch_len_counts_all_sections() {
        assert_eq!(batch().len(), 3);
        assert!(EntityBatch::default().is_empty());
    }
}
