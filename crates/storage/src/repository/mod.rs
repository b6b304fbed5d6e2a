use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{Entity, Goal, PersonalRecord, Workout, WorkoutPlan};

mod batch;
mod goal;
mod memory;
mod personal_record;
mod workout;
mod workout_plan;

pub use batch::{BatchWriter, EntityBatch};
pub use goal::GoalRepository;
pub use memory::MemoryStore;
pub use personal_record::PersonalRecordRepository;
pub use workout::WorkoutRepository;
pub use workout_plan::WorkoutPlanRepository;

/// Ordered, id-addressed persistence for one entity type.
///
/// Implementations keep creation order in `list`. Id uniqueness is assigned
/// by the caller at creation time and is not re-checked by every backend.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    async fn find(&self, id: Uuid) -> Result<E>;

    async fn insert(&self, entity: E) -> Result<E>;

    /// Overwrites the stored entity with the same id.
    async fn replace(&self, entity: E) -> Result<E>;

    /// Removes and returns the entity.
    async fn remove(&self, id: Uuid) -> Result<E>;
}

/// The store for every entity collection, shared across handlers.
#[derive(Clone)]
pub struct Stores {
    pub workout_plans: Arc<dyn EntityStore<WorkoutPlan>>,
    pub workouts: Arc<dyn EntityStore<Workout>>,
    pub goals: Arc<dyn EntityStore<Goal>>,
    pub personal_records: Arc<dyn EntityStore<PersonalRecord>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            workout_plans: Arc::new(MemoryStore::new()),
            workouts: Arc::new(MemoryStore::new()),
            goals: Arc::new(MemoryStore::new()),
            personal_records: Arc::new(MemoryStore::new()),
        }
    }

    pub fn postgres(db: &Database) -> Self {
        let pool = db.pool().clone();
        Self {
            workout_plans: Arc::new(WorkoutPlanRepository::new(pool.clone())),
            workouts: Arc::new(WorkoutRepository::new(pool.clone())),
            goals: Arc::new(GoalRepository::new(pool.clone())),
            personal_records: Arc::new(PersonalRecordRepository::new(pool)),
        }
    }
}

/// Maps a failed INSERT, turning primary key clashes into constraint violations.
fn insert_error<E: Entity>(error: sqlx::Error, id: Uuid) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() {
        StorageError::ConstraintViolation(format!("{} {} already exists", E::NAME, id))
    } else {
        error
    }
}
