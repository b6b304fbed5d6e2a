use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool, types::Json};
use uuid::Uuid;

use super::{EntityStore, insert_error};
use crate::error::{Result, StorageError};
use crate::models::{Entity, Workout, WorkoutExercise};

macro_rules! columns {
    () => {
        "id, user_id, plan_id, plan_name, name, exercises, status, started_at, \
         completed_at, duration, notes, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct WorkoutRow {
    id: Uuid,
    user_id: Uuid,
    plan_id: Option<Uuid>,
    plan_name: Option<String>,
    name: String,
    exercises: Json<Vec<WorkoutExercise>>,
    status: String,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    duration: Option<i32>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = StorageError;

    fn try_from(row: WorkoutRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            plan_id: row.plan_id,
            plan_name: row.plan_name,
            name: row.name,
            exercises: row.exercises.0,
            status: row.status.parse()?,
            started_at: row.started_at,
            completed_at: row.completed_at,
            duration: row.duration,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct WorkoutRepository {
    pool: PgPool,
}

impl WorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Workout> for WorkoutRepository {
    async fn list(&self) -> Result<Vec<Workout>> {
        sqlx::query_as::<_, WorkoutRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM workouts ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Workout::try_from)
        .collect()
    }

    async fn find(&self, id: Uuid) -> Result<Workout> {
        sqlx::query_as::<_, WorkoutRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM workouts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(Workout::NAME))?
        .try_into()
    }

    async fn insert(&self, workout: Workout) -> Result<Workout> {
        insert_workout(&self.pool, &workout).await?;
        Ok(workout)
    }

    async fn replace(&self, workout: Workout) -> Result<Workout> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET user_id = $2,
                plan_id = $3,
                plan_name = $4,
                name = $5,
                exercises = $6,
                status = $7,
                started_at = $8,
                completed_at = $9,
                duration = $10,
                notes = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(workout.plan_id)
        .bind(&workout.plan_name)
        .bind(&workout.name)
        .bind(Json(&workout.exercises))
        .bind(workout.status.as_str())
        .bind(workout.started_at)
        .bind(workout.completed_at)
        .bind(workout.duration)
        .bind(&workout.notes)
        .bind(workout.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(Workout::NAME));
        }

        Ok(workout)
    }

    async fn remove(&self, id: Uuid) -> Result<Workout> {
        sqlx::query_as::<_, WorkoutRow>(concat!(
            "DELETE FROM workouts WHERE id = $1 RETURNING ",
            columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(Workout::NAME))?
        .try_into()
    }
}

/// INSERT on any executor, the pool or an open transaction.
pub(super) async fn insert_workout<'e>(
    executor: impl PgExecutor<'e>,
    workout: &Workout,
) -> Result<()> {
    sqlx::query(concat!(
        "INSERT INTO workouts (",
        columns!(),
        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
    ))
    .bind(workout.id)
    .bind(workout.user_id)
    .bind(workout.plan_id)
    .bind(&workout.plan_name)
    .bind(&workout.name)
    .bind(Json(&workout.exercises))
    .bind(workout.status.as_str())
    .bind(workout.started_at)
    .bind(workout.completed_at)
    .bind(workout.duration)
    .bind(&workout.notes)
    .bind(workout.created_at)
    .bind(workout.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error::<Workout>(e, workout.id))?;

    Ok(())
}
