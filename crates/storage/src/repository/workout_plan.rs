use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool, types::Json};
use uuid::Uuid;

use super::{EntityStore, insert_error};
use crate::error::{Result, StorageError};
use crate::models::{Entity, PlanExercise, WorkoutPlan};

macro_rules! columns {
    () => {
        "id, name, description, exercises, duration, difficulty, category, \
         is_public, created_by, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct WorkoutPlanRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    exercises: Json<Vec<PlanExercise>>,
    duration: i32,
    difficulty: String,
    category: String,
    is_public: bool,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkoutPlanRow> for WorkoutPlan {
    type Error = StorageError;

    fn try_from(row: WorkoutPlanRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            exercises: row.exercises.0,
            duration: row.duration,
            difficulty: row.difficulty.parse()?,
            category: row.category.parse()?,
            is_public: row.is_public,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct WorkoutPlanRepository {
    pool: PgPool,
}

impl WorkoutPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<WorkoutPlan> for WorkoutPlanRepository {
    /// List all workout plans in creation order
    async fn list(&self) -> Result<Vec<WorkoutPlan>> {
        sqlx::query_as::<_, WorkoutPlanRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM workout_plans ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(WorkoutPlan::try_from)
        .collect()
    }

    async fn find(&self, id: Uuid) -> Result<WorkoutPlan> {
        sqlx::query_as::<_, WorkoutPlanRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM workout_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(WorkoutPlan::NAME))?
        .try_into()
    }

    async fn insert(&self, plan: WorkoutPlan) -> Result<WorkoutPlan> {
        insert_workout_plan(&self.pool, &plan).await?;
        Ok(plan)
    }

    async fn replace(&self, plan: WorkoutPlan) -> Result<WorkoutPlan> {
        let result = sqlx::query(
            r#"
            UPDATE workout_plans
            SET name = $2,
                description = $3,
                exercises = $4,
                duration = $5,
                difficulty = $6,
                category = $7,
                is_public = $8,
                created_by = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(Json(&plan.exercises))
        .bind(plan.duration)
        .bind(plan.difficulty.as_str())
        .bind(plan.category.as_str())
        .bind(plan.is_public)
        .bind(plan.created_by)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(WorkoutPlan::NAME));
        }

        Ok(plan)
    }

    async fn remove(&self, id: Uuid) -> Result<WorkoutPlan> {
        sqlx::query_as::<_, WorkoutPlanRow>(concat!(
            "DELETE FROM workout_plans WHERE id = $1 RETURNING ",
            columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(WorkoutPlan::NAME))?
        .try_into()
    }
}

/// INSERT on any executor, the pool or an open transaction.
pub(super) async fn insert_workout_plan<'e>(
    executor: impl PgExecutor<'e>,
    plan: &WorkoutPlan,
) -> Result<()> {
    sqlx::query(concat!(
        "INSERT INTO workout_plans (",
        columns!(),
        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
    ))
    .bind(plan.id)
    .bind(&plan.name)
    .bind(&plan.description)
    .bind(Json(&plan.exercises))
    .bind(plan.duration)
    .bind(plan.difficulty.as_str())
    .bind(plan.category.as_str())
    .bind(plan.is_public)
    .bind(plan.created_by)
    .bind(plan.created_at)
    .bind(plan.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error::<WorkoutPlan>(e, plan.id))?;

    Ok(())
}
