use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use super::{EntityStore, insert_error};
use crate::error::{Result, StorageError};
use crate::models::{Entity, Goal};

macro_rules! columns {
    () => {
        "id, user_id, title, description, goal_type, target_value, current_value, unit, \
         target_date, status, priority, is_public, completed_at, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct GoalRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    goal_type: String,
    target_value: f64,
    current_value: f64,
    unit: String,
    target_date: DateTime<Utc>,
    status: String,
    priority: String,
    is_public: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = StorageError;

    fn try_from(row: GoalRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            goal_type: row.goal_type.parse()?,
            target_value: row.target_value,
            current_value: row.current_value,
            unit: row.unit,
            target_date: row.target_date,
            status: row.status.parse()?,
            priority: row.priority.parse()?,
            is_public: row.is_public,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Goal> for GoalRepository {
    async fn list(&self) -> Result<Vec<Goal>> {
        sqlx::query_as::<_, GoalRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM goals ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Goal::try_from)
        .collect()
    }

    async fn find(&self, id: Uuid) -> Result<Goal> {
        sqlx::query_as::<_, GoalRow>(concat!("SELECT ", columns!(), " FROM goals WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(Goal::NAME))?
            .try_into()
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        insert_goal(&self.pool, &goal).await?;
        Ok(goal)
    }

    async fn replace(&self, goal: Goal) -> Result<Goal> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET user_id = $2,
                title = $3,
                description = $4,
                goal_type = $5,
                target_value = $6,
                current_value = $7,
                unit = $8,
                target_date = $9,
                status = $10,
                priority = $11,
                is_public = $12,
                completed_at = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(goal.id)
        .bind(goal.user_id)
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.goal_type.as_str())
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(&goal.unit)
        .bind(goal.target_date)
        .bind(goal.status.as_str())
        .bind(goal.priority.as_str())
        .bind(goal.is_public)
        .bind(goal.completed_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(Goal::NAME));
        }

        Ok(goal)
    }

    async fn remove(&self, id: Uuid) -> Result<Goal> {
        sqlx::query_as::<_, GoalRow>(concat!(
            "DELETE FROM goals WHERE id = $1 RETURNING ",
            columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(Goal::NAME))?
        .try_into()
    }
}

/// INSERT on any executor, the pool or an open transaction.
pub(super) async fn insert_goal<'e>(executor: impl PgExecutor<'e>, goal: &Goal) -> Result<()> {
    sqlx::query(concat!(
        "INSERT INTO goals (",
        columns!(),
        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
    ))
    .bind(goal.id)
    .bind(goal.user_id)
    .bind(&goal.title)
    .bind(&goal.description)
    .bind(goal.goal_type.as_str())
    .bind(goal.target_value)
    .bind(goal.current_value)
    .bind(&goal.unit)
    .bind(goal.target_date)
    .bind(goal.status.as_str())
    .bind(goal.priority.as_str())
    .bind(goal.is_public)
    .bind(goal.completed_at)
    .bind(goal.created_at)
    .bind(goal.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error::<Goal>(e, goal.id))?;

    Ok(())
}
