use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use super::{EntityStore, insert_error};
use crate::error::{Result, StorageError};
use crate::models::{Entity, PersonalRecord};

macro_rules! columns {
    () => {
        "id, user_id, exercise_id, exercise_name, record_type, value, unit, previous_record, \
         improvement, workout_id, workout_date, notes, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct PersonalRecordRow {
    id: Uuid,
    user_id: Uuid,
    exercise_id: String,
    exercise_name: String,
    record_type: String,
    value: f64,
    unit: String,
    previous_record: Option<f64>,
    improvement: Option<f64>,
    workout_id: Uuid,
    workout_date: DateTime<Utc>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PersonalRecordRow> for PersonalRecord {
    type Error = StorageError;

    fn try_from(row: PersonalRecordRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            record_type: row.record_type.parse()?,
            value: row.value,
            unit: row.unit,
            previous_record: row.previous_record,
            improvement: row.improvement,
            workout_id: row.workout_id,
            workout_date: row.workout_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PersonalRecordRepository {
    pool: PgPool,
}

impl PersonalRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<PersonalRecord> for PersonalRecordRepository {
    async fn list(&self) -> Result<Vec<PersonalRecord>> {
        sqlx::query_as::<_, PersonalRecordRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM personal_records ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(PersonalRecord::try_from)
        .collect()
    }

    async fn find(&self, id: Uuid) -> Result<PersonalRecord> {
        sqlx::query_as::<_, PersonalRecordRow>(concat!(
            "SELECT ",
            columns!(),
            " FROM personal_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(PersonalRecord::NAME))?
        .try_into()
    }

    async fn insert(&self, record: PersonalRecord) -> Result<PersonalRecord> {
        insert_personal_record(&self.pool, &record).await?;
        Ok(record)
    }

    async fn replace(&self, record: PersonalRecord) -> Result<PersonalRecord> {
        let result = sqlx::query(
            r#"
            UPDATE personal_records
            SET user_id = $2,
                exercise_id = $3,
                exercise_name = $4,
                record_type = $5,
                value = $6,
                unit = $7,
                previous_record = $8,
                improvement = $9,
                workout_id = $10,
                workout_date = $11,
                notes = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.exercise_id)
        .bind(&record.exercise_name)
        .bind(record.record_type.as_str())
        .bind(record.value)
        .bind(&record.unit)
        .bind(record.previous_record)
        .bind(record.improvement)
        .bind(record.workout_id)
        .bind(record.workout_date)
        .bind(&record.notes)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(PersonalRecord::NAME));
        }

        Ok(record)
    }

    async fn remove(&self, id: Uuid) -> Result<PersonalRecord> {
        sqlx::query_as::<_, PersonalRecordRow>(concat!(
            "DELETE FROM personal_records WHERE id = $1 RETURNING ",
            columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(PersonalRecord::NAME))?
        .try_into()
    }
}

/// INSERT on any executor, the pool or an open transaction.
pub(super) async fn insert_personal_record<'e>(
    executor: impl PgExecutor<'e>,
    record: &PersonalRecord,
) -> Result<()> {
    sqlx::query(concat!(
        "INSERT INTO personal_records (",
        columns!(),
        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
    ))
    .bind(record.id)
    .bind(record.user_id)
    .bind(&record.exercise_id)
    .bind(&record.exercise_name)
    .bind(record.record_type.as_str())
    .bind(record.value)
    .bind(&record.unit)
    .bind(record.previous_record)
    .bind(record.improvement)
    .bind(record.workout_id)
    .bind(record.workout_date)
    .bind(&record.notes)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error::<PersonalRecord>(e, record.id))?;

    Ok(())
}
