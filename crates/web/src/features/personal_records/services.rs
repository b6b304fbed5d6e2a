use chrono::Utc;
use storage::{
    EntityStore,
    dto::personal_record::{
        CreatePersonalRecordRequest, PersonalRecordFilter, UpdatePersonalRecordRequest,
    },
    error::Result,
    filter,
    models::PersonalRecord,
    services::personal_records::create_with_history,
};
use uuid::Uuid;

pub async fn list_personal_records(
    store: &dyn EntityStore<PersonalRecord>,
    filter: &PersonalRecordFilter,
) -> Result<Vec<PersonalRecord>> {
    Ok(filter::apply(store.list().await?, filter))
}

pub async fn get_personal_record(
    store: &dyn EntityStore<PersonalRecord>,
    id: Uuid,
) -> Result<PersonalRecord> {
    store.find(id).await
}

/// Record a new personal best, linking it to the previous best when known
pub async fn create_personal_record(
    store: &dyn EntityStore<PersonalRecord>,
    request: CreatePersonalRecordRequest,
) -> Result<PersonalRecord> {
    let record = create_with_history(store, request, Utc::now()).await?;
    tracing::info!(
        id = %record.id,
        exercise = %record.exercise_name,
        improvement = ?record.improvement,
        "Created personal record"
    );
    Ok(record)
}

pub async fn update_personal_record(
    store: &dyn EntityStore<PersonalRecord>,
    id: Uuid,
    request: UpdatePersonalRecordRequest,
) -> Result<PersonalRecord> {
    let mut record = store.find(id).await?;
    request.apply_to(&mut record, Utc::now());

    let record = store.replace(record).await?;
    tracing::info!(id = %record.id, "Updated personal record");
    Ok(record)
}

pub async fn delete_personal_record(
    store: &dyn EntityStore<PersonalRecord>,
    id: Uuid,
) -> Result<PersonalRecord> {
    let record = store.remove(id).await?;
    tracing::info!(id = %record.id, "Deleted personal record");
    Ok(record)
}
