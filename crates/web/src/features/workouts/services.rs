use chrono::Utc;
use storage::{
    EntityStore,
    dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutFilter},
    error::Result,
    filter,
    models::Workout,
};
use uuid::Uuid;

pub async fn list_workouts(
    store: &dyn EntityStore<Workout>,
    filter: &WorkoutFilter,
) -> Result<Vec<Workout>> {
    Ok(filter::apply(store.list().await?, filter))
}

pub async fn get_workout(store: &dyn EntityStore<Workout>, id: Uuid) -> Result<Workout> {
    store.find(id).await
}

pub async fn create_workout(
    store: &dyn EntityStore<Workout>,
    request: CreateWorkoutRequest,
) -> Result<Workout> {
    let workout = store.insert(request.into_model(Utc::now())).await?;
    tracing::info!(
        id = %workout.id,
        user_id = %workout.user_id,
        status = %workout.status,
        "Created workout"
    );
    Ok(workout)
}

/// Merge the provided fields; completing a workout derives its duration
pub async fn update_workout(
    store: &dyn EntityStore<Workout>,
    id: Uuid,
    request: UpdateWorkoutRequest,
) -> Result<Workout> {
    let mut workout = store.find(id).await?;
    request.apply_to(&mut workout, Utc::now());

    let workout = store.replace(workout).await?;
    tracing::info!(id = %workout.id, status = %workout.status, "Updated workout");
    Ok(workout)
}

pub async fn delete_workout(store: &dyn EntityStore<Workout>, id: Uuid) -> Result<Workout> {
    let workout = store.remove(id).await?;
    tracing::info!(id = %workout.id, "Deleted workout");
    Ok(workout)
}
