use chrono::Utc;
use storage::{
    EntityStore,
    dto::workout_plan::{CreateWorkoutPlanRequest, UpdateWorkoutPlanRequest, WorkoutPlanFilter},
    error::Result,
    filter,
    models::WorkoutPlan,
};
use uuid::Uuid;

/// List workout plans matching the filter, in creation order
pub async fn list_workout_plans(
    store: &dyn EntityStore<WorkoutPlan>,
    filter: &WorkoutPlanFilter,
) -> Result<Vec<WorkoutPlan>> {
    Ok(filter::apply(store.list().await?, filter))
}

pub async fn get_workout_plan(
    store: &dyn EntityStore<WorkoutPlan>,
    id: Uuid,
) -> Result<WorkoutPlan> {
    store.find(id).await
}

pub async fn create_workout_plan(
    store: &dyn EntityStore<WorkoutPlan>,
    request: CreateWorkoutPlanRequest,
) -> Result<WorkoutPlan> {
    let plan = store.insert(request.into_model(Utc::now())).await?;
    tracing::info!(id = %plan.id, name = %plan.name, "Created workout plan");
    Ok(plan)
}

/// Merge the provided fields into an existing plan
pub async fn update_workout_plan(
    store: &dyn EntityStore<WorkoutPlan>,
    id: Uuid,
    request: UpdateWorkoutPlanRequest,
) -> Result<WorkoutPlan> {
    let mut plan = store.find(id).await?;
    request.apply_to(&mut plan, Utc::now());

    let plan = store.replace(plan).await?;
    tracing::info!(id = %plan.id, "Updated workout plan");
    Ok(plan)
}

pub async fn delete_workout_plan(
    store: &dyn EntityStore<WorkoutPlan>,
    id: Uuid,
) -> Result<WorkoutPlan> {
    let plan = store.remove(id).await?;
    tracing::info!(id = %plan.id, "Deleted workout plan");
    Ok(plan)
}
