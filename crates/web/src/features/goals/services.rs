use chrono::Utc;
use storage::{
    EntityStore,
    dto::goal::{CreateGoalRequest, GoalFilter, UpdateGoalRequest},
    error::Result,
    filter,
    models::Goal,
};
use uuid::Uuid;

/// List goals matching the filter
pub async fn list_goals(store: &dyn EntityStore<Goal>, filter: &GoalFilter) -> Result<Vec<Goal>> {
    Ok(filter::apply(store.list().await?, filter))
}

/// Get a goal by id
pub async fn get_goal(store: &dyn EntityStore<Goal>, id: Uuid) -> Result<Goal> {
    store.find(id).await
}

/// Create a new goal
pub async fn create_goal(
    store: &dyn EntityStore<Goal>,
    request: CreateGoalRequest,
) -> Result<Goal> {
    let goal = store.insert(request.into_model(Utc::now())).await?;
    tracing::info!(id = %goal.id, title = %goal.title, "Created goal");
    Ok(goal)
}

/// Update a goal. Moving it to `completed` stamps `completedAt`.
pub async fn update_goal(
    store: &dyn EntityStore<Goal>,
    id: Uuid,
    request: UpdateGoalRequest,
) -> Result<Goal> {
    let mut goal = store.find(id).await?;
    request.apply_to(&mut goal, Utc::now());

    let goal = store.replace(goal).await?;
    tracing::info!(id = %goal.id, status = %goal.status, "Updated goal");
    Ok(goal)
}

/// Delete a goal
pub async fn delete_goal(store: &dyn EntityStore<Goal>, id: Uuid) -> Result<Goal> {
    let goal = store.remove(id).await?;
    tracing::info!(id = %goal.id, "Deleted goal");
    Ok(goal)
}
