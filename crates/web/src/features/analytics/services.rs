use chrono::{NaiveDate, Utc};
use storage::{
    Stores,
    dto::{
        analytics::{
            AnalyticsQuery, DashboardMetrics, ExerciseAnalytics, FrequencyStats, VolumeProgression,
            WorkoutStats,
        },
        goal::GoalFilter,
        personal_record::PersonalRecordFilter,
        workout::WorkoutFilter,
    },
    error::Result,
    filter,
    models::Workout,
    services::analytics,
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The user's workouts whose `startedAt` falls in the requested range
async fn user_workouts(stores: &Stores, query: &AnalyticsQuery) -> Result<Vec<Workout>> {
    let filter = WorkoutFilter {
        date_from: query.date_from,
        date_to: query.date_to,
        ..WorkoutFilter::for_user(query.user_id)
    };
    Ok(filter::apply(stores.workouts.list().await?, &filter))
}

pub async fn workout_stats(stores: &Stores, query: &AnalyticsQuery) -> Result<WorkoutStats> {
    let workouts = user_workouts(stores, query).await?;
    Ok(analytics::workout_stats(&workouts))
}

pub async fn volume_progression(
    stores: &Stores,
    query: &AnalyticsQuery,
) -> Result<VolumeProgression> {
    let workouts = user_workouts(stores, query).await?;
    Ok(analytics::volume_progression(&workouts))
}

pub async fn frequency(stores: &Stores, query: &AnalyticsQuery) -> Result<FrequencyStats> {
    let workouts = user_workouts(stores, query).await?;
    Ok(analytics::frequency_stats(&workouts, today()))
}

pub async fn exercises(stores: &Stores, query: &AnalyticsQuery) -> Result<Vec<ExerciseAnalytics>> {
    let workouts = user_workouts(stores, query).await?;
    Ok(analytics::exercise_analytics(
        &workouts,
        query.exercise_name.as_deref(),
    ))
}

pub async fn dashboard(stores: &Stores, query: &AnalyticsQuery) -> Result<DashboardMetrics> {
    let workouts = user_workouts(stores, query).await?;

    let goal_filter = GoalFilter {
        user_id: Some(query.user_id),
        ..Default::default()
    };
    let goals = filter::apply(stores.goals.list().await?, &goal_filter);

    let record_filter = PersonalRecordFilter {
        user_id: Some(query.user_id),
        ..Default::default()
    };
    let records = filter::apply(stores.personal_records.list().await?, &record_filter);

    Ok(analytics::dashboard_metrics(
        &workouts,
        &goals,
        &records,
        today(),
    ))
}
