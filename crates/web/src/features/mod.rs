pub mod analytics;
pub mod goals;
pub mod personal_records;
pub mod workout_plans;
pub mod workouts;
