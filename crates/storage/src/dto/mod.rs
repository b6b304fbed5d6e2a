pub mod analytics;
pub mod common;
pub mod goal;
pub mod personal_record;
pub mod workout;
pub mod workout_plan;
