pub mod analytics;
pub mod personal_records;
