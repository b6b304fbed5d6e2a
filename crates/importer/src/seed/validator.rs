use chrono::{DateTime, Utc};
use storage::dto::common::ValidationIssue;
use storage::models::{GoalStatus, WorkoutStatus};
use tracing::warn;
use validator::Validate;

use super::models::{FORMAT_VERSION, SeedDocument};
use crate::{ImporterError, Result};

pub struct SeedValidator;

impl SeedValidator {
    /// Checks every entry with the API's validation rules. All problems are
    /// collected before failing, each prefixed with its section and index.
    pub fn validate(seed: &SeedDocument, now: DateTime<Utc>) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if seed.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                seed.format_version, FORMAT_VERSION
            ));
        }

        if seed.is_empty() {
            report
                .warnings
                .push("Seed document contains no entries".to_string());
        }

        for (idx, plan) in seed.workout_plans.iter().enumerate() {
            report.check("workoutPlans", idx, plan);
        }

        for (idx, workout) in seed.workouts.iter().enumerate() {
            report.check("workouts", idx, workout);

            if workout.status == WorkoutStatus::InProgress && workout.completed_at.is_some() {
                report.warnings.push(format!(
                    "workouts[{}]: completedAt is set but status is in_progress",
                    idx
                ));
            }
        }

        for (idx, goal) in seed.goals.iter().enumerate() {
            report.check("goals", idx, goal);

            if goal.status == GoalStatus::Active && goal.target_date < now {
                report.warnings.push(format!(
                    "goals[{}]: active goal '{}' has a target date in the past",
                    idx, goal.title
                ));
            }
        }

        for (idx, record) in seed.personal_records.iter().enumerate() {
            report.check("personalRecords", idx, record);
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn check(&mut self, section: &str, idx: usize, entry: &impl Validate) {
        if let Err(errors) = entry.validate() {
            self.errors.extend(
                ValidationIssue::from_errors(&errors)
                    .into_iter()
                    .map(|issue| {
                        format!("{}[{}].{}: {}", section, idx, issue.field, issue.message)
                    }),
            );
        }
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
