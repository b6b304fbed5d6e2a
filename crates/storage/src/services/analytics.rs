use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::dto::analytics::{
    DashboardMetrics, ExerciseAnalytics, FrequencyStats, GoalProgress, VolumePoint,
    VolumeProgression, WeekdayCount, WorkoutStats,
};
use crate::models::{Goal, GoalStatus, PersonalRecord, Workout, WorkoutStatus};

const RECENT_RECORDS: usize = 5;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn completed(workouts: &[Workout]) -> impl Iterator<Item = &Workout> {
    workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Completed)
}

pub fn workout_stats(workouts: &[Workout]) -> WorkoutStats {
    let mut stats = WorkoutStats {
        total_workouts: workouts.len(),
        ..Default::default()
    };

    let mut timed = 0usize;
    for workout in workouts {
        match workout.status {
            WorkoutStatus::Completed => stats.completed_workouts += 1,
            WorkoutStatus::InProgress => stats.in_progress_workouts += 1,
            WorkoutStatus::Cancelled => stats.cancelled_workouts += 1,
        }
        if let Some(duration) = workout.duration {
            stats.total_duration += i64::from(duration);
            timed += 1;
        }
    }

    if timed > 0 {
        stats.average_duration = stats.total_duration as f64 / timed as f64;
    }

    for set in completed(workouts)
        .flat_map(|w| &w.exercises)
        .flat_map(|e| e.completed_sets())
    {
        stats.total_sets += 1;
        stats.total_reps += i64::from(set.reps);
        stats.total_volume += set.volume();
    }

    stats
}

/// Daily volume of completed workouts, oldest day first.
pub fn volume_progression(workouts: &[Workout]) -> VolumeProgression {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for workout in completed(workouts) {
        let entry = days.entry(workout.started_at.date_naive()).or_default();
        entry.0 += workout.volume();
        entry.1 += 1;
    }

    let points: Vec<VolumePoint> = days
        .into_iter()
        .map(|(date, (volume, workout_count))| VolumePoint {
            date,
            volume,
            workout_count,
        })
        .collect();
    let total_volume = points.iter().map(|p| p.volume).sum();

    VolumeProgression {
        points,
        total_volume,
    }
}

pub fn frequency_stats(workouts: &[Workout], today: NaiveDate) -> FrequencyStats {
    let dates: Vec<NaiveDate> = completed(workouts).map(|w| w.started_at.date_naive()).collect();
    let active: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    let by_weekday = WEEKDAYS
        .iter()
        .map(|day| WeekdayCount {
            weekday: weekday_name(*day).to_string(),
            count: dates.iter().filter(|d| d.weekday() == *day).count(),
        })
        .collect();

    let workouts_per_week = match (active.first(), active.last()) {
        (Some(first), Some(last)) => {
            let span_days = (*last - *first).num_days() + 1;
            let weeks = ((span_days + 6) / 7).max(1);
            dates.len() as f64 / weeks as f64
        }
        _ => 0.0,
    };

    let (current_streak, longest_streak) = streaks(&active, today);

    FrequencyStats {
        total_workouts: dates.len(),
        active_days: active.len(),
        workouts_per_week,
        by_weekday,
        current_streak,
        longest_streak,
    }
}

/// Returns (current, longest) runs of consecutive active days. The current
/// run only counts when it reaches today or yesterday.
fn streaks(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, u32) {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for date in active {
        run = match previous {
            Some(prev) if *date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*date);
    }

    let current = match previous {
        Some(last) if today - last <= Duration::days(1) && last <= today => run,
        _ => 0,
    };

    (current, longest)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Per-exercise totals over completed workouts, grouped by case-insensitive
/// name and sorted by volume (highest first), then name.
pub fn exercise_analytics(
    workouts: &[Workout],
    exercise_name: Option<&str>,
) -> Vec<ExerciseAnalytics> {
    let wanted = exercise_name.map(str::to_lowercase);
    let mut by_name: HashMap<String, ExerciseAnalytics> = HashMap::new();

    for workout in completed(workouts) {
        for exercise in &workout.exercises {
            let key = exercise.name.to_lowercase();
            if wanted.as_ref().is_some_and(|wanted| *wanted != key) {
                continue;
            }

            let entry = by_name.entry(key).or_insert_with(|| ExerciseAnalytics {
                exercise_name: exercise.name.clone(),
                sessions: 0,
                total_sets: 0,
                total_reps: 0,
                total_volume: 0.0,
                max_weight: None,
                last_performed: workout.started_at,
            });

            entry.sessions += 1;
            entry.last_performed = entry.last_performed.max(workout.started_at);
            for set in exercise.completed_sets() {
                entry.total_sets += 1;
                entry.total_reps += i64::from(set.reps);
                entry.total_volume += set.volume();
                if let Some(weight) = set.weight {
                    entry.max_weight = Some(entry.max_weight.map_or(weight, |max| max.max(weight)));
                }
            }
        }
    }

    let mut analytics: Vec<ExerciseAnalytics> = by_name.into_values().collect();
    analytics.sort_by(|a, b| {
        b.total_volume
            .total_cmp(&a.total_volume)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });
    analytics
}

pub fn dashboard_metrics(
    workouts: &[Workout],
    goals: &[Goal],
    records: &[PersonalRecord],
    today: NaiveDate,
) -> DashboardMetrics {
    let week_start = today - Duration::days(6);
    let workouts_this_week = completed(workouts)
        .filter(|w| {
            let day = w.started_at.date_naive();
            day >= week_start && day <= today
        })
        .count();

    let active_goals = goals.iter().filter(|g| g.status == GoalStatus::Active).count();
    let completed_goals = goals.iter().filter(|g| g.status == GoalStatus::Completed).count();
    let counted_goals = goals.iter().filter(|g| g.status != GoalStatus::Cancelled).count();
    let goal_completion_rate = if counted_goals == 0 {
        0.0
    } else {
        completed_goals as f64 / counted_goals as f64
    };

    let active_goal_progress = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(|g| GoalProgress {
            goal_id: g.id,
            title: g.title.clone(),
            progress: g.progress(),
            target_date: g.target_date,
        })
        .collect();

    let mut recent_records = records.to_vec();
    recent_records.sort_by(|a, b| b.workout_date.cmp(&a.workout_date));
    recent_records.truncate(RECENT_RECORDS);

    DashboardMetrics {
        workout_stats: workout_stats(workouts),
        workouts_this_week,
        active_goals,
        completed_goals,
        goal_completion_rate,
        active_goal_progress,
        recent_records,
        current_streak: frequency_stats(workouts, today).current_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalPriority, GoalType, RecordType, WorkoutExercise, WorkoutSet};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, 8, 0, 0).unwrap()
    }

    fn exercise(name: &str, sets: &[(i32, f64, bool)]) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id: name.to_lowercase(),
            name: name.to_string(),
            sets: sets
                .iter()
                .enumerate()
                .map(|(i, (reps, weight, completed))| WorkoutSet {
                    set_number: i as i32 + 1,
                    reps: *reps,
                    weight: Some(*weight),
                    rest_time: None,
                    completed: *completed,
                    notes: None,
                })
                .collect(),
            notes: None,
        }
    }

    fn workout(
        day: u32,
        status: WorkoutStatus,
        duration: Option<i32>,
        exercises: Vec<WorkoutExercise>,
    ) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            plan_id: None,
            plan_name: None,
            name: format!("Session {}", day),
            exercises,
            status,
            started_at: at(day),
            completed_at: None,
            duration,
            notes: None,
            created_at: at(day),
            updated_at: at(day),
        }
    }

    fn sample() -> Vec<Workout> {
        vec![
            workout(
                1,
                WorkoutStatus::Completed,
                Some(60),
                vec![
                    exercise("Squat", &[(5, 100.0, true), (5, 100.0, true)]),
                    exercise("Bench", &[(8, 60.0, true), (8, 60.0, false)]),
                ],
            ),
            workout(
                2,
                WorkoutStatus::Completed,
                Some(30),
                vec![exercise("squat", &[(3, 120.0, true)])],
            ),
            workout(
                2,
                WorkoutStatus::Cancelled,
                None,
                vec![exercise("Deadlift", &[(5, 150.0, true)])],
            ),
            workout(
                4,
                WorkoutStatus::InProgress,
                None,
                vec![exercise("Row", &[(10, 50.0, false)])],
            ),
        ]
    }

    #[test]
    fn test_workout_stats() {
        let stats = workout_stats(&sample());

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.cancelled_workouts, 1);
        assert_eq!(stats.in_progress_workouts, 1);
        assert_eq!(stats.total_duration, 90);
        assert_eq!(stats.average_duration, 45.0);
        assert_eq!(stats.total_sets, 4);
        assert_eq!(stats.total_reps, 21);
        assert_eq!(stats.total_volume, 1000.0 + 480.0 + 360.0);
    }

    #[test]
    fn test_workout_stats_empty() {
        assert_eq!(workout_stats(&[]), WorkoutStats::default());
    }

    #[test]
    fn test_volume_progression_groups_by_day() {
        let progression = volume_progression(&sample());

        assert_eq!(progression.points.len(), 2);
        assert_eq!(progression.points[0].date, at(1).date_naive());
        assert_eq!(progression.points[0].volume, 1480.0);
        assert_eq!(progression.points[1].workout_count, 1);
        assert_eq!(progression.total_volume, 1840.0);
    }

    #[test]
    fn test_frequency_and_streaks() {
        let stats = frequency_stats(&sample(), at(3).date_naive());

        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.workouts_per_week, 2.0);
        assert_eq!(stats.by_weekday.len(), 7);
        assert_eq!(stats.by_weekday.iter().map(|d| d.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_streak_broken_when_stale() {
        let stats = frequency_stats(&sample(), at(10).date_naive());
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_exercise_analytics_groups_case_insensitively() {
        let analytics = exercise_analytics(&sample(), None);

        assert_eq!(analytics.len(), 2);
        let squat = &analytics[0];
        assert_eq!(squat.exercise_name, "Squat");
        assert_eq!(squat.sessions, 2);
        assert_eq!(squat.total_sets, 3);
        assert_eq!(squat.max_weight, Some(120.0));
        assert_eq!(squat.last_performed, at(2));

        let bench = exercise_analytics(&sample(), Some("BENCH"));
        assert_eq!(bench.len(), 1);
        assert_eq!(bench[0].total_volume, 480.0);
    }

    #[test]
    fn test_dashboard_metrics() {
        let now = at(3);
        let goal = |status| Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            title: "Goal".to_string(),
            description: None,
            goal_type: GoalType::Strength,
            target_value: 100.0,
            current_value: 50.0,
            unit: "kg".to_string(),
            target_date: now,
            status,
            priority: GoalPriority::Medium,
            is_public: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        let goals = vec![
            goal(GoalStatus::Active),
            goal(GoalStatus::Completed),
            goal(GoalStatus::Cancelled),
        ];
        let records: Vec<PersonalRecord> = (1..=7)
            .map(|day| PersonalRecord {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                exercise_id: "squat".to_string(),
                exercise_name: "Squat".to_string(),
                record_type: RecordType::MaxWeight,
                value: 100.0 + day as f64,
                unit: "kg".to_string(),
                previous_record: None,
                improvement: None,
                workout_id: Uuid::new_v4(),
                workout_date: at(day),
                notes: None,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let metrics = dashboard_metrics(&sample(), &goals, &records, now.date_naive());

        assert_eq!(metrics.workouts_this_week, 2);
        assert_eq!(metrics.active_goals, 1);
        assert_eq!(metrics.completed_goals, 1);
        assert_eq!(metrics.goal_completion_rate, 0.5);
        assert_eq!(metrics.active_goal_progress.len(), 1);
        assert_eq!(metrics.active_goal_progress[0].progress, 50.0);
        assert_eq!(metrics.recent_records.len(), 5);
        assert_eq!(metrics.recent_records[0].workout_date, at(7));
        assert_eq!(metrics.current_streak, 2);
    }
}
