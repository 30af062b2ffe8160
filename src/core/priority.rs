//! Priority scoring.
//!
//! A task's priority is a weighted blend of three factors:
//! - Urgency (50%): days remaining until the deadline, on a 30-day scale
//! - Effort (30%): estimated hours, on a 20-hour scale
//! - Complexity (20%): difficulty rating 1-5
//!
//! The result is clamped to `[0.0, 1.0]` and rounded to four decimals.
//! Inputs are expected to be validated already (see [`crate::tasks`]).

use chrono::{DateTime, Utc};

const URGENCY_HORIZON_DAYS: f64 = 30.0;
const EFFORT_SCALE_HOURS: f64 = 20.0;
const COMPLEXITY_SCALE: f64 = 5.0;

const URGENCY_WEIGHT: f64 = 0.5;
const EFFORT_WEIGHT: f64 = 0.3;
const COMPLEXITY_WEIGHT: f64 = 0.2;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calculate the priority score of a task as of now.
#[must_use]
pub fn calculate_priority(due_date: DateTime<Utc>, effort_hours: f64, complexity_level: u8) -> f64 {
    calculate_priority_at(due_date, effort_hours, complexity_level, Utc::now())
}

/// Calculate the priority score of a task as of `now`.
///
/// Overdue tasks have urgency above 1.0 and deadlines beyond 30 days have
/// negative urgency; the final clamp keeps the score in range either way.
#[must_use]
pub fn calculate_priority_at(
    due_date: DateTime<Utc>,
    effort_hours: f64,
    complexity_level: u8,
    now: DateTime<Utc>,
) -> f64 {
    let days_to_deadline = (due_date - now).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;

    let urgency_score = (URGENCY_HORIZON_DAYS - days_to_deadline) / URGENCY_HORIZON_DAYS;
    let effort_score = effort_hours / EFFORT_SCALE_HOURS;
    let complexity_score = f64::from(complexity_level) / COMPLEXITY_SCALE;

    let priority = URGENCY_WEIGHT * urgency_score
        + EFFORT_WEIGHT * effort_score
        + COMPLEXITY_WEIGHT * complexity_score;

    round4(priority.clamp(0.0, 1.0))
}

/// Round to four decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
