//! Metric calculations for statistics.
//!
//! Turns a [`CollectedData`] snapshot into the dashboard figures using the
//! streak engine.

use serde::{Deserialize, Serialize};

use super::collector::CollectedData;
use crate::config::StatsConfig;
use crate::core::priority::round4;
use crate::core::{DayCount, StreakEngine};

/// Dashboard summary for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Tasks completed today (UTC)
    pub today_completed: usize,
    /// Tasks completed in the last 7 days, today included
    pub week_completed: usize,
    /// All completed tasks
    pub total_completed: usize,
    /// Tasks still open
    pub active_tasks: usize,
    /// Current streak in days
    pub streak: usize,
    /// Longest streak in the streak window
    pub best_streak: usize,
    /// Share of active days over the short window
    pub consistency_7d: f64,
    /// Share of active days over the long window
    pub consistency_30d: f64,
    /// Mean priority score over all tasks
    pub avg_priority: f64,
    /// Completed tasks over all tasks
    pub completion_rate: f64,
}

impl SummaryMetrics {
    /// Calculate the summary from collected data.
    #[must_use]
    pub fn calculate(data: &CollectedData, engine: &StreakEngine, config: &StatsConfig) -> Self {
        let weekly = engine.weekly_counts(&data.completions);
        let today_completed = weekly.last().map_or(0, |d| d.count);
        let week_completed = weekly.iter().map(|d| d.count).sum();

        let dates = engine.completion_dates(&data.completions, config.streak_window_days as usize);
        let short_window = config.short_consistency_days as usize;
        let long_window = config.long_consistency_days as usize;
        let active_days = engine.completion_dates(
            &data.completions,
            short_window.max(long_window),
        );

        let total = data.tasks.len();
        let total_completed = data.completed_count();
        let (avg_priority, completion_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            let sum: f64 = data.tasks.iter().map(|t| t.priority_score).sum();
            (
                round4(sum / total as f64),
                round4(total_completed as f64 / total as f64),
            )
        };

        Self {
            today_completed,
            week_completed,
            total_completed,
            active_tasks: data.active_count(),
            streak: engine.current_streak(&dates),
            best_streak: engine.best_streak(&dates),
            consistency_7d: engine.consistency(&active_days, short_window),
            consistency_30d: engine.consistency(&active_days, long_window),
            avg_priority,
            completion_rate,
        }
    }
}

/// Completions per day over the last week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Oldest first, today last.
    pub days: Vec<DayCount>,
    pub total: usize,
}

impl WeeklyReport {
    #[must_use]
    pub fn calculate(data: &CollectedData, engine: &StreakEngine) -> Self {
        let days = engine.weekly_counts(&data.completions);
        let total = days.iter().map(|d| d.count).sum();
        Self { days, total }
    }
}
