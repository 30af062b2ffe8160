//! Streak, consistency and activity analytics.
//!
//! Everything here works on UTC calendar dates derived from `completed_at`
//! timestamps. The engine is anchored to an explicit `today` so results are
//! reproducible; [`StreakEngine::today_utc`] anchors it to the current date.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::priority::round4;
use crate::tasks::{Task, TaskStatus, DEFAULT_CATEGORY};

/// Default trailing window for streak calculations.
pub const DEFAULT_STREAK_WINDOW_DAYS: u32 = 365;

/// Default heatmap length.
pub const DEFAULT_HEATMAP_DAYS: u32 = 365;

/// Longest window any stats view may cover (about ten years).
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Completions on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Task totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub total_count: usize,
    pub completed_count: usize,
}

/// A single heatmap cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: usize,
    /// Intensity bucket 0-4 relative to the busiest day in the window.
    pub level: u8,
}

/// Activity heatmap over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Oldest first, today last.
    pub days: Vec<HeatmapDay>,
    pub total_contributions: usize,
    pub best_streak: usize,
    pub current_streak: usize,
}

/// Streak and activity calculations anchored at a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakEngine {
    today: NaiveDate,
    streak_window_days: usize,
}

impl StreakEngine {
    /// Create an engine that treats `today` as the current date.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            streak_window_days: DEFAULT_STREAK_WINDOW_DAYS as usize,
        }
    }

    /// Create an engine anchored at the current UTC date.
    #[must_use]
    pub fn today_utc() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// Override the window used when the heatmap derives its streak fields.
    #[must_use]
    pub const fn with_streak_window(mut self, days: usize) -> Self {
        self.streak_window_days = days;
        self
    }

    /// The anchor date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Distinct completion dates within the last `window_days` days.
    #[must_use]
    pub fn completion_dates(
        &self,
        completions: &[DateTime<Utc>],
        window_days: usize,
    ) -> BTreeSet<NaiveDate> {
        let cutoff = self.days_ago(window_days);
        completions
            .iter()
            .map(DateTime::date_naive)
            .filter(|d| *d >= cutoff && *d <= self.today)
            .collect()
    }

    /// Consecutive active days ending today, or yesterday if today has no
    /// completion yet.
    #[must_use]
    pub fn current_streak(&self, dates: &BTreeSet<NaiveDate>) -> usize {
        let mut check = if dates.contains(&self.today) {
            self.today
        } else {
            self.days_ago(1)
        };

        let mut streak = 0;
        while dates.contains(&check) {
            streak += 1;
            check -= Duration::days(1);
        }
        streak
    }

    /// Longest run of consecutive dates.
    #[must_use]
    pub fn best_streak(&self, dates: &BTreeSet<NaiveDate>) -> usize {
        let mut longest = 0;
        let mut streak = 0;
        let mut prev: Option<NaiveDate> = None;

        for date in dates {
            streak = match prev {
                Some(p) if (*date - p).num_days() == 1 => streak + 1,
                _ => 1,
            };
            longest = longest.max(streak);
            prev = Some(*date);
        }

        longest
    }

    /// Fraction of the last `window_days` days (today included) with at
    /// least one completion.
    #[must_use]
    pub fn consistency(&self, dates: &BTreeSet<NaiveDate>, window_days: usize) -> f64 {
        if window_days == 0 {
            return 0.0;
        }

        let active = (0..window_days)
            .filter(|&d| dates.contains(&self.days_ago(d)))
            .count();

        round4(active as f64 / window_days as f64)
    }

    /// Completion counts for each of the last seven days, oldest first.
    #[must_use]
    pub fn weekly_counts(&self, completions: &[DateTime<Utc>]) -> Vec<DayCount> {
        self.daily_counts(completions, 7)
    }

    /// Completion counts for each of the last `days` days, oldest first.
    #[must_use]
    pub fn daily_counts(&self, completions: &[DateTime<Utc>], days: usize) -> Vec<DayCount> {
        let by_date = self.count_by_date(completions, days);

        (0..days)
            .rev()
            .map(|d| {
                let date = self.days_ago(d);
                DayCount {
                    date,
                    count: by_date.get(&date).copied().unwrap_or(0),
                }
            })
            .collect()
    }

    /// Total and completed task counts per category.
    ///
    /// Tasks without a category count as `general`. Sorted by category name.
    #[must_use]
    pub fn category_breakdown(&self, tasks: &[Task]) -> Vec<CategoryCount> {
        let mut by_category: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

        for task in tasks {
            let category = match task.category.trim() {
                "" => DEFAULT_CATEGORY,
                c => c,
            };
            let entry = by_category.entry(category).or_insert((0, 0));
            entry.0 += 1;
            if task.status == TaskStatus::Completed {
                entry.1 += 1;
            }
        }

        by_category
            .into_iter()
            .map(|(category, (total, completed))| CategoryCount {
                category: category.to_string(),
                total_count: total,
                completed_count: completed,
            })
            .collect()
    }

    /// Activity heatmap for the last `days` days.
    #[must_use]
    pub fn heatmap(&self, completions: &[DateTime<Utc>], days: usize) -> Heatmap {
        let counts = self.daily_counts(completions, days);
        let max_count = counts.iter().map(|d| d.count).max().unwrap_or(0).max(1);

        let total_contributions = counts.iter().map(|d| d.count).sum();
        let heat_days = counts
            .into_iter()
            .map(|d| HeatmapDay {
                level: heat_level(d.count, max_count),
                date: d.date,
                count: d.count,
            })
            .collect();

        let dates = self.completion_dates(completions, self.streak_window_days);

        Heatmap {
            days: heat_days,
            total_contributions,
            best_streak: self.best_streak(&dates),
            current_streak: self.current_streak(&dates),
        }
    }

    fn count_by_date(&self, completions: &[DateTime<Utc>], days: usize) -> HashMap<NaiveDate, usize> {
        let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();
        if days == 0 {
            return by_date;
        }

        let start = self.days_ago(days - 1);
        for completed_at in completions {
            let date = completed_at.date_naive();
            if date >= start && date <= self.today {
                *by_date.entry(date).or_default() += 1;
            }
        }
        by_date
    }

    fn days_ago(&self, days: usize) -> NaiveDate {
        i64::try_from(days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|offset| self.today.checked_sub_signed(offset))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Bucket a day's count against the busiest day: 0 for none, then quartiles.
fn heat_level(count: usize, max_count: usize) -> u8 {
    if count == 0 {
        return 0;
    }

    let count = count as f64;
    let max = max_count as f64;
    if count <= max * 0.25 {
        1
    } else if count <= max * 0.5 {
        2
    } else if count <= max * 0.75 {
        3
    } else {
        4
    }
}
