//! Data collection for statistics.
//!
//! Reads one owner's snapshot from the task store: every task (for category
//! and rate metrics) plus the completion timestamps inside the analysis
//! window (for streaks, weekly counts and the heatmap).

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::error::StudyError;
use crate::storage::TaskStore;
use crate::tasks::{Task, TaskStatus};

/// Collected statistics data.
#[derive(Debug, Clone, Default)]
pub struct CollectedData {
    /// All of the owner's tasks
    pub tasks: Vec<Task>,
    /// Completion timestamps inside the window, oldest first
    pub completions: Vec<DateTime<Utc>>,
}

impl CollectedData {
    /// Tasks still active.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Active)
            .count()
    }

    /// Tasks completed, regardless of the window.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }
}

/// Collects one owner's tasks for statistics.
pub struct StatsCollector<'a> {
    store: &'a TaskStore<'a>,
    owner_id: i64,
}

impl<'a> StatsCollector<'a> {
    /// Create a new stats collector.
    #[must_use]
    pub const fn new(store: &'a TaskStore<'a>, owner_id: i64) -> Self {
        Self { store, owner_id }
    }

    /// Collect tasks and the completions of the last `window_days` days
    /// (counted in whole UTC days back from `now`).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn collect(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<CollectedData, StudyError> {
        let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let since = Duration::try_days(i64::from(window_days))
            .and_then(|window| start_of_today.checked_sub_signed(window))
            .ok_or_else(|| {
                StudyError::Validation(format!("stats window of {window_days} days is too long"))
            })?;

        let tasks = self.store.all(self.owner_id)?;
        let completions = self.store.completions_since(self.owner_id, since)?;

        tracing::debug!(
            owner_id = self.owner_id,
            tasks = tasks.len(),
            completions = completions.len(),
            "collected stats snapshot"
        );

        Ok(CollectedData { tasks, completions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, UserStore};
    use crate::tasks::NewTask;
    use crate::users::NewUser;

    #[test]
    fn test_collect_windows_completions() {
        let now = DateTime::parse_from_rfc3339("2026-06-15T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let db = Database::open_in_memory().unwrap();
        let owner = UserStore::new(&db)
            .register(NewUser::new("Ada", "ada@example.com"), now)
            .unwrap()
            .id;
        let store = TaskStore::new(&db);

        for days_ago in [0, 2, 9] {
            let t = store
                .create(owner, NewTask::new("Problem set", now, 2.0, 3), now)
                .unwrap();
            store
                .toggle_complete(owner, t.id, now - Duration::days(days_ago))
                .unwrap();
        }
        store
            .create(owner, NewTask::new("Lab report", now, 2.0, 3), now)
            .unwrap();

        let data = StatsCollector::new(&store, owner).collect(7, now).unwrap();
        assert_eq!(data.tasks.len(), 4);
        assert_eq!(data.completions.len(), 2);
        assert_eq!(data.active_count(), 1);
        assert_eq!(data.completed_count(), 3);
    }

    #[test]
    fn test_collect_rejects_unrepresentable_window() {
        let db = Database::open_in_memory().unwrap();
        let store = TaskStore::new(&db);
        let result = StatsCollector::new(&store, 1).collect(u32::MAX, Utc::now());
        assert!(matches!(result, Err(StudyError::Validation(_))));
    }

    #[test]
    fn test_collect_empty() {
        let db = Database::open_in_memory().unwrap();
        let store = TaskStore::new(&db);
        let data = StatsCollector::new(&store, 1).collect(365, Utc::now()).unwrap();
        assert!(data.tasks.is_empty());
        assert!(data.completions.is_empty());
    }
}
