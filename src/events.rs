//! Completion events.
//!
//! When a task transitions to completed, a [`CompletionEvent`] is handed to a
//! [`CompletionNotifier`]. Delivery is fire-and-forget: a failing notifier is
//! logged and never fails the command that completed the task.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StudyError;
use crate::tasks::Task;

/// A task has just been marked completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEvent {
    pub task_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub category: String,
    pub completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    /// Build an event from a completed task. Returns `None` for active tasks.
    #[must_use]
    pub fn from_task(task: &Task) -> Option<Self> {
        let completed_at = task.completed_at.filter(|_| task.is_completed())?;
        Some(Self {
            task_id: task.id,
            owner_id: task.owner_id,
            title: task.title.clone(),
            category: task.category.clone(),
            completed_at,
        })
    }
}

/// Receives completion events.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionNotifier {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; callers log and ignore it.
    fn notify(&self, event: &CompletionEvent) -> Result<(), StudyError>;
}

/// Notifier that records completions in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, event: &CompletionEvent) -> Result<(), StudyError> {
        tracing::info!(
            task_id = event.task_id,
            owner_id = event.owner_id,
            category = %event.category,
            completed_at = %event.completed_at,
            "task completed: {}",
            event.title
        );
        Ok(())
    }
}

/// Emit a completion event for `task` if it is completed.
///
/// Returns whether an event was emitted. Notifier failures are swallowed.
pub fn dispatch(notifier: &dyn CompletionNotifier, task: &Task) -> bool {
    let Some(event) = CompletionEvent::from_task(task) else {
        return false;
    };

    if let Err(e) = notifier.notify(&event) {
        tracing::warn!(task_id = event.task_id, error = %e, "completion notification failed");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{TaskStatus, TaskType};

    fn task(status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id: 7,
            owner_id: 1,
            title: "Read chapter 4".to_string(),
            description: String::new(),
            notes: String::new(),
            category: "reading".to_string(),
            due_date: now,
            effort_hours: 2.0,
            complexity_level: 2,
            task_type: TaskType::SpecificDate,
            requires_proof: false,
            priority_score: 0.5,
            status,
            completed_at: (status == TaskStatus::Completed).then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_dispatch_completed_task() {
        let mut notifier = MockCompletionNotifier::new();
        notifier
            .expect_notify()
            .withf(|e: &CompletionEvent| e.task_id == 7 && e.category == "reading")
            .times(1)
            .returning(|_| Ok(()));

        assert!(dispatch(&notifier, &task(TaskStatus::Completed)));
    }

    #[test]
    fn test_dispatch_skips_active_task() {
        let mut notifier = MockCompletionNotifier::new();
        notifier.expect_notify().times(0);

        assert!(!dispatch(&notifier, &task(TaskStatus::Active)));
    }

    #[test]
    fn test_dispatch_swallows_failure() {
        let mut notifier = MockCompletionNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(StudyError::Config("smtp down".to_string())));

        assert!(dispatch(&notifier, &task(TaskStatus::Completed)));
    }

    #[test]
    fn test_log_notifier_succeeds() {
        let event = CompletionEvent::from_task(&task(TaskStatus::Completed)).unwrap();
        assert!(LogNotifier.notify(&event).is_ok());
    }
}
