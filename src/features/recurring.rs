//! Daily task replication.
//!
//! A completed daily task is due again the next day. Reconciliation looks
//! at each completed daily task finished before today and makes sure an
//! instance of it is due today, keyed by (owner, normalized title, day) so
//! running it any number of times creates at most one replica.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::StudyError;
use crate::storage::TaskStore;
use crate::tasks::{NewTask, Task, TaskType};

/// Create today's instances of completed daily tasks.
///
/// Returns the tasks that were created.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn reconcile_daily(
    store: &TaskStore<'_>,
    owner_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<Task>, StudyError> {
    let today = now.date_naive();
    let tasks = store.all(owner_id)?;

    let mut existing: HashSet<(String, NaiveDate)> = tasks
        .iter()
        .map(|t| (normalize_title(&t.title), t.due_date.date_naive()))
        .collect();

    let mut created = Vec::new();
    for task in tasks.iter().filter(|t| needs_replica(t, today)) {
        let key = (normalize_title(&task.title), today);
        if !existing.insert(key) {
            continue;
        }

        let replica = store.create(owner_id, replica_of(task, end_of_day(today)), now)?;
        tracing::info!(
            source_id = task.id,
            task_id = replica.id,
            owner_id,
            "spawned daily task"
        );
        created.push(replica);
    }

    Ok(created)
}

fn needs_replica(task: &Task, today: NaiveDate) -> bool {
    task.task_type == TaskType::Daily
        && task.is_completed()
        && task
            .completed_at
            .is_some_and(|at| at.date_naive() < today)
}

fn replica_of(task: &Task, due_date: DateTime<Utc>) -> NewTask {
    NewTask {
        title: task.title.clone(),
        description: task.description.clone(),
        notes: String::new(),
        category: Some(task.category.clone()),
        due_date,
        effort_hours: task.effort_hours,
        complexity_level: task.complexity_level,
        task_type: TaskType::Daily,
        requires_proof: task.requires_proof,
    }
}

/// Lowercase with runs of whitespace collapsed.
fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    day.and_time(time).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, UserStore};
    use crate::tasks::TaskStatus;
    use crate::users::NewUser;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user = UserStore::new(&db)
            .register(NewUser::new("Ada", "ada@example.com"), now())
            .unwrap();
        (db, user.id)
    }

    fn daily(title: &str, due: DateTime<Utc>) -> NewTask {
        NewTask::new(title, due, 1.0, 2)
            .with_category("language")
            .with_type(TaskType::Daily)
    }

    #[test]
    fn test_spawns_replica_due_today() {
        let (db, owner) = setup();
        let store = TaskStore::new(&db);
        let yesterday = now() - Duration::days(1);
        let t = store.create(owner, daily("Vocab drill", yesterday), yesterday).unwrap();
        store.toggle_complete(owner, t.id, yesterday).unwrap();

        let created = reconcile_daily(&store, owner, now()).unwrap();
        assert_eq!(created.len(), 1);
        let replica = &created[0];
        assert_eq!(replica.title, "Vocab drill");
        assert_eq!(replica.category, "language");
        assert_eq!(replica.task_type, TaskType::Daily);
        assert_eq!(replica.status, TaskStatus::Active);
        assert_eq!(replica.due_date, end_of_day(now().date_naive()));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (db, owner) = setup();
        let store = TaskStore::new(&db);
        let yesterday = now() - Duration::days(1);
        let t = store.create(owner, daily("Vocab drill", yesterday), yesterday).unwrap();
        store.toggle_complete(owner, t.id, yesterday).unwrap();

        assert_eq!(reconcile_daily(&store, owner, now()).unwrap().len(), 1);
        assert!(reconcile_daily(&store, owner, now()).unwrap().is_empty());
        assert_eq!(store.all(owner).unwrap().len(), 2);
    }

    #[test]
    fn test_title_normalization_dedupes() {
        let (db, owner) = setup();
        let store = TaskStore::new(&db);
        let yesterday = now() - Duration::days(1);
        let t = store.create(owner, daily("Vocab   Drill", yesterday), yesterday).unwrap();
        store.toggle_complete(owner, t.id, yesterday).unwrap();
        store
            .create(owner, daily("vocab drill", end_of_day(now().date_naive())), now())
            .unwrap();

        assert!(reconcile_daily(&store, owner, now()).unwrap().is_empty());
    }

    #[test]
    fn test_ignores_today_completions_and_other_types() {
        let (db, owner) = setup();
        let store = TaskStore::new(&db);
        let done_today = store.create(owner, daily("Flashcards", now()), now()).unwrap();
        store.toggle_complete(owner, done_today.id, now()).unwrap();

        let yesterday = now() - Duration::days(1);
        let essay = store
            .create(owner, NewTask::new("Essay", yesterday, 3.0, 3), yesterday)
            .unwrap();
        store.toggle_complete(owner, essay.id, yesterday).unwrap();

        assert!(reconcile_daily(&store, owner, now()).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Read\tCh. 4  Notes "), "read ch. 4 notes");
    }
}
