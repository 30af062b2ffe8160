//! Task persistence.
//!
//! Every operation is scoped to an owner: a task belonging to someone else
//! behaves exactly like a missing one.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::database::{format_timestamp, parse_timestamp};
use super::Database;
use crate::core::calculate_priority_at;
use crate::error::StudyError;
use crate::tasks::{
    validate_new_task, validate_patch, ListFilter, NewTask, Task, TaskPatch, TaskStatus,
    TaskType, DEFAULT_CATEGORY,
};

const TASK_COLUMNS: &str = "id, user_id, title, description, notes, category, due_date, \
     effort_hours, complexity_level, task_type, requires_proof, priority_score, status, \
     completed_at, created_at, updated_at";

/// Storage for study tasks.
pub struct TaskStore<'a> {
    db: &'a Database,
}

impl<'a> TaskStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate and insert a task, scoring it as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for bad input or `Database` on query failure.
    pub fn create(
        &self,
        owner_id: i64,
        task: NewTask,
        now: DateTime<Utc>,
    ) -> Result<Task, StudyError> {
        let task = validate_new_task(task)?;
        let priority =
            calculate_priority_at(task.due_date, task.effort_hours, task.complexity_level, now);
        let category = task
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO tasks
              (user_id, title, description, notes, category, due_date, effort_hours,
               complexity_level, task_type, requires_proof, priority_score, status,
               completed_at, created_at, updated_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 'active', NULL, ?12, ?12)",
            params![
                owner_id,
                task.title,
                task.description,
                task.notes,
                category,
                format_timestamp(task.due_date),
                task.effort_hours,
                task.complexity_level,
                task.task_type.as_str(),
                task.requires_proof,
                priority,
                format_timestamp(now),
            ],
        )
        .map_err(|e| StudyError::Database(format!("Failed to insert task: {e}")))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(task_id = id, owner_id, priority, "created task");
        self.get(owner_id, id)
    }

    /// Get one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist or belongs to someone else.
    pub fn get(&self, owner_id: i64, id: i64) -> Result<Task, StudyError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                params![id, owner_id],
                row_to_task,
            )
            .optional()
            .map_err(|e| StudyError::Database(format!("Failed to query task: {e}")))?
            .ok_or_else(|| StudyError::NotFound(format!("task {id}")))
    }

    /// List the owner's tasks, highest priority first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(
        &self,
        owner_id: i64,
        filter: ListFilter,
        category: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, StudyError> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?");
        let mut values = vec![Value::Integer(owner_id)];

        match filter {
            ListFilter::Today => {
                sql.push_str(" AND status = 'active' AND substr(due_date, 1, 10) = ?");
                values.push(Value::Text(now.date_naive().format("%Y-%m-%d").to_string()));
            },
            ListFilter::Upcoming => {
                sql.push_str(" AND status = 'active' AND due_date > ?");
                values.push(Value::Text(format_timestamp(now)));
            },
            ListFilter::Completed => sql.push_str(" AND status = 'completed'"),
            ListFilter::All => {},
        }

        if let Some(category) = category {
            sql.push_str(" AND category = ?");
            values.push(Value::Text(category.trim().to_lowercase()));
        }

        sql.push_str(" ORDER BY priority_score DESC, id ASC");
        self.query_tasks(&sql, values)
    }

    /// Every task the owner has, active and completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self, owner_id: i64) -> Result<Vec<Task>, StudyError> {
        self.query_tasks(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? ORDER BY id"),
            vec![Value::Integer(owner_id)],
        )
    }

    /// Completion timestamps at or after `since`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn completions_since(
        &self,
        owner_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, StudyError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                r"SELECT completed_at FROM tasks
                  WHERE user_id = ?1 AND status = 'completed'
                    AND completed_at IS NOT NULL AND completed_at >= ?2
                  ORDER BY completed_at",
            )
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params![owner_id, format_timestamp(since)], |row| {
                let value: String = row.get(0)?;
                parse_timestamp(0, &value)
            })
            .map_err(|e| StudyError::Database(format!("Failed to query completions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }

    /// Apply a partial update and rescore the task as of `now`.
    ///
    /// Setting `status` keeps `completed_at` consistent: completing stamps it
    /// with `now` (unless already completed), reopening clears it.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `NotFound` or `Database` errors.
    pub fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<Task, StudyError> {
        let patch = validate_patch(patch)?;
        let mut task = self.get(owner_id, id)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(notes) = patch.notes {
            task.notes = notes;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(effort) = patch.effort_hours {
            task.effort_hours = effort;
        }
        if let Some(level) = patch.complexity_level {
            task.complexity_level = level;
        }
        if let Some(task_type) = patch.task_type {
            task.task_type = task_type;
        }
        if let Some(requires_proof) = patch.requires_proof {
            task.requires_proof = requires_proof;
        }
        if let Some(status) = patch.status {
            set_status(&mut task, status, now);
        }

        task.priority_score = calculate_priority_at(
            task.due_date,
            task.effort_hours,
            task.complexity_level,
            now,
        );
        task.updated_at = now;

        self.write(&task)?;
        tracing::debug!(task_id = id, owner_id, priority = task.priority_score, "updated task");
        self.get(owner_id, id)
    }

    /// Flip a task between active and completed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Database` errors.
    pub fn toggle_complete(
        &self,
        owner_id: i64,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Task, StudyError> {
        let mut task = self.get(owner_id, id)?;
        let next = match task.status {
            TaskStatus::Active => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Active,
        };
        set_status(&mut task, next, now);
        task.updated_at = now;

        self.write(&task)?;
        tracing::debug!(task_id = id, owner_id, status = %next, "toggled task");
        self.get(owner_id, id)
    }

    /// Permanently delete a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub fn delete(&self, owner_id: i64, id: i64) -> Result<(), StudyError> {
        let rows = self
            .db
            .connection()
            .execute(
                "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
                params![id, owner_id],
            )
            .map_err(|e| StudyError::Database(format!("Failed to delete task: {e}")))?;

        if rows == 0 {
            return Err(StudyError::NotFound(format!("task {id}")));
        }
        tracing::debug!(task_id = id, owner_id, "deleted task");
        Ok(())
    }

    /// Rescore every active task as of `now`. Returns how many were rescored.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn reprioritize(&self, owner_id: i64, now: DateTime<Utc>) -> Result<usize, StudyError> {
        let tasks = self.list(owner_id, ListFilter::All, None, now)?;
        let mut count = 0;

        for task in tasks.iter().filter(|t| t.status == TaskStatus::Active) {
            let score = calculate_priority_at(
                task.due_date,
                task.effort_hours,
                task.complexity_level,
                now,
            );
            self.db
                .connection()
                .execute(
                    "UPDATE tasks SET priority_score = ?1 WHERE id = ?2 AND user_id = ?3",
                    params![score, task.id, owner_id],
                )
                .map_err(|e| StudyError::Database(format!("Failed to rescore task: {e}")))?;
            count += 1;
        }

        tracing::debug!(owner_id, count, "reprioritized tasks");
        Ok(count)
    }

    fn write(&self, task: &Task) -> Result<(), StudyError> {
        self.db
            .connection()
            .execute(
                r"UPDATE tasks SET
                  title = ?1, description = ?2, notes = ?3, category = ?4, due_date = ?5,
                  effort_hours = ?6, complexity_level = ?7, task_type = ?8, requires_proof = ?9,
                  priority_score = ?10, status = ?11, completed_at = ?12, updated_at = ?13
                  WHERE id = ?14 AND user_id = ?15",
                params![
                    task.title,
                    task.description,
                    task.notes,
                    task.category,
                    format_timestamp(task.due_date),
                    task.effort_hours,
                    task.complexity_level,
                    task.task_type.as_str(),
                    task.requires_proof,
                    task.priority_score,
                    task.status.as_str(),
                    task.completed_at.map(format_timestamp),
                    format_timestamp(task.updated_at),
                    task.id,
                    task.owner_id,
                ],
            )
            .map_err(|e| StudyError::Database(format!("Failed to update task: {e}")))?;
        Ok(())
    }

    fn query_tasks(&self, sql: &str, values: Vec<Value>) -> Result<Vec<Task>, StudyError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params_from_iter(values), row_to_task)
            .map_err(|e| StudyError::Database(format!("Failed to query tasks: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }
}

fn set_status(task: &mut Task, status: TaskStatus, now: DateTime<Utc>) {
    match status {
        TaskStatus::Completed => {
            if task.completed_at.is_none() {
                task.completed_at = Some(now);
            }
        },
        TaskStatus::Active => task.completed_at = None,
    }
    task.status = status;
}

fn parse_stored<T>(
    column: usize,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    parse(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(StudyError::Database(format!("unknown stored value {value:?}"))),
        )
    })
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let due_date: String = row.get(6)?;
    let task_type: String = row.get(9)?;
    let status: String = row.get(12)?;
    let completed_at: Option<String> = row.get(13)?;
    let created_at: String = row.get(14)?;
    let updated_at: String = row.get(15)?;

    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        notes: row.get(4)?,
        category: row.get(5)?,
        due_date: parse_timestamp(6, &due_date)?,
        effort_hours: row.get(7)?,
        complexity_level: row.get(8)?,
        task_type: parse_stored(9, &task_type, TaskType::from_str_opt)?,
        requires_proof: row.get(10)?,
        priority_score: row.get(11)?,
        status: parse_stored(12, &status, TaskStatus::from_str_opt)?,
        completed_at: completed_at
            .as_deref()
            .map(|s| parse_timestamp(13, s))
            .transpose()?,
        created_at: parse_timestamp(14, &created_at)?,
        updated_at: parse_timestamp(15, &updated_at)?,
    })
}
