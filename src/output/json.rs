//! JSON output formatting for smartstudy.
//!
//! This module provides functions for formatting users and tasks as JSON.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyError;
use crate::tasks::Task;
use crate::users::User;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, StudyError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single task as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_task_json(task: &Task) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(task)?)
}

/// Format users as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_users_json(users: &[User]) -> Result<String, StudyError> {
    let output = json!({
        "count": users.len(),
        "items": users
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
