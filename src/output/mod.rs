//! Output formatting for smartstudy.
//!
//! This module provides formatters for displaying users and tasks in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::tasks::Task;
use crate::users::User;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => format_task_json(task),
    }
}

/// Format users based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_users(users: &[User], format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_users_pretty(users)),
        OutputFormat::Json => format_users_json(users),
    }
}

/// Format a single user based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_user(user: &User, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_user_pretty(user)),
        OutputFormat::Json => to_json(user),
    }
}
