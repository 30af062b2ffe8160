//! Input validation for task fields.
//!
//! The priority engine is only defined on the constrained domain, so every
//! create and update passes through here first.

use chrono::{DateTime, Utc};

use super::types::{NewTask, TaskPatch, DEFAULT_CATEGORY};
use crate::core::is_storable;
use crate::error::StudyError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_EFFORT_HOURS: f64 = 100.0;
pub const MIN_COMPLEXITY: u8 = 1;
pub const MAX_COMPLEXITY: u8 = 5;

/// Validate a new task, trimming its title and normalizing its category.
///
/// # Errors
///
/// Returns `StudyError::Validation` describing the first bad field.
pub fn validate_new_task(mut task: NewTask) -> Result<NewTask, StudyError> {
    task.title = validate_title(&task.title)?;
    validate_due_date(task.due_date)?;
    validate_effort(task.effort_hours)?;
    validate_complexity(task.complexity_level)?;
    task.category = Some(normalize_category(task.category.as_deref())?);
    Ok(task)
}

/// Validate the fields a patch sets.
///
/// # Errors
///
/// Returns `StudyError::Validation` describing the first bad field.
pub fn validate_patch(mut patch: TaskPatch) -> Result<TaskPatch, StudyError> {
    if let Some(title) = &patch.title {
        patch.title = Some(validate_title(title)?);
    }
    if let Some(due) = patch.due_date {
        validate_due_date(due)?;
    }
    if let Some(effort) = patch.effort_hours {
        validate_effort(effort)?;
    }
    if let Some(level) = patch.complexity_level {
        validate_complexity(level)?;
    }
    if let Some(category) = &patch.category {
        patch.category = Some(normalize_category(Some(category))?);
    }
    Ok(patch)
}

fn validate_title(title: &str) -> Result<String, StudyError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StudyError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(StudyError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_due_date(due: DateTime<Utc>) -> Result<(), StudyError> {
    if !is_storable(due) {
        return Err(StudyError::Validation(format!(
            "due date must fall between years 1 and 9999, got {due}"
        )));
    }
    Ok(())
}

fn validate_effort(effort_hours: f64) -> Result<(), StudyError> {
    if effort_hours.is_nan() || effort_hours <= 0.0 || effort_hours > MAX_EFFORT_HOURS {
        return Err(StudyError::Validation(format!(
            "effort_hours must be greater than 0 and at most {MAX_EFFORT_HOURS}, got {effort_hours}"
        )));
    }
    Ok(())
}

fn validate_complexity(level: u8) -> Result<(), StudyError> {
    if !(MIN_COMPLEXITY..=MAX_COMPLEXITY).contains(&level) {
        return Err(StudyError::Validation(format!(
            "complexity_level must be between {MIN_COMPLEXITY} and {MAX_COMPLEXITY}, got {level}"
        )));
    }
    Ok(())
}

/// Lowercase and trim a category; empty or missing becomes `general`.
///
/// # Errors
///
/// Returns `StudyError::Validation` if the category is too long.
pub fn normalize_category(category: Option<&str>) -> Result<String, StudyError> {
    let category = category.map(str::trim).unwrap_or_default().to_lowercase();
    if category.is_empty() {
        return Ok(DEFAULT_CATEGORY.to_string());
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(StudyError::Validation(format!(
            "category must be at most {MAX_CATEGORY_LEN} characters"
        )));
    }
    Ok(category)
}
