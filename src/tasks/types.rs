use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category used when a task has none.
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub category: String,
    pub due_date: DateTime<Utc>,
    pub effort_hours: f64,
    pub complexity_level: u8,
    pub task_type: TaskType,
    pub requires_proof: bool,
    pub priority_score: f64,
    pub status: TaskStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task counts as done.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Completed,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parse the stored representation.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a task recurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Replicated for the next day once completed.
    Daily,
    Weekly,
    #[default]
    SpecificDate,
}

impl TaskType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::SpecificDate => "specific_date",
        }
    }

    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "specific_date" => Some(Self::SpecificDate),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields needed to create a task. Validate with [`super::validate_new_task`]
/// before handing it to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub notes: String,
    pub category: Option<String>,
    pub due_date: DateTime<Utc>,
    pub effort_hours: f64,
    pub complexity_level: u8,
    pub task_type: TaskType,
    pub requires_proof: bool,
}

impl NewTask {
    /// A specific-date task with no description, notes or category.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        due_date: DateTime<Utc>,
        effort_hours: f64,
        complexity_level: u8,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            notes: String::new(),
            category: None,
            due_date,
            effort_hours,
            complexity_level,
            task_type: TaskType::SpecificDate,
            requires_proof: false,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }
}

/// A partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub effort_hours: Option<f64>,
    pub complexity_level: Option<u8>,
    pub task_type: Option<TaskType>,
    pub requires_proof: Option<bool>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Task list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    /// Active tasks due today (UTC).
    Today,
    /// Active tasks due after now.
    Upcoming,
    Completed,
    #[default]
    All,
}

impl ListFilter {
    /// Title used in list output.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::All => "All Tasks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_strings() {
        assert_eq!(TaskStatus::from_str_opt("active"), Some(TaskStatus::Active));
        assert_eq!(TaskStatus::from_str_opt("completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_str_opt("done"), None);
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_task_type_serializes_snake_case() {
        let json = serde_json::to_string(&TaskType::SpecificDate).unwrap();
        assert_eq!(json, "\"specific_date\"");
        assert_eq!(TaskType::from_str_opt("daily"), Some(TaskType::Daily));
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            effort_hours: Some(3.0),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
