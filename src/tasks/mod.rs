//! Study task model.
//!
//! Tasks carry their own derived priority score; see [`crate::core::priority`].

mod types;
mod validation;

pub use types::{ListFilter, NewTask, Task, TaskPatch, TaskStatus, TaskType, DEFAULT_CATEGORY};
pub use validation::{normalize_category, validate_new_task, validate_patch};
