//! Storage layer for smartstudy.
//!
//! This module provides SQLite-based persistence for:
//! - Users (profile and reminder settings)
//! - Tasks (study work with derived priority scores)

mod database;
mod migrations;
mod tasks;
mod users;

pub use database::Database;
pub use tasks::TaskStore;
pub use users::UserStore;
