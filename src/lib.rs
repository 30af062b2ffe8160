//! smartstudy - A study task manager
//!
//! This crate provides priority scoring for study tasks, streak and activity
//! analytics over completions, and a command-line interface backed by a
//! local SQLite database.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;
pub mod users;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use core::{calculate_priority, calculate_priority_at, StreakEngine};
pub use error::StudyError;
pub use features::stats::{StatsCollector, SummaryMetrics};
pub use storage::{Database, TaskStore, UserStore};
