//! Configuration management for smartstudy.
//!
//! This module handles loading and saving configuration from `~/.smartstudy/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StatsConfig, TasksConfig};
