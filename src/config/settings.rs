//! Configuration settings for smartstudy.
//!
//! Settings are loaded from `~/.smartstudy/config.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::core::{DEFAULT_HEATMAP_DAYS, DEFAULT_STREAK_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::error::StudyError;
use crate::tasks::{normalize_category, DEFAULT_CATEGORY};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Task defaults.
    pub tasks: TasksConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Email of the user commands act as when `--user` is not given.
    #[serde(default)]
    pub default_user: Option<String>,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Task defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TasksConfig {
    /// Category given to tasks created without one.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Replicate completed daily tasks before listing.
    #[serde(default = "default_true")]
    pub auto_spawn_daily: bool,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatsConfig {
    /// Days covered by `stats heatmap` when `--days` is not given.
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: u32,
    /// Trailing window of completion dates considered for streaks.
    #[serde(default = "default_streak_window")]
    pub streak_window_days: u32,
    /// Short consistency window shown on the dashboard.
    #[serde(default = "default_short_consistency")]
    pub short_consistency_days: u32,
    /// Long consistency window shown on the dashboard.
    #[serde(default = "default_long_consistency")]
    pub long_consistency_days: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_heatmap_days() -> u32 {
    DEFAULT_HEATMAP_DAYS
}

const fn default_streak_window() -> u32 {
    DEFAULT_STREAK_WINDOW_DAYS
}

const fn default_short_consistency() -> u32 {
    7
}

const fn default_long_consistency() -> u32 {
    30
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            default_user: None,
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            auto_spawn_daily: default_true(),
        }
    }
}

impl StatsConfig {
    /// Check every window against the longest supported span.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Config` naming the first window that is too long.
    pub fn validate(&self) -> Result<(), StudyError> {
        let windows = [
            ("stats.heatmap_days", self.heatmap_days),
            ("stats.streak_window_days", self.streak_window_days),
            ("stats.short_consistency_days", self.short_consistency_days),
            ("stats.long_consistency_days", self.long_consistency_days),
        ];
        for (key, days) in windows {
            if days > MAX_WINDOW_DAYS {
                return Err(StudyError::Config(format!(
                    "{key} must be at most {MAX_WINDOW_DAYS}, got {days}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            heatmap_days: default_heatmap_days(),
            streak_window_days: default_streak_window(),
            short_consistency_days: default_short_consistency(),
            long_consistency_days: default_long_consistency(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default category is invalid.
    pub fn load_from_path(path: &Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let mut config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.tasks.default_category =
            normalize_category(Some(&config.tasks.default_category)).map_err(|e| {
                StudyError::Config(format!("tasks.default_category: {e}"))
            })?;
        config.stats.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StudyError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
