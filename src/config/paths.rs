//! Path resolution for smartstudy configuration and data files.
//!
//! All smartstudy data is stored in `~/.smartstudy/` (or `$SMARTSTUDY_HOME`):
//! - `config.yaml` - Main configuration file
//! - `smartstudy.db` - SQLite database for users and tasks

use std::path::PathBuf;

use crate::error::StudyError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "SMARTSTUDY_HOME";

/// Paths to smartstudy configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.smartstudy/`
    pub root: PathBuf,
    /// Config file: `~/.smartstudy/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.smartstudy/smartstudy.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$SMARTSTUDY_HOME`, falling back to `~/.smartstudy`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StudyError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StudyError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".smartstudy")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("smartstudy.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudyError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-smartstudy");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("smartstudy.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("home"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op.
        paths.ensure_dirs().unwrap();
    }
}
