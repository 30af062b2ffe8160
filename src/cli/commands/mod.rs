//! Command implementations for smartstudy.
//!
//! This module contains the implementation of all CLI commands. Each command
//! returns the text to print; `main` owns stdout.

mod completions;
mod stats;
mod task;
mod user;

pub use completions::completions;
pub use stats::stats;
pub use task::task;
pub use user::user;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::StudyError;
use crate::storage::{Database, UserStore};
use crate::users::User;

/// Everything a command needs: the open database, loaded config, resolved
/// output format and the requested user.
pub struct Session {
    pub db: Database,
    pub config: Config,
    pub format: OutputFormat,
    user_email: Option<String>,
}

impl Session {
    /// Build a session. `user_email` is the `--user` / `SMARTSTUDY_USER`
    /// value; `format` overrides `general.default_output` when given.
    #[must_use]
    pub fn new(
        db: Database,
        config: Config,
        format: Option<OutputFormat>,
        user_email: Option<String>,
    ) -> Self {
        let format = format.unwrap_or(config.general.default_output);
        Self {
            db,
            config,
            format,
            user_email,
        }
    }

    /// Email of the user commands act as, if any was configured.
    #[must_use]
    pub fn requested_user(&self) -> Option<&str> {
        self.user_email
            .as_deref()
            .or(self.config.general.default_user.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Resolve the active user.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveUser` when no user was requested, or `NotFound` when
    /// the requested email is not registered.
    pub fn active_user(&self) -> Result<User, StudyError> {
        let email = self.requested_user().ok_or(StudyError::NoActiveUser)?;
        UserStore::new(&self.db)
            .find_by_email(email)?
            .ok_or_else(|| StudyError::NotFound(format!("user {email}")))
    }
}
