//! User command implementation.

use chrono::Utc;
use colored::Colorize;

use super::Session;
use crate::cli::args::{OutputFormat, UserCommands};
use crate::error::StudyError;
use crate::output::{format_user, format_users, to_json};
use crate::storage::UserStore;
use crate::users::{NewUser, UserPatch};

/// Execute user subcommands.
///
/// # Errors
///
/// Returns validation, lookup or database errors.
pub fn user(session: &Session, cmd: UserCommands) -> Result<String, StudyError> {
    let store = UserStore::new(&session.db);

    match cmd {
        UserCommands::Register {
            name,
            email,
            timezone,
        } => {
            let mut new_user = NewUser::new(name, email);
            new_user.timezone = timezone;
            let user = store.register(new_user, Utc::now())?;
            match session.format {
                OutputFormat::Json => to_json(&user),
                OutputFormat::Pretty => Ok(format!(
                    "{} {} <{}> (#{})",
                    "Registered".green(),
                    user.name.bold(),
                    user.email,
                    user.id
                )),
            }
        },
        UserCommands::List => format_users(&store.list()?, session.format),
        UserCommands::Show => format_user(&session.active_user()?, session.format),
        UserCommands::Update {
            name,
            timezone,
            notification_time,
            reminder_offset,
        } => {
            let patch = UserPatch {
                name,
                timezone,
                notification_time,
                reminder_offset,
            };
            if patch == UserPatch::default() {
                return Err(StudyError::Validation("nothing to update".to_string()));
            }
            let active = session.active_user()?;
            let updated = store.update(active.id, patch)?;
            format_user(&updated, session.format)
        },
    }
}
