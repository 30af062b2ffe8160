//! User persistence.

use chrono::{DateTime, Utc};
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use super::database::{format_timestamp, parse_timestamp};
use super::Database;
use crate::error::StudyError;
use crate::users::{
    NewUser, User, UserPatch, DEFAULT_NOTIFICATION_TIME, DEFAULT_REMINDER_OFFSET,
    DEFAULT_TIMEZONE,
};

const USER_COLUMNS: &str =
    "id, name, email, timezone, notification_time, reminder_offset, created_at";

/// Storage for registered users.
pub struct UserStore<'a> {
    db: &'a Database,
}

impl<'a> UserStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for bad input, `Conflict` if the email is taken,
    /// or `Database` on query failure.
    pub fn register(&self, user: NewUser, now: DateTime<Utc>) -> Result<User, StudyError> {
        let user = user.validated()?;
        let timezone = user
            .timezone
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO users (name, email, timezone, notification_time, reminder_offset, created_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.name,
                user.email,
                timezone,
                DEFAULT_NOTIFICATION_TIME,
                DEFAULT_REMINDER_OFFSET,
                format_timestamp(now),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                StudyError::Conflict(format!("email {} is already registered", user.email))
            },
            e => StudyError::Database(format!("Failed to insert user: {e}")),
        })?;

        let id = conn.last_insert_rowid();
        tracing::debug!(user_id = id, "registered user");
        self.get(id)
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such user.
    pub fn get(&self, id: i64) -> Result<User, StudyError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
                row_to_user,
            )
            .optional()
            .map_err(|e| StudyError::Database(format!("Failed to query user: {e}")))?
            .ok_or_else(|| StudyError::NotFound(format!("user {id}")))
    }

    /// Find a user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StudyError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                [email.trim().to_lowercase()],
                row_to_user,
            )
            .optional()
            .map_err(|e| StudyError::Database(format!("Failed to query user: {e}")))
    }

    /// All users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<User>, StudyError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_user)
            .map_err(|e| StudyError::Database(format!("Failed to query users: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }

    /// Apply a profile update.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `NotFound` or `Database` errors.
    pub fn update(&self, id: i64, patch: UserPatch) -> Result<User, StudyError> {
        let patch = patch.validated()?;
        let mut user = self.get(id)?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(timezone) = patch.timezone {
            user.timezone = timezone;
        }
        if let Some(time) = patch.notification_time {
            user.notification_time = time;
        }
        if let Some(offset) = patch.reminder_offset {
            user.reminder_offset = offset;
        }

        self.db
            .connection()
            .execute(
                r"UPDATE users SET name = ?1, timezone = ?2, notification_time = ?3, reminder_offset = ?4
                  WHERE id = ?5",
                params![
                    user.name,
                    user.timezone,
                    user.notification_time,
                    user.reminder_offset,
                    id
                ],
            )
            .map_err(|e| StudyError::Database(format!("Failed to update user: {e}")))?;

        Ok(user)
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at: String = row.get(6)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        timezone: row.get(3)?,
        notification_time: row.get(4)?,
        reminder_offset: row.get(5)?,
        created_at: parse_timestamp(6, &created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let db = Database::open_in_memory().unwrap();
        let store = UserStore::new(&db);

        let user = store
            .register(NewUser::new("Ada", "Ada@Example.com"), Utc::now())
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.timezone, "UTC");
        assert_eq!(user.notification_time, "20:00");
        assert_eq!(user.reminder_offset, 30);

        assert_eq!(store.get(user.id).unwrap(), user);
        assert_eq!(
            store.find_by_email("ADA@example.com").unwrap().unwrap().id,
            user.id
        );
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let db = Database::open_in_memory().unwrap();
        let store = UserStore::new(&db);

        store
            .register(NewUser::new("Ada", "ada@example.com"), Utc::now())
            .unwrap();
        let err = store
            .register(NewUser::new("Other Ada", "ada@example.com"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, StudyError::Conflict(_)));
    }

    #[test]
    fn test_update_profile() {
        let db = Database::open_in_memory().unwrap();
        let store = UserStore::new(&db);
        let user = store
            .register(NewUser::new("Ada", "ada@example.com"), Utc::now())
            .unwrap();

        let updated = store
            .update(
                user.id,
                UserPatch {
                    timezone: Some("Europe/London".to_string()),
                    reminder_offset: Some(60),
                    ..UserPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.timezone, "Europe/London");
        assert_eq!(updated.reminder_offset, 60);
        assert_eq!(store.get(user.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_user() {
        let db = Database::open_in_memory().unwrap();
        let store = UserStore::new(&db);
        assert!(matches!(store.get(99), Err(StudyError::NotFound(_))));
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }
}
