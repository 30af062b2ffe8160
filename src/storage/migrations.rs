//! Database migrations for smartstudy.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::StudyError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StudyError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StudyError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StudyError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StudyError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StudyError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), StudyError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StudyError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: users and tasks.
///
/// Timestamps are RFC 3339 UTC text with microsecond precision, so string
/// comparison orders them chronologically.
fn migrate_v1(conn: &Connection) -> Result<(), StudyError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            timezone TEXT NOT NULL DEFAULT 'UTC',
            notification_time TEXT NOT NULL DEFAULT '20:00',
            reminder_offset INTEGER NOT NULL DEFAULT 30,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT 'general',
            due_date TEXT NOT NULL,
            effort_hours REAL NOT NULL,
            complexity_level INTEGER NOT NULL,
            task_type TEXT NOT NULL DEFAULT 'specific_date',
            requires_proof INTEGER NOT NULL DEFAULT 0,
            priority_score REAL NOT NULL DEFAULT 0.0,
            status TEXT NOT NULL DEFAULT 'active',
            completed_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK ((status = 'completed') = (completed_at IS NOT NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_user_status
        ON tasks(user_id, status);

        CREATE INDEX IF NOT EXISTS idx_tasks_user_completed
        ON tasks(user_id, completed_at);
        ",
    )
    .map_err(|e| StudyError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO users (name, email, created_at) VALUES ('Ada', 'ada@example.com', '2026-01-01T00:00:00.000000Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO tasks (user_id, title, due_date, effort_hours, complexity_level, created_at, updated_at)
             VALUES (1, 'Essay', '2026-01-05T00:00:00.000000Z', 3.0, 2, '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_completed_at_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (name, email, created_at) VALUES ('Ada', 'ada@example.com', '2026-01-01T00:00:00.000000Z')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO tasks (user_id, title, due_date, effort_hours, complexity_level, status, created_at, updated_at)
             VALUES (1, 'Essay', '2026-01-05T00:00:00.000000Z', 3.0, 2, 'completed', '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
