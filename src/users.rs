//! Registered users and their profile settings.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|e| panic!("Invalid email regex: {e}"))
});

static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap_or_else(|e| panic!("Invalid clock regex: {e}"))
});

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_NOTIFICATION_TIME: &str = "20:00";
pub const DEFAULT_REMINDER_OFFSET: u32 = 30;
const REMINDER_OFFSET_RANGE: std::ops::RangeInclusive<u32> = 5..=120;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub timezone: String,
    /// Daily reminder time, `HH:MM`.
    pub notification_time: String,
    /// Minutes before a due date to remind.
    pub reminder_offset: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub timezone: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            timezone: None,
        }
    }

    /// Trim and validate; the email is lowercased.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` for a blank or overlong name, a
    /// malformed email, or an unknown timezone.
    pub fn validated(self) -> Result<Self, StudyError> {
        Ok(Self {
            name: validate_name(&self.name)?,
            email: validate_email(&self.email)?,
            timezone: self.timezone.as_deref().map(validate_timezone).transpose()?,
        })
    }
}

/// Profile changes. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub notification_time: Option<String>,
    pub reminder_offset: Option<u32>,
}

impl UserPatch {
    /// Validate the fields this patch sets.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` describing the first bad field.
    pub fn validated(self) -> Result<Self, StudyError> {
        if let Some(offset) = self.reminder_offset {
            if !REMINDER_OFFSET_RANGE.contains(&offset) {
                return Err(StudyError::Validation(format!(
                    "reminder_offset must be between {} and {} minutes, got {offset}",
                    REMINDER_OFFSET_RANGE.start(),
                    REMINDER_OFFSET_RANGE.end()
                )));
            }
        }

        let notification_time = match self.notification_time {
            Some(t) if !CLOCK_RE.is_match(t.trim()) => {
                return Err(StudyError::Validation(format!(
                    "notification_time must be HH:MM, got {t:?}"
                )))
            }
            other => other.map(|t| t.trim().to_string()),
        };

        Ok(Self {
            name: self.name.as_deref().map(validate_name).transpose()?,
            timezone: self.timezone.as_deref().map(validate_timezone).transpose()?,
            notification_time,
            reminder_offset: self.reminder_offset,
        })
    }
}

fn validate_name(name: &str) -> Result<String, StudyError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(StudyError::Validation(format!(
            "name must be 1 to {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, StudyError> {
    let email = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(StudyError::Validation(format!("invalid email address: {email}")));
    }
    Ok(email)
}

/// Accept only IANA zone names, returned in their canonical spelling.
fn validate_timezone(tz: &str) -> Result<String, StudyError> {
    let tz = tz.trim();
    let zone: Tz = tz
        .parse()
        .map_err(|_| StudyError::Validation(format!("unknown timezone: {tz:?}")))?;
    Ok(zone.name().to_string())
}
