//! Due date parsing.
//!
//! Accepts RFC 3339 timestamps, zone-less timestamps (taken as UTC), and
//! natural expressions such as `tomorrow 3pm`, `friday`, `in 3 days`,
//! `in 6 hours` or `dec 15`. Dates without a time of day resolve to the end
//! of that UTC day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a due date relative to `now`.
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_due_date(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return in_supported_range(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return in_supported_range(naive.and_utc());
        }
    }

    let input = input.to_lowercase();

    if let Some(dt) = parse_hours_offset(&input, now) {
        return in_supported_range(dt);
    }

    let (date_part, time) = extract_time(&input);
    let date = if date_part.is_empty() {
        now.date_naive()
    } else {
        parse_date(&date_part, now.date_naive())?
    };

    let time = time.unwrap_or_else(end_of_day);
    in_supported_range(NaiveDateTime::new(date, time).and_utc())
}

/// Stored timestamps are RFC 3339, which only has room for years 1 to 9999.
#[must_use]
pub fn is_storable(dt: DateTime<Utc>) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&dt.year())
}

fn in_supported_range(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    is_storable(dt).then_some(dt)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}

/// Parse a calendar date expression.
fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();

    match input {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {},
    }

    if let Some(date) = parse_relative_offset(input, today) {
        return Some(date);
    }

    if let Some(date) = parse_weekday(input, today) {
        return Some(date);
    }

    if input == "next week" {
        let days_until_monday = (i64::from(Weekday::Mon.num_days_from_sunday())
            - i64::from(today.weekday().num_days_from_sunday())
            + 7)
            % 7;
        let days = if days_until_monday == 0 { 7 } else { days_until_monday };
        return Some(today + Duration::days(days));
    }

    if let Some(date) = parse_month_day(input, today) {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    None
}

/// `in N hours` / `in N minutes`, relative to the current instant.
fn parse_hours_offset(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: i64 = parts[1].parse().ok()?;
    let offset = match parts[2].trim_end_matches('s') {
        "hour" => Duration::try_hours(amount)?,
        "minute" | "min" => Duration::try_minutes(amount)?,
        _ => return None,
    };
    now.checked_add_signed(offset)
}

/// `in N days/weeks/months`.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() >= 3 && parts[0] == "in" {
        let amount: i64 = parts[1].parse().ok()?;
        let days = match parts[2].trim_end_matches('s') {
            "day" => Some(amount),
            "week" => amount.checked_mul(7),
            "month" => amount.checked_mul(30),
            _ => return None,
        }?;
        return today.checked_add_signed(Duration::try_days(days)?);
    }

    None
}

fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_next, day_str) = input
        .strip_prefix("next ")
        .map_or((false, input), |rest| (true, rest));

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_until = (i64::from(target.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday())
        + 7)
        % 7;

    // Same weekday means next week's; "next" always skips a week.
    if days_until == 0 || is_next {
        days_until += 7;
    }

    Some(today + Duration::days(days_until))
}

fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        return NaiveDate::from_ymd_opt(today.year() + 1, month, day);
    }
    Some(date)
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Split a trailing time of day off the input.
fn extract_time(input: &str) -> (String, Option<NaiveTime>) {
    let input = input.replace(" at ", " ").replace(" @ ", " ");
    let parts: Vec<&str> = input.split_whitespace().collect();

    if let Some((last, rest)) = parts.split_last() {
        if let Some(time) = parse_time(last) {
            return (rest.join(" "), Some(time));
        }
    }

    (input, None)
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    match input {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return Some(time);
    }

    let (time_str, is_pm) = if let Some(t) = input.strip_suffix("pm") {
        (t, true)
    } else if let Some(t) = input.strip_suffix("am") {
        (t, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (h, true) if h < 12 => h + 12,
        (h, _) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
