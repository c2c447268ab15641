//! Date helpers — parsing, formatting, recurrence stepping and calendar windows.
//!
//! Every function that depends on "today" takes it as an argument; nothing in
//! here reads the system clock.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};

use smartsched_core::{Result, SchedError};

use crate::tasks::RecurrenceType;

/// chrono pattern for `dd-MM-yyyy HH:mm`.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Shape of an accepted date-time, `d` = ASCII digit.
const DATE_TIME_SHAPE: &[u8] = b"dd-dd-dddd dd:dd";

/// Parse `dd-MM-yyyy HH:mm`. Fields must be zero-padded and in range.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let text = input.trim();
    let shape_ok = text.len() == DATE_TIME_SHAPE.len()
        && text
            .bytes()
            .zip(DATE_TIME_SHAPE)
            .all(|(c, s)| if *s == b'd' { c.is_ascii_digit() } else { c == *s });
    if !shape_ok {
        return Err(SchedError::InvalidDateFormat(text.to_string()));
    }
    NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
        .map_err(|_| SchedError::InvalidDateFormat(text.to_string()))
}

/// Format as `dd-MM-yyyy HH:mm`.
pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

/// Advance `date` by exactly one recurrence period.
///
/// Months clamp to the last valid day (31 Jan → 28/29 Feb). `None` and
/// arithmetic overflow both return `date` unchanged.
pub fn increment_date(date: NaiveDate, recurrence: RecurrenceType) -> NaiveDate {
    match recurrence {
        RecurrenceType::None => date,
        RecurrenceType::Daily => date.checked_add_signed(Duration::days(1)).unwrap_or(date),
        RecurrenceType::Weekly => date.checked_add_signed(Duration::weeks(1)).unwrap_or(date),
        RecurrenceType::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
    }
}

/// [`increment_date`] for a full date-time; the time of day is kept.
pub fn increment_date_time(date_time: NaiveDateTime, recurrence: RecurrenceType) -> NaiveDateTime {
    match recurrence {
        RecurrenceType::None => date_time,
        RecurrenceType::Daily => date_time
            .checked_add_signed(Duration::days(1))
            .unwrap_or(date_time),
        RecurrenceType::Weekly => date_time
            .checked_add_signed(Duration::weeks(1))
            .unwrap_or(date_time),
        RecurrenceType::Monthly => date_time
            .checked_add_months(Months::new(1))
            .unwrap_or(date_time),
    }
}

/// Roll `date` forward by whole periods until it is not before `floor`.
///
/// Non-recurring dates are returned as-is, even when they lie before `floor`.
pub fn project_date(date: NaiveDate, recurrence: RecurrenceType, floor: NaiveDate) -> NaiveDate {
    let skip = whole_periods_behind((floor - date).num_days(), recurrence);
    let start = date
        .checked_add_signed(Duration::days(skip))
        .unwrap_or(date);
    step_until(start, floor, |d| increment_date(d, recurrence))
}

/// Roll `date_time` forward by whole periods until it is not before `floor`.
pub fn project_date_time(
    date_time: NaiveDateTime,
    recurrence: RecurrenceType,
    floor: NaiveDateTime,
) -> NaiveDateTime {
    let skip = whole_periods_behind((floor - date_time).num_days(), recurrence);
    let start = date_time
        .checked_add_signed(Duration::days(skip))
        .unwrap_or(date_time);
    step_until(start, floor, |dt| increment_date_time(dt, recurrence))
}

/// Days that can be skipped in one jump without overshooting: a whole number
/// of fixed-length periods strictly inside the gap. Months are stepped.
fn whole_periods_behind(days_behind: i64, recurrence: RecurrenceType) -> i64 {
    match recurrence.period_days() {
        Some(step) if days_behind > step => (days_behind - 1) / step * step,
        _ => 0,
    }
}

fn step_until<T, F>(mut value: T, floor: T, step: F) -> T
where
    T: PartialOrd + Copy,
    F: Fn(T) -> T,
{
    while value < floor {
        let next = step(value);
        // None recurrence, or overflow at the edge of the calendar
        if next <= value {
            break;
        }
        value = next;
    }
    value
}

/// Render a duration as `D days, H hours, M minutes`, or `Expired` when it is
/// zero or negative.
pub fn format_duration(duration: Duration) -> String {
    if duration <= Duration::zero() {
        return "Expired".to_string();
    }
    let days = duration.num_days();
    let hours = duration.num_hours() % 24;
    let minutes = duration.num_minutes() % 60;
    format!("{days} days, {hours} hours, {minutes} minutes")
}

/// Monday on or before `today`.
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    let back = i64::from(today.weekday().num_days_from_monday());
    today - Duration::days(back)
}

/// Sunday on or after `today`. Weeks run Monday through Sunday.
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    start_of_week(today) + Duration::days(6)
}

pub fn start_of_month(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

pub fn end_of_month(today: NaiveDate) -> NaiveDate {
    start_of_month(today)
        .checked_add_months(Months::new(1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(today)
}
