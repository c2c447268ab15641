//! Task definitions — the core data model and its time-relative status.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use smartsched_core::SchedError;

use crate::dates;

/// How often a task repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceType {
    /// Whether the task repeats at all.
    pub fn is_recurring(self) -> bool {
        self != RecurrenceType::None
    }

    /// Length of the period in days, for fixed-length periods only.
    pub fn period_days(self) -> Option<i64> {
        match self {
            RecurrenceType::Daily => Some(1),
            RecurrenceType::Weekly => Some(7),
            RecurrenceType::None | RecurrenceType::Monthly => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceType::None => "NONE",
            RecurrenceType::Daily => "DAILY",
            RecurrenceType::Weekly => "WEEKLY",
            RecurrenceType::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceType {
    type Err = SchedError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(RecurrenceType::None),
            "DAILY" => Ok(RecurrenceType::Daily),
            "WEEKLY" => Ok(RecurrenceType::Weekly),
            "MONTHLY" => Ok(RecurrenceType::Monthly),
            _ => Err(SchedError::InvalidRecurrence(s.trim().to_string())),
        }
    }
}

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID, never reused.
    id: String,
    /// Human-readable name.
    pub name: String,
    /// Deadline, local time.
    pub due_date_time: NaiveDateTime,
    /// Set once at construction.
    created_at: NaiveDateTime,
    #[serde(default)]
    pub recurrence: RecurrenceType,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Create a task with a fresh ID; `created_at` is the caller's "now".
    pub fn new(
        name: &str,
        due_date_time: NaiveDateTime,
        recurrence: RecurrenceType,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            due_date_time,
            created_at,
            recurrence,
            done: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Overdue relative to `now`.
    ///
    /// Recurring tasks project their due date forward to today first, so they
    /// are only overdue if the projection cannot reach today.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        if !self.recurrence.is_recurring() {
            return self.due_date_time < now;
        }
        let today = now.date();
        dates::project_date(self.due_date_time.date(), self.recurrence, today) < today
    }

    /// Raw deadline check, ignoring recurrence.
    pub fn is_past_due(&self, now: NaiveDateTime) -> bool {
        self.due_date_time < now
    }

    /// Smallest `due + k·period` that is not before `now`.
    ///
    /// Non-recurring tasks always report their own deadline, past or not.
    pub fn next_due_date(&self, now: NaiveDateTime) -> NaiveDateTime {
        dates::project_date_time(self.due_date_time, self.recurrence, now)
    }

    /// Human-readable time left until the next occurrence.
    pub fn time_remaining(&self, now: NaiveDateTime) -> String {
        if !self.recurrence.is_recurring() && self.due_date_time < now {
            return "Overdue".to_string();
        }
        let left = self.next_due_date(now) - now;
        let text = dates::format_duration(left);
        if left > Duration::zero() {
            format!("{text} left")
        } else {
            text
        }
    }

    /// Short urgency tag, empty when nothing is imminent.
    pub fn due_soon_label(&self, now: NaiveDateTime) -> &'static str {
        let left = self.next_due_date(now) - now;
        if left < Duration::zero() {
            "Overdue"
        } else if left <= Duration::hours(1) {
            "Due in Less than 1 Hour"
        } else if left <= Duration::hours(24) {
            "Due Today"
        } else {
            ""
        }
    }

    fn status(&self, now: NaiveDateTime) -> &'static str {
        if self.done {
            "Done"
        } else if self.is_overdue(now) {
            "Overdue"
        } else {
            "Active"
        }
    }

    /// Multi-line display block.
    pub fn render(&self, now: NaiveDateTime) -> String {
        format!(
            "[{}] {}\nDue: {}\nCreated: {}\nStatus: {}\nTime Left: {}\nRecurs: {}",
            self.id,
            self.name,
            dates::format_date_time(self.due_date_time),
            dates::format_date_time(self.created_at),
            self.status(now),
            self.time_remaining(now),
            self.recurrence,
        )
    }
}
