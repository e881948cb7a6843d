//! Task data model

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_CATEGORY: &str = "default";

/// On-disk format of `created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// On-disk and user-facing format of `due_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    /// Parse priority from text
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Some(Self::High),
            "normal" | "n" | "medium" => Some(Self::Normal),
            "low" | "l" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }

    /// Short marker used in list rows
    pub fn marker(&self) -> &'static str {
        match self {
            Self::High => "!",
            Self::Normal => " ",
            Self::Low => "·",
        }
    }

    /// Cycle high -> normal -> low -> high
    pub fn next(&self) -> Self {
        match self {
            Self::High => Self::Normal,
            Self::Normal => Self::Low,
            Self::Low => Self::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task. Its identity is its position in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub content: String,

    #[serde(default)]
    pub completed: bool,

    /// Local time of creation, second precision
    #[serde(alias = "create_time", with = "timestamp")]
    pub created_at: NaiveDateTime,

    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Task {
    /// Build a task from creation parameters, stamped with the current local time.
    pub fn create(new: NewTask) -> Self {
        Self {
            content: new.content,
            completed: false,
            created_at: now_seconds(),
            due_date: new.due_date,
            priority: new.priority,
            category: new.category,
        }
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }

    /// Past its due date and still pending
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.completed,
            None => false,
        }
    }

    pub fn status_mark(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }

    /// One-line plain text rendering
    pub fn to_line(&self) -> String {
        let mut line = format!("{} {}", self.status_mark(), self.content);

        if let Some(due) = &self.due_date {
            line.push_str(&format!(" (due: {})", due.format(DATE_FORMAT)));
        }
        if self.priority != Priority::Normal {
            line.push_str(&format!(" [{}]", self.priority));
        }
        if self.category != DEFAULT_CATEGORY {
            line.push_str(&format!(" #{}", self.category));
        }

        line
    }
}

/// Parameters for a task that has not been added yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub content: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: String,
}

impl NewTask {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            due_date: None,
            priority: Priority::default(),
            category: default_category(),
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();

        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_local()))
            .map_err(serde::de::Error::custom)
    }
}
