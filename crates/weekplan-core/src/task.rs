//! Task records read by the planner.
//!
//! Tasks are owned by the surrounding application; the planner only reads them
//! and copies them into placements.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Importance of a task. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "CodeOrName")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Decode the `LOW=0, MEDIUM=1, HIGH=2` integer form.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "CodeOrName")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Decode the `PENDING=0 .. CANCELLED=3` integer form.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::InProgress),
            2 => Some(Self::Completed),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Pending or in progress.
    pub fn is_open(self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Area of life a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "CodeOrName")]
pub enum TaskCategory {
    Study,
    Work,
    Home,
    Health,
    Leisure,
    #[default]
    Other,
}

impl TaskCategory {
    /// Decode the `STUDY=0 .. OTHER=5` integer form.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Study),
            1 => Some(Self::Work),
            2 => Some(Self::Home),
            3 => Some(Self::Health),
            4 => Some(Self::Leisure),
            5 => Some(Self::Other),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "STUDY" => Some(Self::Study),
            "WORK" => Some(Self::Work),
            "HOME" => Some(Self::Home),
            "HEALTH" => Some(Self::Health),
            "LEISURE" => Some(Self::Leisure),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Wire form accepted for category, priority and status: either the integer code or the name.
#[derive(Deserialize)]
#[serde(untagged)]
enum CodeOrName {
    Code(u8),
    Name(String),
}

impl TryFrom<CodeOrName> for TaskPriority {
    type Error = String;

    fn try_from(value: CodeOrName) -> Result<Self, Self::Error> {
        match value {
            CodeOrName::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown priority code {code}"))
            }
            CodeOrName::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown priority '{name}'"))
            }
        }
    }
}

impl TryFrom<CodeOrName> for TaskCategory {
    type Error = String;

    fn try_from(value: CodeOrName) -> Result<Self, Self::Error> {
        match value {
            CodeOrName::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown category code {code}"))
            }
            CodeOrName::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown category '{name}'"))
            }
        }
    }
}

impl TryFrom<CodeOrName> for TaskStatus {
    type Error = String;

    fn try_from(value: CodeOrName) -> Result<Self, Self::Error> {
        match value {
            CodeOrName::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown status code {code}"))
            }
            CodeOrName::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown status '{name}'"))
            }
        }
    }
}

/// A unit of pending work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    /// Estimated duration in minutes; must be positive to be scheduled
    pub estimated_minutes: i32,
    /// Time actually spent, if tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_minutes: Option<i32>,
    #[serde(deserialize_with = "deserialize_deadline")]
    pub deadline: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task in the `Other` category.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        estimated_minutes: i32,
        priority: TaskPriority,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: TaskCategory::Other,
            priority,
            status: TaskStatus::Pending,
            estimated_minutes,
            actual_minutes: None,
            deadline,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Open status and a positive duration.
    pub fn is_schedulable(&self) -> bool {
        self.status.is_open() && self.estimated_minutes > 0
    }
}

/// Parse a deadline given as RFC 3339, a naive timestamp (read as UTC), or a bare date.
pub fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid deadline '{raw}'")))
}
