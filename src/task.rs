//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single
//! marketing task in the monthly playbook, along with the time-estimate
//! value type and the draft used when adding a custom task.

use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Estimated effort for a task, as hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTime {
    pub hours: u8,
    pub minutes: u8,
}

impl TaskTime {
    pub fn new(hours: u8, minutes: u8) -> Self {
        TaskTime { hours, minutes }
    }

    /// Total estimate in minutes, used by the time sort key and rollups.
    pub fn total_minutes(self) -> u32 {
        self.hours as u32 * 60 + self.minutes as u32
    }
}

/// A single marketing task in the current playbook.
///
/// `completed` and `skipped` are never both true; the toggle operations in
/// `catalog` enforce this. Everything apart from the two flags is fixed at
/// creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub frequency: Frequency,
    /// Occurrence count within the frequency window, e.g. "4" for four
    /// times a week. Opaque to filtering.
    pub frequency_detail: String,
    /// Display string such as "$15" or "$25+".
    pub cost: String,
    pub time: TaskTime,
    pub description: String,
    pub resources: Vec<String>,
    #[serde(default)]
    pub recommendation: Recommendation,
    pub completed: bool,
    pub skipped: bool,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

impl Task {
    /// True when the task is neither completed nor skipped.
    pub fn is_pending(&self) -> bool {
        !self.completed && !self.skipped
    }
}

/// User input for a custom task, before validation and id assignment.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub category: Option<String>,
    pub frequency: Frequency,
    pub frequency_detail: Option<String>,
    pub cost: String,
    pub time: TaskTime,
    pub description: Option<String>,
}

impl Default for TaskTime {
    fn default() -> Self {
        TaskTime { hours: 0, minutes: 30 }
    }
}
