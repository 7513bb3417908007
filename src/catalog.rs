//! Playbook storage and task mutations.
//!
//! This module provides the `Playbook` struct that owns the task catalog
//! for the current month, the complete/skip toggle operations, validation
//! for user-added custom tasks, and display formatting helpers.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::fields::*;
use crate::playbook::{seeded_playbook, BusinessProfile};
use crate::task::{Task, TaskDraft};

/// The playbook for one month: business profile, display counters and the
/// full task catalog. Persisted as a single JSON file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Playbook {
    /// Month label such as "April 2023".
    pub month: String,
    /// Consecutive months of playbook optimization. Display only.
    #[serde(default)]
    pub streak: u32,
    /// Generations consumed so far. Display only, never enforced.
    #[serde(default)]
    pub generations_used: u32,
    #[serde(default = "default_generation_limit")]
    pub generation_limit: u32,
    #[serde(default)]
    pub profile: BusinessProfile,
    pub tasks: Vec<Task>,
}

fn default_generation_limit() -> u32 {
    100
}

impl Playbook {
    /// Load the playbook from a JSON file, falling back to a freshly
    /// seeded playbook if the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return seeded_playbook();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(pb) => pb,
                Err(e) => {
                    eprintln!("Error parsing playbook, starting fresh: {e}");
                    seeded_playbook()
                }
            },
            Err(e) => {
                eprintln!("Error reading playbook, starting fresh: {e}");
                seeded_playbook()
            }
        }
    }

    /// Save the playbook using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// Flip a task's completed flag.
///
/// Marking a task completed clears the skipped flag; toggling an already
/// completed task un-marks it. Returns the updated record, leaving the
/// input untouched; callers commit the result back into the catalog.
pub fn toggle_complete(task: &Task) -> Task {
    let mut next = task.clone();
    next.completed = !task.completed;
    if next.completed {
        next.skipped = false;
    }
    next.updated_at_utc = Utc::now().timestamp();
    next
}

/// Flip a task's skipped flag, clearing completed when the new value is
/// true. Same contract as [`toggle_complete`].
pub fn toggle_skip(task: &Task) -> Task {
    let mut next = task.clone();
    next.skipped = !task.skipped;
    if next.skipped {
        next.completed = false;
    }
    next.updated_at_utc = Utc::now().timestamp();
    next
}

/// Rejected custom-task submission. The catalog is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a draft and append it to the catalog as a new pending task.
///
/// Returns the id of the new task. A whitespace-only title is rejected
/// without mutating the catalog.
pub fn add_custom_task(playbook: &mut Playbook, draft: TaskDraft) -> Result<u64, ValidationError> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(ValidationError("title required".to_string()));
    }

    let now_utc = Utc::now().timestamp();
    let id = playbook.next_id();
    playbook.tasks.push(Task {
        id,
        title,
        category: draft.category.unwrap_or_else(|| "Custom".to_string()),
        frequency: draft.frequency,
        frequency_detail: draft.frequency_detail.unwrap_or_else(|| "1".to_string()),
        cost: draft.cost,
        time: draft.time,
        description: draft
            .description
            .unwrap_or_else(|| "Custom task added by user".to_string()),
        resources: Vec::new(),
        recommendation: Recommendation::Diy,
        completed: false,
        skipped: false,
        created_at_utc: now_utc,
        updated_at_utc: now_utc,
    });
    Ok(id)
}

/// Format a frequency for display.
pub fn format_frequency(f: Frequency) -> &'static str {
    match f {
        Frequency::OneTime => "One Time",
        Frequency::Daily => "Daily",
        Frequency::Weekly => "Weekly",
        Frequency::Monthly => "Monthly",
        Frequency::Yearly => "Yearly",
    }
}

/// Format a task's status flags for display.
pub fn format_status(task: &Task) -> &'static str {
    if task.completed {
        "Completed"
    } else if task.skipped {
        "Skipped"
    } else {
        "Pending"
    }
}

/// Format a time estimate as HH:MM.
pub fn format_time(time: crate::task::TaskTime) -> String {
    format!("{:02}:{:02}", time.hours, time.minutes)
}

/// Format a frequency filter for display.
pub fn format_frequency_filter(f: FrequencyFilter) -> &'static str {
    match f {
        FrequencyFilter::All => "All Frequencies",
        FrequencyFilter::OneTime => "One Time",
        FrequencyFilter::Daily => "Daily",
        FrequencyFilter::Weekly => "Weekly",
        FrequencyFilter::Monthly => "Monthly",
        FrequencyFilter::Yearly => "Yearly",
    }
}

/// Format a status filter for display.
pub fn format_status_filter(s: StatusFilter) -> &'static str {
    match s {
        StatusFilter::All => "All Statuses",
        StatusFilter::Pending => "Pending",
        StatusFilter::Completed => "Completed",
        StatusFilter::Skipped => "Skipped",
    }
}

/// Format a sort key for display.
pub fn format_sort_key(k: SortKey) -> &'static str {
    match k {
        SortKey::Catalog => "Catalog Order",
        SortKey::Frequency => "Frequency",
        SortKey::Time => "Time",
        SortKey::Cost => "Cost",
    }
}

/// Format a recommendation for display.
pub fn format_recommendation(r: Recommendation) -> &'static str {
    match r {
        Recommendation::Diy => "Do It Yourself",
        Recommendation::Agency => "Agency",
        Recommendation::Consultant => "Consultant",
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskTime;

    fn pending_task(id: u64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            category: "Website".to_string(),
            frequency: Frequency::Monthly,
            frequency_detail: "1".to_string(),
            cost: "$0".to_string(),
            time: TaskTime::new(1, 0),
            description: String::new(),
            resources: Vec::new(),
            recommendation: Recommendation::Diy,
            completed: false,
            skipped: false,
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    fn empty_playbook() -> Playbook {
        Playbook {
            month: "April 2023".to_string(),
            streak: 0,
            generations_used: 0,
            generation_limit: 100,
            profile: BusinessProfile::default(),
            tasks: Vec::new(),
        }
    }

    #[test]
    fn test_toggle_skip_then_toggle_off() {
        let task = pending_task(1, "SEO Audit");
        let skipped = toggle_skip(&task);
        assert!(skipped.skipped);
        assert!(!skipped.completed);
        let back = toggle_skip(&skipped);
        assert!(!back.skipped);
        assert!(!back.completed);
    }

    #[test]
    fn test_toggles_are_mutually_exclusive() {
        let mut task = pending_task(1, "SEO Audit");
        // Any interleaving keeps the invariant.
        for step in 0..8 {
            task = if step % 3 == 0 {
                toggle_complete(&task)
            } else {
                toggle_skip(&task)
            };
            assert!(!(task.completed && task.skipped));
        }
    }

    #[test]
    fn test_complete_clears_skip() {
        let task = pending_task(1, "SEO Audit");
        let skipped = toggle_skip(&task);
        let completed = toggle_complete(&skipped);
        assert!(completed.completed);
        assert!(!completed.skipped);
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let task = pending_task(1, "SEO Audit");
        let _ = toggle_complete(&task);
        assert!(!task.completed);
    }

    #[test]
    fn test_add_custom_task_rejects_blank_title() {
        let mut playbook = empty_playbook();
        playbook.tasks.push(pending_task(1, "Existing"));
        let err = add_custom_task(
            &mut playbook,
            TaskDraft { title: "  ".to_string(), ..Default::default() },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError("title required".to_string()));
        assert_eq!(playbook.tasks.len(), 1);
    }

    #[test]
    fn test_add_custom_task_appends_pending_with_fresh_id() {
        let mut playbook = empty_playbook();
        playbook.tasks.push(pending_task(7, "Existing"));
        let id = add_custom_task(
            &mut playbook,
            TaskDraft {
                title: "New Task".to_string(),
                frequency: Frequency::OneTime,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(id, 8);
        assert_eq!(playbook.tasks.len(), 2);
        let added = playbook.get(id).unwrap();
        assert_eq!(added.title, "New Task");
        assert!(!added.completed);
        assert!(!added.skipped);
        assert_eq!(added.category, "Custom");
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let mut playbook = empty_playbook();
        assert_eq!(playbook.next_id(), 1);
        playbook.tasks.push(pending_task(4, "a"));
        playbook.tasks.push(pending_task(2, "b"));
        assert_eq!(playbook.next_id(), 5);
    }
}
