//! Playbook generation and the seed task catalog.
//!
//! A "generation" replaces the whole task catalog for the next month after
//! a fixed delay, mirroring how the plan is produced for the user. There is
//! no cancellation or partial state: a generation is either in progress or
//! done. The seed catalog is a fixed fixture so repeated generations are
//! deterministic and testable.

use std::time::{Duration, Instant};

use chrono::{Datelike, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Playbook;
use crate::fields::{Frequency, Recommendation};
use crate::task::{Task, TaskTime};

/// Fixed pause before a generated playbook is swapped in.
pub const GENERATION_DELAY: Duration = Duration::from_secs(6);

/// Business details used to frame the generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub industry: String,
    pub service: String,
    pub goal: String,
    pub maturity: String,
    pub revenue: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            industry: "Local Service Business".to_string(),
            service: "Home Services".to_string(),
            goal: "Increase Online Presence".to_string(),
            maturity: "Established (3+ years)".to_string(),
            revenue: "$100,000 - $500,000".to_string(),
        }
    }
}

/// An in-progress playbook generation.
#[derive(Debug, Clone, Copy)]
pub struct Generation {
    started: Instant,
}

impl Generation {
    pub fn start() -> Self {
        Generation { started: Instant::now() }
    }

    /// Whether the fixed generation delay has elapsed.
    pub fn is_done(&self) -> bool {
        self.started.elapsed() >= GENERATION_DELAY
    }

    /// Completion ratio in 0..=1, for progress gauges.
    pub fn progress(&self) -> f64 {
        let ratio = self.started.elapsed().as_secs_f64() / GENERATION_DELAY.as_secs_f64();
        ratio.min(1.0)
    }
}

/// Replace the catalog wholesale with next month's seeded plan.
///
/// All tasks come back pending, the month label advances by one calendar
/// month, and the streak and usage counters tick up. The generation limit
/// is informational and never blocks this call.
pub fn generate(playbook: &mut Playbook) {
    playbook.tasks = seed_catalog();
    playbook.month = next_month_label(&playbook.month);
    playbook.streak += 1;
    playbook.generations_used += 1;
}

/// Month label for today, e.g. "April 2023".
pub fn current_month_label() -> String {
    Local::now().format("%B %Y").to_string()
}

/// The month after the given label. Falls back to the current month when
/// the label does not parse.
pub fn next_month_label(label: &str) -> String {
    let parsed = NaiveDate::parse_from_str(&format!("1 {}", label.trim()), "%d %B %Y").ok();
    match parsed {
        Some(date) => {
            let next = date + Months::new(1);
            // Reformat from the first of the month to keep labels uniform.
            NaiveDate::from_ymd_opt(next.year(), next.month(), 1)
                .unwrap_or(next)
                .format("%B %Y")
                .to_string()
        }
        None => current_month_label(),
    }
}

/// A freshly seeded playbook for the current month.
pub fn seeded_playbook() -> Playbook {
    Playbook {
        month: current_month_label(),
        streak: 0,
        generations_used: 0,
        generation_limit: 100,
        profile: BusinessProfile::default(),
        tasks: seed_catalog(),
    }
}

struct Seed {
    title: &'static str,
    category: &'static str,
    frequency: Frequency,
    detail: &'static str,
    cost: &'static str,
    hours: u8,
    minutes: u8,
    description: &'static str,
    resources: &'static [&'static str],
    recommendation: Recommendation,
}

const HELP_GUIDE: &[&str] = &["Step-by-step Guide", "Help Guide"];
const VIDEO_GUIDE: &[&str] = &["Step-by-step Guide", "YouTube Tutorial"];

const SEED_TASKS: &[Seed] = &[
    // Website
    Seed {
        title: "Run a site speed check",
        category: "Website",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 30,
        description: "Measure load times on the key landing pages and note anything slower than three seconds.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Refresh homepage hero copy",
        category: "Website",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$0",
        hours: 1,
        minutes: 0,
        description: "Update the headline and call to action to match this month's promotion.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Publish a new blog post",
        category: "Website",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$10",
        hours: 1,
        minutes: 30,
        description: "Write a short post answering a question customers ask often.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Review site analytics",
        category: "Website",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 30,
        description: "Check visits, top pages and conversion events for the past week.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Renew domain and hosting",
        category: "Website",
        frequency: Frequency::Yearly,
        detail: "1",
        cost: "$20",
        hours: 0,
        minutes: 15,
        description: "Confirm the domain and hosting plan auto-renew before they lapse.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    // Social Media
    Seed {
        title: "Post a business update",
        category: "Social Media",
        frequency: Frequency::Daily,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 15,
        description: "Share a photo, offer or behind-the-scenes moment on your main channel.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Schedule next week's content",
        category: "Social Media",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$5",
        hours: 1,
        minutes: 0,
        description: "Batch-plan posts for the coming week in your scheduling tool.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Reply to comments and messages",
        category: "Social Media",
        frequency: Frequency::Daily,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 15,
        description: "Answer every new comment and direct message from the last day.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Run a follower giveaway",
        category: "Social Media",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$20",
        hours: 1,
        minutes: 30,
        description: "Offer a small prize to boost shares and reach in your local area.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Agency,
    },
    Seed {
        title: "Audit brand profiles",
        category: "Social Media",
        frequency: Frequency::Yearly,
        detail: "1",
        cost: "$0",
        hours: 2,
        minutes: 0,
        description: "Check naming, bios, links and imagery are consistent across every platform.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Consultant,
    },
    // Local Listings
    Seed {
        title: "Respond to new reviews",
        category: "Local Listings",
        frequency: Frequency::Daily,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 15,
        description: "Thank reviewers and address any complaints on your business profile.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Update business hours and photos",
        category: "Local Listings",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$0",
        hours: 0,
        minutes: 30,
        description: "Keep opening hours, photos and service details current on your listings.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Check listing accuracy across directories",
        category: "Local Listings",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$5",
        hours: 1,
        minutes: 0,
        description: "Verify name, address and phone number match everywhere you are listed.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Consultant,
    },
    Seed {
        title: "Claim a new directory listing",
        category: "Local Listings",
        frequency: Frequency::OneTime,
        detail: "1",
        cost: "$0",
        hours: 0,
        minutes: 45,
        description: "Add your business to one directory you are not on yet.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    // Email Marketing
    Seed {
        title: "Send the monthly newsletter",
        category: "Email Marketing",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$15",
        hours: 2,
        minutes: 0,
        description: "Round up news, offers and one helpful tip for your subscriber list.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "Review the welcome sequence",
        category: "Email Marketing",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$0",
        hours: 1,
        minutes: 0,
        description: "Read the automated welcome emails end to end and fix anything stale.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Consultant,
    },
    Seed {
        title: "Clean the subscriber list",
        category: "Email Marketing",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$5",
        hours: 0,
        minutes: 30,
        description: "Remove hard bounces and subscribers inactive for over six months.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Diy,
    },
    Seed {
        title: "A/B test a subject line",
        category: "Email Marketing",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 30,
        description: "Split the next send between two subject lines and note the winner.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Diy,
    },
    // Paid Advertising
    Seed {
        title: "Review ad spend and results",
        category: "Paid Advertising",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$0",
        hours: 0,
        minutes: 30,
        description: "Compare spend against leads for each running campaign.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Consultant,
    },
    Seed {
        title: "Refresh ad creative",
        category: "Paid Advertising",
        frequency: Frequency::Monthly,
        detail: "1",
        cost: "$20",
        hours: 1,
        minutes: 30,
        description: "Swap in new images and copy before the current set fatigues.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Agency,
    },
    Seed {
        title: "Adjust keyword bids",
        category: "Paid Advertising",
        frequency: Frequency::Weekly,
        detail: "4",
        cost: "$10",
        hours: 0,
        minutes: 45,
        description: "Raise bids on converting keywords and pause the ones that only spend.",
        resources: HELP_GUIDE,
        recommendation: Recommendation::Agency,
    },
    Seed {
        title: "Set up a retargeting audience",
        category: "Paid Advertising",
        frequency: Frequency::OneTime,
        detail: "1",
        cost: "$15",
        hours: 1,
        minutes: 0,
        description: "Build an audience of recent site visitors to re-engage with ads.",
        resources: VIDEO_GUIDE,
        recommendation: Recommendation::Agency,
    },
];

/// Build the fixed seed catalog, all tasks pending.
pub fn seed_catalog() -> Vec<Task> {
    let now_utc = Utc::now().timestamp();
    SEED_TASKS
        .iter()
        .enumerate()
        .map(|(i, seed)| Task {
            id: i as u64 + 1,
            title: seed.title.to_string(),
            category: seed.category.to_string(),
            frequency: seed.frequency,
            frequency_detail: seed.detail.to_string(),
            cost: seed.cost.to_string(),
            time: TaskTime::new(seed.hours, seed.minutes),
            description: seed.description.to_string(),
            resources: seed.resources.iter().map(|r| r.to_string()).collect(),
            recommendation: seed.recommendation,
            completed: false,
            skipped: false,
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        })
        .collect()
}

/// A task from the wider library that was not recommended this month but
/// can be added by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryTask {
    pub title: &'static str,
    pub frequency: Frequency,
    pub hours: u8,
    pub minutes: u8,
    pub cost: &'static str,
}

const TASK_LIBRARY: &[LibraryTask] = &[
    LibraryTask {
        title: "Create Google My Business Listing",
        frequency: Frequency::OneTime,
        hours: 1,
        minutes: 30,
        cost: "$0",
    },
    LibraryTask {
        title: "Set Up Google Analytics",
        frequency: Frequency::OneTime,
        hours: 2,
        minutes: 0,
        cost: "$0",
    },
    LibraryTask {
        title: "Create Email Newsletter Template",
        frequency: Frequency::Monthly,
        hours: 1,
        minutes: 0,
        cost: "$15",
    },
    LibraryTask {
        title: "Set Up Facebook Pixel",
        frequency: Frequency::OneTime,
        hours: 0,
        minutes: 45,
        cost: "$0",
    },
    LibraryTask {
        title: "Competitor Research",
        frequency: Frequency::Monthly,
        hours: 3,
        minutes: 0,
        cost: "$0",
    },
];

/// Case-insensitive substring search over the task library.
///
/// Queries of a single character or less return nothing, matching the
/// add-task dialog behaviour.
pub fn suggest(query: &str) -> Vec<&'static LibraryTask> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() <= 1 {
        return Vec::new();
    }
    TASK_LIBRARY
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_is_deterministic_and_pending() {
        let a = seed_catalog();
        let b = seed_catalog();
        assert_eq!(a.len(), b.len());
        assert!(!a.is_empty());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.title, y.title);
            assert_eq!(x.category, y.category);
        }
        assert!(a.iter().all(|t| t.is_pending()));
    }

    #[test]
    fn test_generate_replaces_catalog_wholesale() {
        let mut playbook = seeded_playbook();
        playbook.month = "April 2023".to_string();
        playbook.tasks[0] = crate::catalog::toggle_complete(&playbook.tasks[0]);
        playbook.tasks[1] = crate::catalog::toggle_skip(&playbook.tasks[1]);

        generate(&mut playbook);

        assert_eq!(playbook.month, "May 2023");
        assert_eq!(playbook.streak, 1);
        assert_eq!(playbook.generations_used, 1);
        assert!(playbook.tasks.iter().all(|t| t.is_pending()));
    }

    #[test]
    fn test_generation_limit_is_never_enforced() {
        let mut playbook = seeded_playbook();
        playbook.generations_used = playbook.generation_limit;
        generate(&mut playbook);
        assert_eq!(playbook.generations_used, playbook.generation_limit + 1);
    }

    #[test]
    fn test_next_month_label_wraps_the_year() {
        assert_eq!(next_month_label("December 2023"), "January 2024");
        assert_eq!(next_month_label("April 2023"), "May 2023");
    }

    #[test]
    fn test_next_month_label_falls_back_on_garbage() {
        assert_eq!(next_month_label("not a month"), current_month_label());
    }

    #[test]
    fn test_suggest_matches_substrings_case_insensitively() {
        let hits = suggest("google");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|t| t.title.to_lowercase().contains("google")));
    }

    #[test]
    fn test_suggest_requires_more_than_one_character() {
        assert!(suggest("g").is_empty());
        assert!(suggest("  ").is_empty());
    }

    #[test]
    fn test_generation_starts_in_progress() {
        let generation = Generation::start();
        assert!(!generation.is_done());
        assert!(generation.progress() < 1.0);
    }
}
