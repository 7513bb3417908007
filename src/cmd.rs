//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers that implement the
//! subcommands: listing and filtering tasks, toggling completion, adding
//! custom tasks, playbook generation, stats, the resource guide, and the
//! TUI entry point.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use crate::catalog::*;
use crate::chart::{budget_allocation, time_allocation, Percentages};
use crate::fields::*;
use crate::guide::{resource_guide, FAIR_PRICING};
use crate::playbook::{self, Generation};
use crate::query::{query, Criteria};
use crate::task::{TaskDraft, TaskTime};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the dashboard interface.
    Ui,

    /// List tasks grouped by category, with optional filters.
    List {
        /// Case-insensitive title search.
        #[arg(long)]
        search: Option<String>,
        /// Frequency filter: one-time | daily | weekly | monthly | yearly.
        /// Anything else lists every frequency.
        #[arg(long)]
        frequency: Option<String>,
        /// Status filter: pending | completed | skipped.
        /// Anything else lists every status.
        #[arg(long)]
        status: Option<String>,
        /// Sort key applied within each category.
        #[arg(long, value_enum, default_value_t = SortKey::Catalog)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Add a custom task to the playbook.
    Add {
        /// Short title for the task.
        title: String,
        /// Recurrence: one-time | daily | weekly | monthly | yearly.
        #[arg(long, value_enum, default_value_t = Frequency::OneTime)]
        frequency: Frequency,
        /// Estimated hours.
        #[arg(long, default_value_t = 0)]
        hours: u8,
        /// Estimated minutes.
        #[arg(long, default_value_t = 30)]
        minutes: u8,
        /// Estimated cost, e.g. "$10".
        #[arg(long, default_value = "$0")]
        cost: String,
        /// Category to file the task under.
        #[arg(long)]
        category: Option<String>,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Toggle a task's completed flag (completing clears skipped).
    Done {
        /// Task ID.
        id: u64,
    },

    /// Toggle a task's skipped flag (skipping clears completed).
    Skip {
        /// Task ID.
        id: u64,
    },

    /// View a single task in full.
    View {
        /// Task ID.
        id: u64,
    },

    /// Generate next month's playbook, replacing every task.
    Generate,

    /// Show completion stats and per-category allocation.
    Stats,

    /// Show the resource guide for a task.
    Guide {
        /// Task ID.
        id: u64,
    },

    /// Search the task library for tasks worth adding.
    Suggest {
        /// Search text (at least two characters).
        query: String,
    },

    /// Show or update the business profile behind the playbook.
    Profile {
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        maturity: Option<String>,
        #[arg(long)]
        revenue: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the dashboard TUI.
pub fn cmd_ui(db_path: &Path) {
    if let Err(e) = run_tui(db_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// List tasks grouped by category with the given filters applied.
pub fn cmd_list(
    playbook: &Playbook,
    search: Option<String>,
    frequency: Option<String>,
    status: Option<String>,
    sort: SortKey,
    limit: Option<usize>,
) {
    let criteria = Criteria {
        search: search.unwrap_or_default(),
        frequency: frequency.as_deref().map(parse_frequency_filter).unwrap_or_default(),
        status: status.as_deref().map(parse_status_filter).unwrap_or_default(),
        sort,
    };
    let result = query(&playbook.tasks, &criteria);

    println!("{} Marketing Playbook", playbook.month);
    println!(
        "Pending: {}  Completed: {}  Skipped: {}",
        result.counts.pending, result.counts.completed, result.counts.skipped
    );

    let mut remaining = limit.unwrap_or(usize::MAX);
    for group in &result.groups {
        if remaining == 0 {
            break;
        }
        println!();
        println!("{} ({} tasks)", group.category, group.tasks.len());
        println!(
            "  {:<5} {:<10} {:<14} {:<6} {:<6} {}",
            "ID", "Status", "Frequency", "Time", "Cost", "Title"
        );
        for task in &group.tasks {
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            println!(
                "  {:<5} {:<10} {:<14} {:<6} {:<6} {}",
                task.id,
                format_status(task),
                format!("{} ({})", format_frequency(task.frequency), task.frequency_detail),
                format_time(task.time),
                task.cost,
                truncate(&task.title, 50)
            );
        }
    }
    if result.groups.is_empty() {
        println!();
        println!("No tasks match the current filters.");
    }
}

/// Add a custom task to the playbook.
pub fn cmd_add(
    playbook: &mut Playbook,
    db_path: &Path,
    title: String,
    frequency: Frequency,
    hours: u8,
    minutes: u8,
    cost: String,
    category: Option<String>,
    desc: Option<String>,
) {
    let draft = TaskDraft {
        title,
        category,
        frequency,
        frequency_detail: None,
        cost,
        time: TaskTime::new(hours, minutes),
        description: desc,
    };
    match add_custom_task(playbook, draft) {
        Ok(id) => {
            save_or_exit(playbook, db_path);
            println!("Added task {}", id);
        }
        Err(e) => {
            eprintln!("Rejected: {}", e);
            std::process::exit(1);
        }
    }
}

/// Toggle a task's completed flag.
pub fn cmd_done(playbook: &mut Playbook, db_path: &Path, id: u64) {
    let Some(task) = playbook.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    let updated = toggle_complete(task);
    let status = format_status(&updated);
    *playbook.get_mut(id).unwrap() = updated;
    save_or_exit(playbook, db_path);
    println!("Task {} is now {}", id, status);
}

/// Toggle a task's skipped flag.
pub fn cmd_skip(playbook: &mut Playbook, db_path: &Path, id: u64) {
    let Some(task) = playbook.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    let updated = toggle_skip(task);
    let status = format_status(&updated);
    *playbook.get_mut(id).unwrap() = updated;
    save_or_exit(playbook, db_path);
    println!("Task {} is now {}", id, status);
}

/// Print a single task in full.
pub fn cmd_view(playbook: &Playbook, id: u64) {
    let Some(task) = playbook.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    println!("Task {}: {}", task.id, task.title);
    println!("  Category:       {}", task.category);
    println!("  Status:         {}", format_status(task));
    println!(
        "  Frequency:      {} ({})",
        format_frequency(task.frequency),
        task.frequency_detail
    );
    println!("  Time:           {}", format_time(task.time));
    println!("  Cost:           {}", task.cost);
    println!("  Recommendation: {}", format_recommendation(task.recommendation));
    if !task.description.is_empty() {
        println!("  Description:    {}", task.description);
    }
    if !task.resources.is_empty() {
        println!("  Resources:      {}", task.resources.join(", "));
    }
}

/// Generate next month's playbook after the fixed delay.
pub fn cmd_generate(playbook: &mut Playbook, db_path: &Path) {
    println!("Creating your next month's playbook");
    let generation = Generation::start();
    while !generation.is_done() {
        print!(".");
        let _ = std::io::stdout().flush();
        std::thread::sleep(Duration::from_millis(500));
    }
    println!();

    playbook::generate(playbook);
    save_or_exit(playbook, db_path);
    println!(
        "{} playbook ready: {} tasks. Generations used: {}/{}. Streak: {} months.",
        playbook.month,
        playbook.tasks.len(),
        playbook.generations_used,
        playbook.generation_limit,
        playbook.streak
    );
}

/// Print completion stats, allocation rollups and the pricing comparison.
pub fn cmd_stats(playbook: &Playbook) {
    let result = query(&playbook.tasks, &Criteria::default());
    let percentages = Percentages::from_counts(&result.counts);

    println!("{} Marketing Playbook", playbook.month);
    println!(
        "Pending: {}  Completed: {}  Skipped: {}",
        result.counts.pending, result.counts.completed, result.counts.skipped
    );
    println!(
        "Overall completion: {:.0}% completed, {:.0}% skipped, {:.0}% pending",
        percentages.completed, percentages.skipped, percentages.pending
    );

    println!();
    println!("Time allocation");
    for (category, minutes) in time_allocation(&playbook.tasks) {
        println!("  {:<20} {:>4}h {:02}m", category, minutes / 60, minutes % 60);
    }

    println!();
    println!("Budget allocation");
    for (category, dollars) in budget_allocation(&playbook.tasks) {
        println!("  {:<20} ${:>4}", category, dollars);
    }

    println!();
    println!("Fair pricing comparison");
    for (label, price, detail) in FAIR_PRICING {
        println!("  {:<18} {:<10} {}", label, price, detail);
    }
}

/// Print the resource guide for a task, marking the recommended section.
pub fn cmd_guide(playbook: &Playbook, id: u64) {
    let Some(task) = playbook.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    println!("Resource guide: {}", task.title);
    for section in resource_guide(task) {
        println!();
        if section.highlighted {
            println!("► {} (recommended)", section.title);
        } else {
            println!("  {}", section.title);
        }
        for link in section.links {
            println!("    {} - {}", link.name, link.url);
        }
        for row in section.pricing {
            println!("    {:<24} {}", row.item, row.price);
        }
        for tip in section.tips {
            println!("    - {}", tip);
        }
    }
}

/// Search the task library and print matches.
pub fn cmd_suggest(query_text: &str) {
    let matches = playbook::suggest(query_text);
    if matches.is_empty() {
        println!("No matching tasks found. You can create your own with `mpb add`.");
        return;
    }
    for library_task in matches {
        println!(
            "{:<36} {:<10} {:02}:{:02}  {}",
            library_task.title,
            format_frequency(library_task.frequency),
            library_task.hours,
            library_task.minutes,
            library_task.cost
        );
    }
}

/// Show or update the business profile.
pub fn cmd_profile(
    playbook: &mut Playbook,
    db_path: &Path,
    industry: Option<String>,
    service: Option<String>,
    goal: Option<String>,
    maturity: Option<String>,
    revenue: Option<String>,
) {
    let changed = industry.is_some()
        || service.is_some()
        || goal.is_some()
        || maturity.is_some()
        || revenue.is_some();

    if let Some(v) = industry {
        playbook.profile.industry = v;
    }
    if let Some(v) = service {
        playbook.profile.service = v;
    }
    if let Some(v) = goal {
        playbook.profile.goal = v;
    }
    if let Some(v) = maturity {
        playbook.profile.maturity = v;
    }
    if let Some(v) = revenue {
        playbook.profile.revenue = v;
    }

    if changed {
        save_or_exit(playbook, db_path);
        println!("Profile updated.");
    }
    println!("  Industry: {}", playbook.profile.industry);
    println!("  Service:  {}", playbook.profile.service);
    println!("  Goal:     {}", playbook.profile.goal);
    println!("  Maturity: {}", playbook.profile.maturity);
    println!("  Revenue:  {}", playbook.profile.revenue);
}

/// Generate shell completion scripts on stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn save_or_exit(playbook: &Playbook, db_path: &Path) {
    if let Err(e) = playbook.save(db_path) {
        eprintln!("Failed to save playbook: {e}");
        std::process::exit(1);
    }
}
