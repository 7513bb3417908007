//! # MPB - Marketing Playbook CLI
//!
//! A monthly marketing playbook tracker for small businesses, with a full
//! CLI for scripted use and a dashboard TUI for working through the plan.
//!
//! ## Key Features
//!
//! - **Monthly Playbook**: A generated catalog of marketing tasks across
//!   Website, Social Media, Local Listings, Email Marketing and Paid
//!   Advertising
//! - **Filter & Search**: Case-insensitive title search plus frequency and
//!   status filters, grouped by category
//! - **Progress Tracking**: Complete/skip toggles with catalog-wide badge
//!   counts and a completion donut
//! - **Resource Guides**: DIY, agency and consultant guidance per task with
//!   fair-pricing reference points
//! - **Local File Storage**: A single JSON playbook file, replaced wholesale
//!   on each generation
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard
//! mpb ui
//!
//! # List this month's tasks
//! mpb list
//!
//! # Narrow to weekly social tasks still pending
//! mpb list --search social --frequency weekly --status pending
//!
//! # Mark a task done, or skip it
//! mpb done 7
//! mpb skip 12
//!
//! # Add your own task
//! mpb add "Set Up Facebook Pixel" --frequency one-time --minutes 45
//!
//! # Generate next month's playbook
//! mpb generate
//! ```
//!
//! Data is stored locally in `~/.mpb/playbook.json`; pass `--db` to use a
//! different file.

use std::path::PathBuf;

use clap::Parser;

pub mod catalog;
pub mod chart;
pub mod cli;
pub mod cmd;
pub mod fields;
pub mod guide;
pub mod playbook;
pub mod query;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use catalog::Playbook;
use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    // Completions never need storage.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    // Determine the playbook file
    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let mpb_dir = PathBuf::from(home).join(".mpb");
        if let Err(e) = std::fs::create_dir_all(&mpb_dir) {
            eprintln!("Failed to create mpb directory {}: {}", mpb_dir.display(), e);
            std::process::exit(1);
        }
        mpb_dir.join("playbook.json")
    });

    let mut playbook = Playbook::load(&db_path);

    // First run: persist the seeded playbook so task ids stay stable.
    if !db_path.exists() {
        if let Err(e) = playbook.save(&db_path) {
            eprintln!("Failed to save playbook: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Ui => cmd_ui(&db_path),

        Commands::List { search, frequency, status, sort, limit } =>
            cmd_list(&playbook, search, frequency, status, sort, limit),

        Commands::Add { title, frequency, hours, minutes, cost, category, desc } =>
            cmd_add(&mut playbook, &db_path, title, frequency, hours, minutes, cost,
                    category, desc),

        Commands::Done { id } => cmd_done(&mut playbook, &db_path, id),

        Commands::Skip { id } => cmd_skip(&mut playbook, &db_path, id),

        Commands::View { id } => cmd_view(&playbook, id),

        Commands::Generate => cmd_generate(&mut playbook, &db_path),

        Commands::Stats => cmd_stats(&playbook),

        Commands::Guide { id } => cmd_guide(&playbook, id),

        Commands::Suggest { query } => cmd_suggest(&query),

        Commands::Profile { industry, service, goal, maturity, revenue } =>
            cmd_profile(&mut playbook, &db_path, industry, service, goal, maturity,
                        revenue),

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
