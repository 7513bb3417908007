use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed marketing playbook tracker.
/// Storage defaults to ~/.mpb/playbook.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "mpb", version, about = "Monthly marketing playbook tracker")]
pub struct Cli {
    /// Path to the JSON playbook file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
