use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed to-do list CLI.
/// Storage defaults to ~/.todo/todo_list.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tm", version, about = "Daily to-do list CLI with due-date reminders")]
pub struct Cli {
    /// Path to the JSON to-do list file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
