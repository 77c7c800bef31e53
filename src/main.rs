//! # TM - To-Do List CLI
//!
//! A file-backed personal task tracker with priorities, due dates and
//! due-today reminders.
//!
//! ## Key Features
//!
//! - **Prioritised listing**: pending tasks sorted High > Medium > Low, then
//!   by due date with no-deadline tasks last
//! - **Due-today reminders**: one-shot (`tm due`) or periodic (`tm watch`)
//!   checks, decoupled from the interactive menu
//! - **Two interfaces**: clap subcommands for automation plus the classic
//!   numbered menu (`tm menu`)
//! - **Local file storage**: a single pretty-printed JSON file, rewritten
//!   atomically after every mutation
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task via CLI
//! tm add "Water the plants" --priority low --due 2024-06-01
//!
//! # List pending tasks
//! tm list
//!
//! # Complete task 1 from the listing
//! tm complete 1
//!
//! # Check for tasks due today every five minutes
//! tm watch --interval 300
//!
//! # Or drive everything from the numbered menu
//! tm menu
//! ```
//!
//! Data is stored locally in `~/.todo/todo_list.json`; pass `--db` to use a
//! different file.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod notify;
pub mod store;
pub mod task;

use cli::Cli;
use cmd::*;
use store::Store;

fn main() {
    let cli = Cli::parse();

    // Determine the to-do list file.
    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let todo_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&todo_dir) {
            eprintln!("Failed to create directory {}: {}", todo_dir.display(), e);
            std::process::exit(1);
        }
        todo_dir.join("todo_list.json")
    });

    // Watch reloads the store each pass, so it manages loading itself.
    if let Commands::Watch { interval } = &cli.command {
        cmd_watch(&db_path, *interval);
        return;
    }

    let mut store = Store::load(&db_path);

    match cli.command {
        Commands::Watch { .. } => unreachable!("watch handled above"),

        Commands::Add {
            description,
            priority,
            due,
        } => cmd_add(&mut store, &db_path, description, priority, due),

        Commands::List { all, completed } => cmd_list(&store, all, completed),

        Commands::Complete { number } => cmd_complete(&mut store, &db_path, number),

        Commands::Delete { number } => cmd_delete(&mut store, &db_path, number),

        Commands::Due => cmd_due(&store),

        Commands::Menu => cmd_menu(&mut store, &db_path),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}
