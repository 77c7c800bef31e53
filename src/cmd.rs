//! Command implementations for the CLI interface.
//!
//! This module contains the handlers for every subcommand, from the one-shot
//! CRUD operations to the interactive numbered menu and the reminder watch
//! loop.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::fields::{parse_priority, Priority};
use crate::notify::{remind_due_today, ConsoleNotifier};
use crate::store::{parse_due_input, print_completed, print_pending, Store};
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task description.
        description: String,
        /// Priority: high | medium | low (any case).
        #[arg(long, value_enum, ignore_case = true)]
        priority: Priority,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        due: Option<String>,
    },

    /// List pending tasks, sorted by priority and due date.
    List {
        /// Also show completed tasks.
        #[arg(long)]
        all: bool,
        /// Show only completed tasks.
        #[arg(long, conflicts_with = "all")]
        completed: bool,
    },

    /// Mark a task as completed by its number in the pending listing.
    Complete {
        /// 1-based number from `tm list`.
        number: usize,
    },

    /// Delete a task by its number in the full list (pending and completed).
    Delete {
        /// 1-based number in stored order.
        number: usize,
    },

    /// Print reminders for tasks due today.
    Due,

    /// Periodically check for tasks due today and raise reminders.
    Watch {
        /// Seconds between checks.
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },

    /// Open the interactive numbered menu.
    Menu,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn save_or_exit(store: &Store, db_path: &Path) {
    if let Err(e) = store.save(db_path) {
        eprintln!("Failed to save to-do list: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(
    store: &mut Store,
    db_path: &Path,
    description: String,
    priority: Priority,
    due: Option<String>,
) {
    if description.trim().is_empty() {
        eprintln!("Task description cannot be empty.");
        std::process::exit(1);
    }
    let due_date = match due {
        Some(ref s) => match parse_due_input(s) {
            Some(d) => Some(d),
            None => {
                eprintln!("Invalid date format. Please use YYYY-MM-DD.");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let task = Task::new(description, priority, due_date, Local::now().naive_local());
    let announced = task.description.clone();
    store.add(task);
    save_or_exit(store, db_path);
    println!("'{announced}' has been added to the list.");
}

/// List tasks: pending by default, completed on request.
pub fn cmd_list(store: &Store, all: bool, completed: bool) {
    if completed {
        let done = store.completed();
        if done.is_empty() {
            println!("No completed tasks.");
        } else {
            print_completed(&done);
        }
        return;
    }
    print_pending(&store.pending());
    if all {
        print_completed(&store.completed());
    }
}

/// Mark a task done by its pending-listing number.
pub fn cmd_complete(store: &mut Store, db_path: &Path, number: usize) {
    match store.complete(number, Local::now().naive_local()) {
        Ok(task) => {
            save_or_exit(store, db_path);
            let when = task
                .completed_at
                .map(|ts| ts.format(crate::task::STAMP_FORMAT).to_string())
                .unwrap_or_default();
            println!(
                "'{}' has been marked as completed at {when}.",
                task.description
            );
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Delete a task by its full-list number.
pub fn cmd_delete(store: &mut Store, db_path: &Path, number: usize) {
    match store.delete(number) {
        Ok(task) => {
            save_or_exit(store, db_path);
            println!("'{}' has been removed.", task.description);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// One-shot reminder pass over tasks due today.
pub fn cmd_due(store: &Store) {
    let today = Local::now().date_naive();
    let raised = remind_due_today(store, today, &ConsoleNotifier);
    if raised == 0 {
        println!("Nothing due today.");
    }
}

/// Periodic reminder loop, decoupled from the interactive menu. Reloads the
/// store each pass so mutations from other invocations are picked up.
pub fn cmd_watch(db_path: &Path, interval: u64) {
    let notifier = ConsoleNotifier;
    loop {
        let store = Store::load(db_path);
        let today = Local::now().date_naive();
        remind_due_today(&store, today, &notifier);
        thread::sleep(Duration::from_secs(interval.max(1)));
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn show_menu() {
    println!("\nTo-Do List Menu:");
    println!("1. Add Task");
    println!("2. View Tasks");
    println!("3. Complete Task");
    println!("4. Delete Task");
    println!("5. Exit");
}

fn view_tasks(store: &Store) {
    print_pending(&store.pending());
    print_completed(&store.completed());
}

fn menu_add(store: &mut Store, db_path: &Path) {
    let description = prompt("Enter the task description: ");
    if description.is_empty() {
        println!("Task description cannot be empty.");
        return;
    }

    let priority = loop {
        let input = prompt("Enter the priority (High, Medium, Low): ");
        match parse_priority(&input) {
            Some(p) => break p,
            None => println!("Invalid priority. Please enter High, Medium, or Low."),
        }
    };

    let due_date = loop {
        let input = prompt("Enter the due date (YYYY-MM-DD, leave blank for none): ");
        if input.is_empty() {
            break None;
        }
        match parse_due_input(&input) {
            Some(d) => break Some(d),
            None => println!("Invalid date format. Please use YYYY-MM-DD."),
        }
    };

    let task = Task::new(description, priority, due_date, Local::now().naive_local());
    let announced = task.description.clone();
    store.add(task);
    save_or_exit(store, db_path);
    println!("'{announced}' has been added to the list.");
}

fn menu_complete(store: &mut Store, db_path: &Path) {
    view_tasks(store);
    if store.pending().is_empty() {
        if store.tasks.is_empty() {
            println!("The to-do list is empty.");
        } else {
            println!("No incomplete tasks to mark as completed.");
        }
        return;
    }
    let input = prompt("Enter the task number to mark as completed: ");
    let Ok(number) = input.parse::<usize>() else {
        println!("Please enter a valid number.");
        return;
    };
    match store.complete(number, Local::now().naive_local()) {
        Ok(task) => {
            save_or_exit(store, db_path);
            let when = task
                .completed_at
                .map(|ts| ts.format(crate::task::STAMP_FORMAT).to_string())
                .unwrap_or_default();
            println!(
                "'{}' has been marked as completed at {when}.",
                task.description
            );
        }
        Err(e) => println!("{e}"),
    }
}

fn menu_delete(store: &mut Store, db_path: &Path) {
    view_tasks(store);
    if store.tasks.is_empty() {
        println!("The to-do list is empty.");
        return;
    }
    // Delete counts the full stored list, completed tasks included, unlike
    // complete which counts only the pending listing.
    let input = prompt("Enter the task number to delete: ");
    let Ok(number) = input.parse::<usize>() else {
        println!("Please enter a valid number.");
        return;
    };
    match store.delete(number) {
        Ok(task) => {
            save_or_exit(store, db_path);
            println!("'{}' has been removed.", task.description);
        }
        Err(e) => println!("{e}"),
    }
}

/// Interactive numbered menu: choices 1-5 map to add/view/complete/delete/exit.
pub fn cmd_menu(store: &mut Store, db_path: &Path) {
    loop {
        show_menu();
        match prompt("Choose an option (1-5): ").as_str() {
            "1" => menu_add(store, db_path),
            "2" => view_tasks(store),
            "3" => menu_complete(store, db_path),
            "4" => menu_delete(store, db_path),
            "5" => {
                save_or_exit(store, db_path);
                println!("Have a nice day!");
                break;
            }
            _ => println!("Invalid choice. Please choose a number between 1 and 5."),
        }
    }
}
