//! Notification sink for due-today reminders.
//!
//! The store only decides *which* tasks are due; delivery goes through the
//! `Notifier` trait so integrators can plug in a desktop backend. The
//! built-in sink prints to stdout.

use chrono::NaiveDate;

use crate::store::Store;

/// Delivery seam for reminders: one call per notification.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// Default sink: prints `[title] message` lines to stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }
}

/// Raise one notification per pending task due on `today`.
/// Returns the number of notifications raised.
pub fn remind_due_today(store: &Store, today: NaiveDate, notifier: &dyn Notifier) -> usize {
    let due = store.due_today(today);
    for task in &due {
        notifier.notify(
            "Task Reminder!",
            &format!("'{}' is due today!", task.description),
        );
    }
    due.len()
}
