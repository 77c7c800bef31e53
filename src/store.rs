//! Task store: persistence plus the query/sort/mutate operations.
//!
//! This module provides the `Store` struct owning the ordered task list,
//! load/save against the JSON file, and helpers for date parsing and
//! rendering task listings.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::fields::format_priority;
use crate::task::{Task, STAMP_FORMAT};

/// In-memory store of tasks in insertion order.
///
/// Insertion order is the persisted order; display indices are derived from
/// it (`delete`) or from the pending sort (`complete`).
#[derive(Debug, Default)]
pub struct Store {
    pub tasks: Vec<Task>,
}

impl Store {
    /// Load the store from a JSON file, starting empty if the file is
    /// missing, unreadable or malformed. Parse failures are non-fatal and
    /// reported on stderr.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Store::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(tasks) => Store { tasks },
                Err(e) => {
                    eprintln!("Error decoding to-do list, starting with an empty list: {e}");
                    Store::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading to-do list, starting with an empty list: {e}");
                Store::default()
            }
        }
    }

    /// Save the full task array to the JSON file using atomic write
    /// (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Append a new task. The caller validates inputs and persists.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Indices of pending tasks in display order: priority rank ascending
    /// (High first), then due date ascending with no-deadline tasks last.
    /// The sort is stable, so ties keep insertion order.
    pub fn pending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.completed)
            .map(|(i, _)| i)
            .collect();
        order.sort_by_key(|&i| {
            let t = &self.tasks[i];
            (t.priority.rank(), t.due_date.unwrap_or(NaiveDate::MAX))
        });
        order
    }

    /// Pending tasks in display order.
    pub fn pending(&self) -> Vec<&Task> {
        self.pending_order()
            .into_iter()
            .map(|i| &self.tasks[i])
            .collect()
    }

    /// Completed tasks in insertion order.
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    /// Mark the task at 1-based `display_index` of the pending listing as
    /// completed, returning a copy of the updated record. Resolution is
    /// positional against the same ordering `pending()` produces, so
    /// duplicate descriptions are unambiguous. The caller persists.
    pub fn complete(
        &mut self,
        display_index: usize,
        now: NaiveDateTime,
    ) -> Result<Task, String> {
        let order = self.pending_order();
        if display_index == 0 || display_index > order.len() {
            return Err("Invalid task number.".into());
        }
        let t = &mut self.tasks[order[display_index - 1]];
        t.completed = true;
        t.completed_at = Some(now);
        Ok(t.clone())
    }

    /// Remove the task at 1-based `display_index` of the full list
    /// (store order, completed and pending combined). Note the index base
    /// differs from `complete`, which counts pending tasks only.
    /// The caller persists.
    pub fn delete(&mut self, display_index: usize) -> Result<Task, String> {
        if display_index == 0 || display_index > self.tasks.len() {
            return Err("Invalid task number.".into());
        }
        Ok(self.tasks.remove(display_index - 1))
    }

    /// Pending tasks due on the given date.
    pub fn due_today(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| !t.completed && t.due_date == Some(today))
            .collect()
    }
}

/// Parse a due-date input: "YYYY-MM-DD", "today", "tomorrow" or "in Nd".
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Print the pending listing with 1-based selection numbers.
pub fn print_pending(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("The to-do list is empty.");
        return;
    }
    println!("\nYour To-Do List (Prioritized, Not Completed):");
    for (idx, t) in tasks.iter().enumerate() {
        let due = match t.due_date {
            Some(d) => format!(" (Due: {d})"),
            None => String::new(),
        };
        println!(
            "{}. [{}] {}{}",
            idx + 1,
            format_priority(t.priority),
            t.description,
            due
        );
    }
}

/// Print completed tasks with their completion timestamps.
pub fn print_completed(tasks: &[&Task]) {
    if tasks.is_empty() {
        return;
    }
    println!("\nCompleted Tasks:");
    for t in tasks {
        let done_at = t
            .completed_at
            .map(|ts| ts.format(STAMP_FORMAT).to_string())
            .unwrap_or_else(|| "-".into());
        println!("[X] {} (Completed at: {})", t.description, done_at);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use tempfile::tempdir;

    use super::*;
    use crate::fields::Priority;

    fn stamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, STAMP_FORMAT).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(desc: &str, priority: Priority, due: Option<&str>) -> Task {
        Task::new(
            desc.into(),
            priority,
            due.map(date),
            stamp("2024-01-01 08:00:00"),
        )
    }

    #[test]
    fn add_places_task_per_sort_rule() {
        let mut store = Store::default();
        store.add(task("low first", Priority::Low, None));
        store.add(task("high later", Priority::High, Some("2024-06-01")));

        let pending = store.pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].description, "high later");
        assert_eq!(pending[1].description, "low first");
        assert_eq!(
            store
                .pending()
                .iter()
                .filter(|t| t.description == "high later")
                .count(),
            1
        );
    }

    #[test]
    fn due_date_breaks_priority_ties_with_none_last() {
        let mut store = Store::default();
        store.add(task("no deadline", Priority::High, None));
        store.add(task("sooner", Priority::High, Some("2024-02-01")));
        store.add(task("later", Priority::High, Some("2024-03-01")));

        let pending = store.pending();
        assert_eq!(pending[0].description, "sooner");
        assert_eq!(pending[1].description, "later");
        assert_eq!(pending[2].description, "no deadline");
    }

    #[test]
    fn sort_is_stable_on_full_ties() {
        let mut store = Store::default();
        store.add(task("first in", Priority::Medium, Some("2024-02-01")));
        store.add(task("second in", Priority::Medium, Some("2024-02-01")));

        let pending = store.pending();
        assert_eq!(pending[0].description, "first in");
        assert_eq!(pending[1].description, "second in");
    }

    #[test]
    fn save_load_round_trip_preserves_fields_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo_list.json");

        let mut store = Store::default();
        store.add(task("one", Priority::High, Some("2024-05-01")));
        store.add(task("two", Priority::Low, None));
        store.complete(1, stamp("2024-04-30 18:00:00")).unwrap();
        store.save(&path).unwrap();

        let loaded = Store::load(&path);
        assert_eq!(loaded.tasks, store.tasks);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = Store::load(&dir.path().join("absent.json"));
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn load_malformed_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo_list.json");
        fs::write(&path, "{not json").unwrap();
        let store = Store::load(&path);
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn complete_sets_terminal_fields_and_leaves_index_space() {
        let mut store = Store::default();
        store.add(task("only", Priority::Medium, None));

        let done = store.complete(1, stamp("2024-01-02 12:00:00")).unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_at, Some(stamp("2024-01-02 12:00:00")));

        // Once completed the task leaves the pending index space.
        assert!(store.pending().is_empty());
        assert!(store.complete(1, stamp("2024-01-03 12:00:00")).is_err());
    }

    #[test]
    fn complete_resolves_duplicates_positionally() {
        let mut store = Store::default();
        store.add(task("buy milk", Priority::Medium, None));
        store.add(task("buy milk", Priority::Medium, None));

        store.complete(2, stamp("2024-01-02 12:00:00")).unwrap();
        assert!(!store.tasks[0].completed);
        assert!(store.tasks[1].completed);
    }

    #[test]
    fn complete_out_of_range_is_err() {
        let mut store = Store::default();
        store.add(task("only", Priority::Low, None));
        assert!(store.complete(0, stamp("2024-01-02 12:00:00")).is_err());
        assert!(store.complete(2, stamp("2024-01-02 12:00:00")).is_err());
    }

    #[test]
    fn delete_indexes_full_list_in_store_order() {
        let mut store = Store::default();
        store.add(task("a", Priority::Low, None));
        store.add(task("b", Priority::High, None));
        store.add(task("c", Priority::Medium, None));

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.description, "a");
        assert_eq!(store.tasks[0].description, "b");
        assert_eq!(store.tasks[1].description, "c");

        assert!(store.delete(3).is_err());
    }

    #[test]
    fn due_today_excludes_completed_and_other_dates() {
        let mut store = Store::default();
        store.add(task("due pending", Priority::High, Some("2024-01-01")));
        store.add(task("due done", Priority::High, Some("2024-01-01")));
        store.add(task("due later", Priority::High, Some("2024-01-02")));
        store.add(task("no deadline", Priority::High, None));
        store.tasks[1].completed = true;
        store.tasks[1].completed_at = Some(stamp("2023-12-31 09:00:00"));

        let due = store.due_today(date("2024-01-01"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].description, "due pending");
    }

    #[test]
    fn invalid_date_string_is_rejected() {
        assert_eq!(parse_due_input("2024-13-40"), None);
        assert_eq!(parse_due_input("not a date"), None);
        assert_eq!(parse_due_input("2024-05-01"), Some(date("2024-05-01")));
    }
}
