//! Enumerations and field types for task metadata.
//!
//! Defines the `Priority` classification used to rank pending tasks,
//! along with parsing and display helpers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
///
/// Persisted capitalised ("High", "Medium", "Low"); lowercase spellings in
/// older files are accepted via aliases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum Priority {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl Priority {
    /// Sort rank: High sorts before Medium before Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// Parse a priority string from user input, case-normalised.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(parse_priority("low"), Some(Priority::Low));
        assert_eq!(parse_priority("HIGH"), Some(Priority::High));
        assert_eq!(parse_priority(" Medium "), Some(Priority::Medium));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(parse_priority("urgent"), None);
        assert_eq!(parse_priority(""), None);
    }

    #[test]
    fn rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }
}
