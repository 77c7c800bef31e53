//! Task data structure and its persisted representation.
//!
//! This module defines the core `Task` struct: one to-do item with a
//! description, priority, optional due date and completion state. The serde
//! field names and timestamp formats match the on-disk JSON document, so a
//! load followed by a save reproduces an equivalent file.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A single to-do item.
///
/// Invariant: `completed_at` is set if and only if `completed` is true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Task description; the persisted field is named `task`.
    #[serde(rename = "task")]
    pub description: String,
    pub priority: Priority,
    /// Optional calendar due date; `null` on disk when absent.
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "stamp")]
    pub created_at: NaiveDateTime,
    #[serde(
        default,
        with = "stamp_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    /// Create a new pending task.
    pub fn new(
        description: String,
        priority: Priority,
        due_date: Option<NaiveDate>,
        created_at: NaiveDateTime,
    ) -> Self {
        Task {
            description,
            priority,
            due_date,
            completed: false,
            created_at,
            completed_at: None,
        }
    }
}

/// Timestamp format used throughout the persisted document.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter for `NaiveDateTime` in "YYYY-MM-DD HH:MM:SS" form.
mod stamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::STAMP_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.format(STAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(de)?;
        NaiveDateTime::parse_from_str(&s, STAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveDateTime>` in the same format.
mod stamp_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::STAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => ser.serialize_some(&dt.format(STAMP_FORMAT).to_string()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let s: Option<String> = Option::deserialize(de)?;
        match s {
            Some(s) => NaiveDateTime::parse_from_str(&s, STAMP_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
