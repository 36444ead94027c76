//! Enumerations and field types for categories and tasks.
//!
//! This module defines the display sort mode stored on every category and the
//! priority bands used to colour the priority column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display order applied to a category's tasks.
///
/// Stored as a bare string in the data file: `""` when never chosen, `"none"`,
/// `"priority"` or `"completed"`. `Unset` and `None` both keep insertion order
/// but are kept apart so a file is written back with the value it was read with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Unset,
    None,
    Priority,
    Completed,
}

impl SortMode {
    /// The string written to the data file and shown in category headers.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Unset => "",
            SortMode::None => "none",
            SortMode::Priority => "priority",
            SortMode::Completed => "completed",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a typed sort option is not one of the accepted names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0:?}")]
pub struct ParseSortModeError(pub String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    /// Parse user input, trimmed and case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SortMode::None),
            "priority" => Ok(SortMode::Priority),
            "completed" => Ok(SortMode::Completed),
            _ => Err(ParseSortModeError(s.to_string())),
        }
    }
}

impl Serialize for SortMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    /// Lenient decode: empty and anything unrecognised map to `Unset`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw.parse::<SortMode>().unwrap_or_default())
    }
}

/// Urgency band derived from a task's numeric priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityBand {
    /// Priority 2 or lower.
    Urgent,
    /// Priority 3 to 5.
    Caution,
    /// Priority 6 and above.
    Normal,
}

impl PriorityBand {
    pub fn of(priority: i64) -> Self {
        match priority {
            p if p <= 2 => PriorityBand::Urgent,
            3..=5 => PriorityBand::Caution,
            _ => PriorityBand::Normal,
        }
    }
}
