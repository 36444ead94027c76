//! Task and category data structures.
//!
//! This module defines the `Task` learning item and the `Category` that groups
//! tasks under a name with a display sort mode. Field names on disk keep the
//! capitalised keys used by existing data files.

use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::SortMode;

/// A single thing to learn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    /// Lower is more urgent. Any value is accepted.
    #[serde(rename = "Priority", default)]
    pub priority: i64,
    #[serde(rename = "Note", default)]
    pub note: String,
    #[serde(rename = "Completed", default)]
    pub completed: bool,
}

/// A named group of tasks with the order they are displayed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Tasks", default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
    #[serde(rename = "SortBy", default)]
    pub sort_by: SortMode,
}

impl Category {
    /// Create an empty category with no sort applied.
    pub fn new(name: &str) -> Self {
        Category {
            name: name.to_string(),
            tasks: Vec::new(),
            sort_by: SortMode::Unset,
        }
    }

    /// Reorder the stored tasks according to `sort_by`.
    ///
    /// Both orderings are stable, so tasks that compare equal keep their
    /// insertion order. `Unset` and `None` leave the list untouched.
    pub fn apply_sort(&mut self) {
        match self.sort_by {
            SortMode::Unset | SortMode::None => {}
            SortMode::Priority => self.tasks.sort_by_key(|t| t.priority),
            SortMode::Completed => self.tasks.sort_by_key(|t| t.completed),
        }
    }
}

/// Decode a JSON `null` list as an empty `Vec`.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
