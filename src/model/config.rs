use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::task::Priority;

/// Settings for one slice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceConfig {
    /// The permanent todo.txt file
    #[serde(default = "default_todo_file")]
    pub todo_file: PathBuf,
    /// Editor command line, split shell-style. Falls back to $VISUAL/$EDITOR.
    #[serde(default)]
    pub editor: Option<String>,
    /// Stamp inserted tasks with today's date
    #[serde(default)]
    pub date_on_add: bool,
    /// Keep deleted tasks as blank lines so other line numbers do not move
    #[serde(default = "default_true")]
    pub preserve_line_numbers: bool,
    /// Show completed and not-yet-started tasks in every slice
    #[serde(default)]
    pub disable_filter: bool,
    #[serde(default)]
    pub review_intervals: ReviewIntervals,
}

impl Default for SliceConfig {
    fn default() -> Self {
        SliceConfig {
            todo_file: default_todo_file(),
            editor: None,
            date_on_add: false,
            preserve_line_numbers: true,
            disable_filter: false,
            review_intervals: ReviewIntervals::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_todo_file() -> PathBuf {
    PathBuf::from("todo.txt")
}

/// Days a task may rest before the review slice shows it again, per
/// priority. The `_` entry applies to tasks without a priority.
///
/// In TOML: `[review_intervals]` with `A = 1`, `_ = 30`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewIntervals(pub IndexMap<String, u32>);

impl ReviewIntervals {
    /// Interval for a task with the given priority letter (`None` = no
    /// priority). Priorities absent from the table have no interval.
    pub fn days_for(&self, priority: Option<char>) -> Option<u32> {
        let key = priority.unwrap_or(Priority::NoLevel.as_char()).to_string();
        self.0.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
