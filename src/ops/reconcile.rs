use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

use crate::model::task::{Priority, START_DATE_KEY, Task};
use crate::model::task_set::TaskSet;
use crate::ops::date_rules::apply_rules;
use crate::ops::id_tag;
use crate::ops::slice::SliceSpec;
use crate::parse::tag_parser::find_tags;

/// Settings that influence how edited lines are turned back into tasks
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    pub today: NaiveDate,
    /// Stamp inserted tasks with `today`
    pub date_on_add: bool,
}

/// One difference between the old and the new task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Inserted { id: usize, task: Task },
    Modified { id: usize, before: Task, after: Task },
    Deleted { id: usize, task: Task },
}

impl Change {
    pub fn id(&self) -> usize {
        match self {
            Change::Inserted { id, .. } | Change::Modified { id, .. } | Change::Deleted { id, .. } => *id,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Inserted { id, task } => write!(f, "+ {} {}", id, task),
            Change::Deleted { id, task } => write!(f, "- {} {}", id, task),
            Change::Modified { id, before, after } => {
                write!(f, "- {} {}\n+ {} {}", id, before, id, after)
            }
        }
    }
}

/// Result of merging an edited slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The complete new task list
    pub tasks: TaskSet,
    pub changes: Vec<Change>,
    pub warnings: Vec<String>,
}

impl MergeOutcome {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Merge the edited slice back into `original`.
///
/// `presented` holds the permanent identifiers that were shown in the slice;
/// only those may be edited or deleted. Everything else in `original` is
/// carried over unchanged.
pub fn merge(
    original: &TaskSet,
    presented: &BTreeSet<usize>,
    spec: &SliceSpec,
    edited: &TaskSet,
    options: &MergeOptions,
) -> MergeOutcome {
    let mut warnings = Vec::new();

    // Pair every edited line with the permanent identifier it proves.
    let mut claimed = HashSet::new();
    let mut recovered = Vec::with_capacity(edited.len());
    for (line, task) in edited.iter() {
        let r = id_tag::recover(line, task, presented, &claimed);
        if let Some(id) = r.id {
            claimed.insert(id);
        }
        warnings.extend(r.warnings);
        recovered.push((line, r.id, r.task));
    }

    let mut tasks = original.clone();
    let mut changes = Vec::new();

    for &id in presented.iter().filter(|id| !claimed.contains(*id)) {
        if let Some(task) = tasks.remove(id) {
            tracing::debug!(id, "task deleted");
            changes.push(Change::Deleted { id, task });
        }
    }

    let mut next_id = original.next_id();
    for (line, id, task) in recovered {
        let before = id.and_then(|id| original.get(id));
        let after = unapply(line, task, before, spec, options, &mut warnings);

        match (id, before) {
            (Some(id), Some(before)) => {
                if after.to_string() != before.to_string() {
                    tracing::debug!(id, "task modified");
                    changes.push(Change::Modified {
                        id,
                        before: before.clone(),
                        after: after.clone(),
                    });
                    tasks.insert(id, after);
                }
            }
            _ => {
                let id = next_id;
                next_id += 1;
                tracing::debug!(id, "task inserted");
                changes.push(Change::Inserted {
                    id,
                    task: after.clone(),
                });
                tasks.insert(id, after);
            }
        }
    }

    MergeOutcome {
        tasks,
        changes,
        warnings,
    }
}

/// Turn an edited line (identifier already stripped) back into a permanent
/// task, restoring what the slice hid.
fn unapply(
    line: usize,
    edited: Task,
    original: Option<&Task>,
    spec: &SliceSpec,
    options: &MergeOptions,
    warnings: &mut Vec<String>,
) -> Task {
    let task = drop_repeated_keys(line, edited, warnings);

    let priority = match task.priority {
        Some(Priority::Letter(c)) => Some(Priority::Letter(c)),
        _ => spec.fallback_priority(original),
    };
    let creation_date = match original {
        Some(original) => original.creation_date,
        None => options.date_on_add.then_some(options.today),
    };
    let task = task
        .with_priority(priority)
        .with_creation_date(creation_date);

    apply_rules(task, original, options.today)
        .add_tags(spec.tags.iter(), false)
        .canonicalize_trailing_tags()
}

/// Keys that may appear at most once per task. Other key:value lookalikes
/// (`10:00`, `ratio:1:2`) are plain title text and are never touched.
const SINGLE_VALUED_KEYS: &[&str] = &[START_DATE_KEY];

/// Keep the first tag of each single-valued key, drop later ones with a
/// warning.
fn drop_repeated_keys(line: usize, task: Task, warnings: &mut Vec<String>) -> Task {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut repeated = Vec::new();

    for m in find_tags(&task.title) {
        let Some(key) = m.tag.key().filter(|k| SINGLE_VALUED_KEYS.contains(k)) else {
            continue;
        };
        match first_seen.get(key) {
            Some(kept) => {
                warnings.push(format!(
                    "line {}: dropping {} (already has {})",
                    line,
                    m.tag.raw(),
                    kept
                ));
                repeated.push(m.range);
            }
            None => {
                first_seen.insert(key.to_string(), m.tag.raw());
            }
        }
    }

    if repeated.is_empty() {
        task
    } else {
        task.remove_occurrences(&repeated)
    }
}
