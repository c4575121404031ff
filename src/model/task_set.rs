use std::collections::BTreeMap;

use crate::model::task::Task;
use crate::parse::{parse_task, serialize_task, serialize_tasks};

/// Tasks keyed by their 1-based line number.
///
/// Identifiers are positional: they are recomputed from line order on every
/// load and carry no meaning across files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: BTreeMap<usize, Task>,
}

impl TaskSet {
    pub fn new() -> Self {
        TaskSet::default()
    }

    /// Parse file lines. Blank lines hold no task but still take up their
    /// line number, so identifiers always match line numbers in the file.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let tasks = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.as_ref().trim().is_empty())
            .map(|(idx, line)| (idx + 1, parse_task(line.as_ref())))
            .collect();
        TaskSet { tasks }
    }

    /// Serialize in identifier order. With `preserve_line_numbers`, every
    /// missing identifier below the largest one becomes a blank line.
    pub fn to_lines(&self, preserve_line_numbers: bool) -> Vec<String> {
        if !preserve_line_numbers {
            return serialize_tasks(self.tasks.values());
        }
        let mut lines = vec![String::new(); self.max_id()];
        for (&id, task) in &self.tasks {
            lines[id - 1] = serialize_task(task);
        }
        lines
    }

    /// A new set numbered 1..=n in `key` order (ties keep identifier order).
    pub fn sorted_by_key<K: Ord>(&self, mut key: impl FnMut(&Task) -> K) -> TaskSet {
        let mut ordered: Vec<&Task> = self.tasks.values().collect();
        ordered.sort_by_cached_key(|task| key(task));
        TaskSet {
            tasks: ordered
                .into_iter()
                .cloned()
                .enumerate()
                .map(|(idx, task)| (idx + 1, task))
                .collect(),
        }
    }

    /// Largest identifier, 0 when empty
    pub fn max_id(&self) -> usize {
        self.tasks.keys().next_back().copied().unwrap_or(0)
    }

    /// First identifier past the end of the set
    pub fn next_id(&self) -> usize {
        self.max_id() + 1
    }

    /// Decimal width of the largest identifier (at least 1)
    pub fn id_width(&self) -> usize {
        self.max_id().max(1).to_string().len()
    }

    pub fn get(&self, id: usize) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn insert(&mut self, id: usize, task: Task) -> Option<Task> {
        self.tasks.insert(id, task)
    }

    pub fn remove(&mut self, id: usize) -> Option<Task> {
        self.tasks.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().map(|(&id, task)| (id, task))
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.tasks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl FromIterator<(usize, Task)> for TaskSet {
    fn from_iter<I: IntoIterator<Item = (usize, Task)>>(iter: I) -> Self {
        TaskSet {
            tasks: iter.into_iter().collect(),
        }
    }
}
