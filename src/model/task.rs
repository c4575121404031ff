use std::fmt;
use std::ops::Range;

use chrono::NaiveDate;
use indexmap::IndexSet;

use crate::model::tag::Tag;
use crate::parse::tag_parser::{TagMatch, find_tags, token_ranges};

/// Key of the start-date tag (`t:YYYY-MM-DD`)
pub const START_DATE_KEY: &str = "t";

/// Date format used for every date field and date-valued tag
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task priority as written between parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    /// `(A)` through `(Z)`
    Letter(char),
    /// `(_)`: explicitly no priority
    NoLevel,
}

impl Priority {
    /// The character used inside the parentheses
    pub fn as_char(self) -> char {
        match self {
            Priority::Letter(c) => c,
            Priority::NoLevel => '_',
        }
    }

    /// Parse the character inside the parentheses into a priority
    pub fn from_char(c: char) -> Option<Priority> {
        match c {
            'A'..='Z' => Some(Priority::Letter(c)),
            '_' => Some(Priority::NoLevel),
            _ => None,
        }
    }

    /// `NoLevel` collapses to `None`
    pub fn letter(self) -> Option<char> {
        match self {
            Priority::Letter(c) => Some(c),
            Priority::NoLevel => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.as_char())
    }
}

/// One line of a todo.txt file.
///
/// Tasks are values: every `with_*`/tag operation returns a new task and
/// leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Task {
    pub completion_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub creation_date: Option<NaiveDate>,
    /// Free text, including any inline tags
    pub title: String,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            title: title.into(),
            ..Task::default()
        }
    }

    /// Tags in order of first appearance in the title
    pub fn tags(&self) -> IndexSet<Tag> {
        crate::parse::tag_parser::parse_all(&self.title)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        find_tags(&self.title).iter().any(|m| &m.tag == tag)
    }

    pub fn is_completed(&self) -> bool {
        self.completion_date.is_some()
    }

    /// Priority letter, treating `(_)` as no priority
    pub fn priority_letter(&self) -> Option<char> {
        self.priority.and_then(Priority::letter)
    }

    /// Value of the first `t:` tag, if it is a valid date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let tags = find_tags(&self.title);
        let value = tags
            .iter()
            .find_map(|m| m.tag.value_for(START_DATE_KEY))?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
    }

    pub fn with_priority(&self, priority: Option<Priority>) -> Task {
        Task {
            priority,
            ..self.clone()
        }
    }

    pub fn with_creation_date(&self, creation_date: Option<NaiveDate>) -> Task {
        Task {
            creation_date,
            ..self.clone()
        }
    }

    pub fn with_completion_date(&self, completion_date: Option<NaiveDate>) -> Task {
        Task {
            completion_date,
            ..self.clone()
        }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Task {
        Task {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Remove every occurrence of the given tags from the title.
    pub fn remove_tags<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> Task {
        let tags: Vec<&Tag> = tags.into_iter().collect();
        let ranges: Vec<Range<usize>> = find_tags(&self.title)
            .into_iter()
            .filter(|m| tags.contains(&&m.tag))
            .map(|m| m.range)
            .collect();
        self.with_title(strip_ranges(&self.title, &ranges))
    }

    /// Remove all key:value tags with the given key.
    pub fn remove_key(&self, key: &str) -> Task {
        let ranges: Vec<Range<usize>> = find_tags(&self.title)
            .into_iter()
            .filter(|m| m.tag.key() == Some(key))
            .map(|m| m.range)
            .collect();
        self.with_title(strip_ranges(&self.title, &ranges))
    }

    /// Remove the tag occurrences at the given byte ranges of the title.
    pub fn remove_occurrences(&self, ranges: &[Range<usize>]) -> Task {
        self.with_title(strip_ranges(&self.title, ranges))
    }

    /// Add the tags that are not already present, in canonical order,
    /// either at the end of the title or right at its start.
    pub fn add_tags<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>, at_front: bool) -> Task {
        let present = self.tags();
        let mut missing: Vec<&Tag> = tags.into_iter().filter(|t| !present.contains(*t)).collect();
        missing.sort();
        missing.dedup();
        if missing.is_empty() {
            return self.clone();
        }

        let added = missing
            .iter()
            .map(|t| t.raw())
            .collect::<Vec<_>>()
            .join(" ");
        let title = if self.title.is_empty() {
            added
        } else if at_front {
            format!("{} {}", added, self.title)
        } else {
            format!("{} {}", self.title, added)
        };
        self.with_title(title)
    }

    /// Rewrite the run of tags at the end of the title in canonical order,
    /// dropping repeats. Tags inside the text are left where they are.
    pub fn canonicalize_trailing_tags(&self) -> Task {
        let trailing = self.trailing_tags();
        if trailing.is_empty() {
            return self.clone();
        }

        let ranges: Vec<Range<usize>> = trailing.iter().map(|m| m.range.clone()).collect();
        let stripped = self.remove_occurrences(&ranges);
        stripped.add_tags(trailing.iter().map(|m| &m.tag), false)
    }

    /// Remove the given tags where they occur in the trailing run of tags.
    /// Occurrences inside the text stay where they are.
    pub fn remove_trailing_tags<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> Task {
        let tags: Vec<&Tag> = tags.into_iter().collect();
        let ranges: Vec<Range<usize>> = self
            .trailing_tags()
            .into_iter()
            .filter(|m| tags.contains(&&m.tag))
            .map(|m| m.range)
            .collect();
        self.with_title(strip_ranges(&self.title, &ranges))
    }

    /// The run of tag tokens at the end of the title, last first.
    fn trailing_tags(&self) -> Vec<TagMatch> {
        let mut matches = find_tags(&self.title);
        let mut trailing = Vec::new();
        for token in token_ranges(&self.title).iter().rev() {
            match matches.iter().position(|m| m.range == *token) {
                Some(i) => trailing.push(matches.swap_remove(i)),
                None => break,
            }
        }
        trailing
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::parse::serialize_task(self))
    }
}

/// Cut the given byte ranges out of `text`, each together with one adjacent
/// whitespace character: the one before it if any, else the one after.
fn strip_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut sorted: Vec<Range<usize>> = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);
    sorted.dedup();

    let mut out = text.to_string();
    for range in sorted.iter().rev() {
        let mut start = range.start;
        let mut end = range.end;
        if let Some(prev) = out[..start].chars().next_back()
            && prev.is_whitespace()
        {
            start -= prev.len_utf8();
        } else if let Some(next) = out[end..].chars().next()
            && next.is_whitespace()
        {
            end += next.len_utf8();
        }
        out.replace_range(start..end, "");
    }
    out
}
