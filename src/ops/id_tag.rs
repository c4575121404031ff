//! The `i:` tag that carries a task's permanent identifier through the editor.
//!
//! The tag is plain text in the slice file, so anything the editor hands back
//! is untrusted: an identifier only counts if it parses, names a task that was
//! actually presented, and has not been claimed by an earlier line.

use std::collections::{BTreeSet, HashSet};

use crate::model::tag::Tag;
use crate::model::task::Task;
use crate::parse::tag_parser::find_tags;

/// Reserved key of the identifier tag
pub const ID_KEY: &str = "i";

/// `i:<id>`, zero-padded to `width` digits
pub fn encode(id: usize, width: usize) -> Tag {
    Tag::key_value(ID_KEY, format!("{:0width$}", id, width = width))
}

pub fn is_id_tag(tag: &Tag) -> bool {
    tag.key() == Some(ID_KEY)
}

/// First identifier tag in the title, if any
pub fn find_id_tag(task: &Task) -> Option<Tag> {
    find_tags(&task.title)
        .into_iter()
        .map(|m| m.tag)
        .find(is_id_tag)
}

/// An edited line with its identifier resolved and stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    /// Permanent identifier, `None` for a new task
    pub id: Option<usize>,
    /// The line without any identifier tags
    pub task: Task,
    pub warnings: Vec<String>,
}

/// Resolve the identifier of the edited slice line `line`.
///
/// `presented` are the identifiers handed out for this session and `claimed`
/// those already taken by earlier lines.
pub fn recover(
    line: usize,
    task: &Task,
    presented: &BTreeSet<usize>,
    claimed: &HashSet<usize>,
) -> Recovered {
    let mut id = None;
    let mut warnings = Vec::new();

    for m in find_tags(&task.title).into_iter().filter(|m| is_id_tag(&m.tag)) {
        let raw = m.tag.raw();
        if id.is_some() {
            warnings.push(format!("line {}: ignoring extra identifier tag {}", line, raw));
            continue;
        }
        let value = m.tag.value_for(ID_KEY).unwrap_or_default();
        match parse_id(value) {
            None => {
                warnings.push(format!("line {}: ignoring invalid identifier tag {}", line, raw));
            }
            Some(n) if !presented.contains(&n) => {
                warnings.push(format!(
                    "line {}: ignoring identifier tag {} that was not part of this slice",
                    line, raw
                ));
            }
            Some(n) if claimed.contains(&n) => {
                warnings.push(format!(
                    "line {}: identifier tag {} is used by an earlier line, treating as a new task",
                    line, raw
                ));
            }
            Some(n) => id = Some(n),
        }
    }

    Recovered {
        id,
        task: strip(task),
        warnings,
    }
}

/// Digits only, the way `encode` writes them; `str::parse` alone would also
/// take `+1`.
fn parse_id(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Remove every identifier tag from the title
pub fn strip(task: &Task) -> Task {
    task.remove_key(ID_KEY)
}
