use std::ops::Range;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::model::tag::Tag;

/// Whitespace-delimited tokens. Tags are always whole tokens, never mid-word.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// `key:value` with a colon-free key. A value starting with `//` is a URL
/// scheme (`http://...`), not a tag.
static KEY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s:]+):(\S+)$").expect("valid regex"));

/// One tag occurrence in a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub tag: Tag,
    /// Byte range of the token in the searched text
    pub range: Range<usize>,
}

/// Classify a single token. Returns `None` for ordinary words.
pub fn parse_tag_token(token: &str) -> Option<Tag> {
    if let Some(name) = token.strip_prefix('@') {
        return (!name.is_empty()).then(|| Tag::context(name));
    }
    if let Some(name) = token.strip_prefix('+') {
        return (!name.is_empty()).then(|| Tag::project(name));
    }
    let caps = KEY_VALUE_RE.captures(token)?;
    let value = &caps[2];
    if value.starts_with("//") {
        return None;
    }
    Some(Tag::key_value(&caps[1], value))
}

/// Find every tag occurrence in `text`, in order of appearance.
pub fn find_tags(text: &str) -> Vec<TagMatch> {
    TOKEN_RE
        .find_iter(text)
        .filter_map(|m| {
            parse_tag_token(m.as_str()).map(|tag| TagMatch {
                tag,
                range: m.start()..m.end(),
            })
        })
        .collect()
}

/// All distinct tags in `text`, in order of first appearance.
pub fn parse_all(text: &str) -> IndexSet<Tag> {
    find_tags(text).into_iter().map(|m| m.tag).collect()
}

/// Byte ranges of every whitespace-delimited token in `text`.
pub(crate) fn token_ranges(text: &str) -> Vec<Range<usize>> {
    TOKEN_RE.find_iter(text).map(|m| m.start()..m.end()).collect()
}
