use chrono::NaiveDate;

use crate::model::task::{DATE_FORMAT, Priority, Task};

/// Parse one todo.txt line: `[x DATE ][(P) ][DATE ]title`.
///
/// Never fails. Each prefix needs exactly one trailing space and a valid
/// calendar date; anything that does not fit stays in the title, so
/// serializing the result reproduces `line` byte for byte.
pub fn parse_task(line: &str) -> Task {
    let mut rest = line;

    let completion_date = match rest.strip_prefix("x ").and_then(split_date) {
        Some((date, after)) => {
            rest = after;
            Some(date)
        }
        None => None,
    };

    let priority = match split_priority(rest) {
        Some((priority, after)) => {
            rest = after;
            Some(priority)
        }
        None => None,
    };

    let creation_date = match split_date(rest) {
        Some((date, after)) => {
            rest = after;
            Some(date)
        }
        None => None,
    };

    Task {
        completion_date,
        priority,
        creation_date,
        title: rest.to_string(),
    }
}

/// Split `YYYY-MM-DD ` off the front of `s`.
fn split_date(s: &str) -> Option<(NaiveDate, &str)> {
    let head = s.get(..10)?;
    let after = s[10..].strip_prefix(' ')?;
    if !is_date_shape(head) {
        return None;
    }
    let date = NaiveDate::parse_from_str(head, DATE_FORMAT).ok()?;
    Some((date, after))
}

/// Split `(P) ` off the front of `s`.
fn split_priority(s: &str) -> Option<(Priority, &str)> {
    let inner = s.strip_prefix('(')?;
    let mut chars = inner.chars();
    let priority = Priority::from_char(chars.next()?)?;
    let after = chars.as_str().strip_prefix(") ")?;
    Some((priority, after))
}

/// Exactly four, two and two ASCII digits separated by dashes. chrono alone
/// would also accept `2000-1-01`, which would not survive a round trip.
fn is_date_shape(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
