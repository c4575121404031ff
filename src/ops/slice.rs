use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::model::config::ReviewIntervals;
use crate::model::tag::Tag;
use crate::model::task::{Priority, Task};
use crate::model::task_set::TaskSet;
use crate::ops::id_tag;
use crate::parse::tag_parser::parse_tag_token;

/// Error type for slice selection
#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    #[error("match criterion {0:?} is neither a priority (A-Z or _) nor a tag")]
    BadCriterion(String),
    #[error("more than one priority given: {0} and {1}")]
    TwoPriorities(char, char),
    #[error("{0} is reserved for task identifiers and cannot be used as a filter")]
    ReservedTag(String),
    #[error("task on line {id} already has an identifier tag ({tag}); rename it before slicing")]
    TaskHasIdTag { id: usize, tag: String },
}

/// Which tasks a slice shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceKind {
    /// Every open task
    All,
    /// Tasks with a given priority and/or tags
    Match,
    /// Tasks whose start date is still ahead
    Future,
    /// Tasks due for another look, by age per priority
    Review,
    /// Tasks containing every search term
    List,
}

impl fmt::Display for SliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceKind::All => write!(f, "all"),
            SliceKind::Match => write!(f, "match"),
            SliceKind::Future => write!(f, "future"),
            SliceKind::Review => write!(f, "review"),
            SliceKind::List => write!(f, "list"),
        }
    }
}

/// A slice kind together with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSpec {
    pub kind: SliceKind,
    /// Pinned priority (`match` only). `NoLevel` selects unprioritized tasks.
    pub priority: Option<Priority>,
    /// Tags every selected task must carry (`match` only)
    pub tags: Vec<Tag>,
    /// Search terms (`list` only); a leading `-` excludes
    pub terms: Vec<String>,
}

impl SliceSpec {
    pub fn new(kind: SliceKind) -> Self {
        SliceSpec {
            kind,
            priority: None,
            tags: Vec::new(),
            terms: Vec::new(),
        }
    }

    /// Build a `match` slice from arguments like `A`, `_`, `@phone`, `due:x`.
    pub fn matching<S: AsRef<str>>(criteria: &[S]) -> Result<Self, SliceError> {
        let mut spec = SliceSpec::new(SliceKind::Match);
        for criterion in criteria {
            let criterion = criterion.as_ref();
            let mut chars = criterion.chars();
            if let (Some(c), None) = (chars.next(), chars.next())
                && let Some(priority) = Priority::from_char(c)
            {
                if let Some(existing) = spec.priority {
                    return Err(SliceError::TwoPriorities(existing.as_char(), c));
                }
                spec.priority = Some(priority);
                continue;
            }

            let tag = parse_tag_token(criterion)
                .ok_or_else(|| SliceError::BadCriterion(criterion.to_string()))?;
            if id_tag::is_id_tag(&tag) {
                return Err(SliceError::ReservedTag(criterion.to_string()));
            }
            if !spec.tags.contains(&tag) {
                spec.tags.push(tag);
            }
        }
        Ok(spec)
    }

    /// Build a `list` slice from search terms
    pub fn listing<S: AsRef<str>>(terms: &[S]) -> Self {
        SliceSpec {
            terms: terms.iter().map(|t| t.as_ref().to_string()).collect(),
            ..SliceSpec::new(SliceKind::List)
        }
    }

    /// Priority to use when the edited line has none of its own.
    ///
    /// `match` restores the pinned priority, `review` restores the task's own
    /// priority (it was shown as `(_)`), every other slice showed the real
    /// priority so an absent one means "none".
    pub fn fallback_priority(&self, original: Option<&Task>) -> Option<Priority> {
        let fallback = match self.kind {
            SliceKind::Match => self.priority,
            SliceKind::Review => original.and_then(|t| t.priority),
            _ => None,
        };
        fallback.filter(|p| matches!(p, Priority::Letter(_)))
    }
}

/// Everything a visibility check needs besides the task
#[derive(Debug, Clone, Copy)]
pub struct SliceContext<'a> {
    pub today: NaiveDate,
    /// Show completed and not-yet-started tasks anyway
    pub disable_filter: bool,
    pub review_intervals: &'a ReviewIntervals,
}

/// The editable view handed to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    /// Permanent identifiers of every task shown
    pub presented: BTreeSet<usize>,
    /// The shown lines, numbered 1..=n in display order
    pub tasks: TaskSet,
}

/// Open and already started, unless filtering is disabled
fn is_visible(task: &Task, ctx: &SliceContext<'_>) -> bool {
    if ctx.disable_filter {
        return true;
    }
    !task.is_completed() && task.start_date().is_none_or(|start| start <= ctx.today)
}

fn is_reviewable(task: &Task, ctx: &SliceContext<'_>) -> bool {
    if let Some(start) = task.start_date() {
        return start <= ctx.today;
    }
    let Some(days) = ctx.review_intervals.days_for(task.priority_letter()) else {
        return true;
    };
    let Some(created) = task.creation_date else {
        return true;
    };
    (ctx.today - created).num_days() >= i64::from(days)
}

fn contains_terms(task: &Task, terms: &[String]) -> bool {
    let line = task.to_string().to_lowercase();
    terms.iter().all(|term| match term.strip_prefix('-') {
        Some(excluded) if !excluded.is_empty() => !line.contains(&excluded.to_lowercase()),
        _ => line.contains(&term.to_lowercase()),
    })
}

/// Whether `task` belongs in the slice
pub fn matches(task: &Task, spec: &SliceSpec, ctx: &SliceContext<'_>) -> bool {
    match spec.kind {
        SliceKind::All => is_visible(task, ctx),
        SliceKind::Match => {
            let priority_ok = match spec.priority {
                None => true,
                Some(Priority::NoLevel) => task.priority_letter().is_none(),
                Some(Priority::Letter(c)) => task.priority_letter() == Some(c),
            };
            is_visible(task, ctx) && priority_ok && spec.tags.iter().all(|t| task.has_tag(t))
        }
        SliceKind::Future => {
            (ctx.disable_filter || !task.is_completed())
                && task.start_date().is_some_and(|start| start > ctx.today)
        }
        SliceKind::Review => is_visible(task, ctx) && is_reviewable(task, ctx),
        SliceKind::List => is_visible(task, ctx) && contains_terms(task, &spec.terms),
    }
}

/// The editable form of `task`: filter-implied fields stripped, creation
/// date hidden, identifier tag in front. Required tags are only hidden when
/// they sit in the trailing tag run, where merging puts them back.
pub fn apply(task: &Task, id: usize, width: usize, spec: &SliceSpec) -> Task {
    let mut editable = task.remove_trailing_tags(spec.tags.iter()).with_creation_date(None);
    match spec.kind {
        SliceKind::Review => editable = editable.with_priority(Some(Priority::NoLevel)),
        SliceKind::Match if spec.priority.is_some() => editable = editable.with_priority(None),
        _ => {}
    }
    editable.add_tags([&id_tag::encode(id, width)], true)
}

/// Select and transform the tasks of `tasks` that belong in the slice.
pub fn select(tasks: &TaskSet, spec: &SliceSpec, ctx: &SliceContext<'_>) -> Result<Slice, SliceError> {
    let width = tasks.id_width();
    let mut presented = BTreeSet::new();
    let mut editable = TaskSet::new();

    for (id, task) in tasks.iter() {
        if !matches(task, spec, ctx) {
            continue;
        }
        if let Some(tag) = id_tag::find_id_tag(task) {
            return Err(SliceError::TaskHasIdTag { id, tag: tag.raw() });
        }
        presented.insert(id);
        editable.insert(id, apply(task, id, width, spec));
    }

    let sorted = if spec.kind == SliceKind::Future {
        editable.sorted_by_key(|t| (t.start_date(), t.to_string()))
    } else {
        editable.sorted_by_key(|t| t.to_string())
    };
    tracing::debug!(kind = %spec.kind, selected = presented.len(), total = tasks.len(), "slice selected");

    Ok(Slice {
        presented,
        tasks: sorted,
    })
}
