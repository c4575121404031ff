//! Date bookkeeping applied to every reconciled task.
//!
//! Rules run in table order against the task as left by the previous rule,
//! and compare with the task as it was before editing (`None` for inserts).

use chrono::NaiveDate;

use crate::model::task::{START_DATE_KEY, Task};

/// What a rule sees
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub task: &'a Task,
    pub original: Option<&'a Task>,
    pub today: NaiveDate,
}

/// One row of the rule table
pub struct DateRule {
    pub name: &'static str,
    pub applies: fn(&RuleInput<'_>) -> bool,
    pub effect: fn(Task, NaiveDate) -> Task,
}

pub const RULES: &[DateRule] = &[
    DateRule {
        name: "newly completed tasks lose their start date",
        applies: newly_completed,
        effect: clear_start_date,
    },
    DateRule {
        name: "completed tasks have no priority",
        applies: completed,
        effect: clear_priority,
    },
    DateRule {
        name: "a new priority restarts the task",
        applies: priority_changed,
        effect: restart,
    },
    DateRule {
        name: "deferring to a new future start date restarts the task's age",
        applies: deferred,
        effect: stamp_creation_date,
    },
];

/// Run the whole table
pub fn apply_rules(task: Task, original: Option<&Task>, today: NaiveDate) -> Task {
    RULES.iter().fold(task, |task, rule| {
        let input = RuleInput {
            task: &task,
            original,
            today,
        };
        if (rule.applies)(&input) {
            tracing::debug!(rule = rule.name, task = %task, "date rule applied");
            (rule.effect)(task, today)
        } else {
            task
        }
    })
}

fn newly_completed(input: &RuleInput<'_>) -> bool {
    input.task.is_completed() && !input.original.is_some_and(Task::is_completed)
}

fn completed(input: &RuleInput<'_>) -> bool {
    input.task.is_completed() && input.task.priority.is_some()
}

fn priority_changed(input: &RuleInput<'_>) -> bool {
    let Some(original) = input.original else {
        return false;
    };
    !input.task.is_completed()
        && input.task.priority_letter().is_some()
        && input.task.priority_letter() != original.priority_letter()
}

fn deferred(input: &RuleInput<'_>) -> bool {
    let Some(start) = input.task.start_date() else {
        return false;
    };
    start > input.today && input.original.and_then(Task::start_date) != Some(start)
}

fn clear_start_date(task: Task, _today: NaiveDate) -> Task {
    task.remove_key(START_DATE_KEY)
}

fn clear_priority(task: Task, _today: NaiveDate) -> Task {
    task.with_priority(None)
}

fn restart(task: Task, today: NaiveDate) -> Task {
    task.with_creation_date(Some(today)).remove_key(START_DATE_KEY)
}

fn stamp_creation_date(task: Task, today: NaiveDate) -> Task {
    task.with_creation_date(Some(today))
}
