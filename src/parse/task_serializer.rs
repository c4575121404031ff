use crate::model::task::{DATE_FORMAT, Task};

/// Serialize a task to its todo.txt line. Inverse of `parse_task`.
pub fn serialize_task(task: &Task) -> String {
    let mut line = String::with_capacity(task.title.len() + 28);

    if let Some(date) = task.completion_date {
        line.push_str(&format!("x {} ", date.format(DATE_FORMAT)));
    }

    if let Some(priority) = task.priority {
        line.push_str(&format!("{} ", priority));
    }

    if let Some(date) = task.creation_date {
        line.push_str(&format!("{} ", date.format(DATE_FORMAT)));
    }

    line.push_str(&task.title);
    line
}

/// Serialize tasks one line each
pub fn serialize_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    tasks.into_iter().map(serialize_task).collect()
}
