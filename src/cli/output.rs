use serde::Serialize;

use crate::ops::reconcile::Change;
use crate::ops::session::SessionReport;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SessionJson {
    pub presented: usize,
    pub written: bool,
    pub changes: Vec<ChangeJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub id: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn change_to_json(change: &Change) -> ChangeJson {
    match change {
        Change::Inserted { id, task } => ChangeJson {
            id: *id,
            kind: "inserted",
            before: None,
            after: Some(task.to_string()),
        },
        Change::Modified { id, before, after } => ChangeJson {
            id: *id,
            kind: "modified",
            before: Some(before.to_string()),
            after: Some(after.to_string()),
        },
        Change::Deleted { id, task } => ChangeJson {
            id: *id,
            kind: "deleted",
            before: Some(task.to_string()),
            after: None,
        },
    }
}

pub fn session_to_json(report: &SessionReport) -> SessionJson {
    SessionJson {
        presented: report.presented.len(),
        written: report.written,
        changes: report.changes.iter().map(change_to_json).collect(),
        warnings: report.warnings.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One-line tally printed after the per-change lines
pub fn format_summary(report: &SessionReport) -> String {
    let (mut inserted, mut modified, mut deleted) = (0, 0, 0);
    for change in &report.changes {
        match change {
            Change::Inserted { .. } => inserted += 1,
            Change::Modified { .. } => modified += 1,
            Change::Deleted { .. } => deleted += 1,
        }
    }
    if inserted + modified + deleted == 0 {
        return format!("{} tasks shown, no changes", report.presented.len());
    }
    format!(
        "{} tasks shown: {} added, {} modified, {} deleted",
        report.presented.len(),
        inserted,
        modified,
        deleted
    )
}
