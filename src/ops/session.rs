use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use crate::io::editor::EditorError;
use crate::io::env::{Environment, scratch_file_name};
use crate::model::config::SliceConfig;
use crate::model::task_set::TaskSet;
use crate::ops::reconcile::{self, Change, MergeOptions};
use crate::ops::slice::{self, SliceContext, SliceError, SliceSpec};

/// Error type for a slice session. Any of these leaves the todo file as it was.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not create temporary directory: {0}")]
    TempDir(io::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Slice(#[from] SliceError),
}

/// What a finished session did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Permanent identifiers shown in the editor
    pub presented: BTreeSet<usize>,
    pub changes: Vec<Change>,
    pub warnings: Vec<String>,
    /// Whether the todo file was rewritten
    pub written: bool,
}

/// Run one slice session: select, edit, merge, save.
pub fn run<E: Environment>(
    env: &mut E,
    config: &SliceConfig,
    spec: &SliceSpec,
) -> Result<SessionReport, SessionError> {
    let todo_file = &config.todo_file;
    let today = env.today();

    let lines = env.read_lines(todo_file).map_err(|source| SessionError::Read {
        path: todo_file.clone(),
        source,
    })?;
    let tasks = TaskSet::from_lines(&lines);

    let ctx = SliceContext {
        today,
        disable_filter: config.disable_filter,
        review_intervals: &config.review_intervals,
    };
    let selected = slice::select(&tasks, spec, &ctx)?;

    let edited = {
        let dir = env.create_temp_dir().map_err(SessionError::TempDir)?;
        let path = dir.as_ref().join(scratch_file_name(todo_file));

        env.write_lines(&path, &selected.tasks.to_lines(false))
            .map_err(|source| SessionError::Write {
                path: path.clone(),
                source,
            })?;
        env.launch_editor(&path)?;
        let lines = env.read_lines(&path).map_err(|source| SessionError::Read {
            path: path.clone(),
            source,
        })?;
        lines
            .iter()
            .map(|l| l.trim_end().to_string())
            .collect::<Vec<_>>()
    };
    let edited = TaskSet::from_lines(&edited);

    let options = MergeOptions {
        today,
        date_on_add: config.date_on_add,
    };
    let outcome = reconcile::merge(&tasks, &selected.presented, spec, &edited, &options);

    for warning in &outcome.warnings {
        env.warn(warning);
    }
    for change in &outcome.changes {
        env.report_change(change);
    }

    let written = outcome.tasks != tasks;
    if written {
        env.write_lines(todo_file, &outcome.tasks.to_lines(config.preserve_line_numbers))
            .map_err(|source| SessionError::Write {
                path: todo_file.clone(),
                source,
            })?;
    } else {
        tracing::debug!(path = %todo_file.display(), "no changes, leaving todo file alone");
    }

    Ok(SessionReport {
        presented: selected.presented,
        changes: outcome.changes,
        warnings: outcome.warnings,
        written,
    })
}
