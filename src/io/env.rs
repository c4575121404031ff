use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tempfile::TempDir;

use crate::io::editor::{Editor, EditorError};
use crate::io::todo_io;
use crate::ops::reconcile::Change;

/// The outside world as seen by a slice session.
///
/// Everything with a side effect goes through here so a session can run
/// against a scripted environment in tests.
pub trait Environment {
    /// Scratch directory, removed when dropped
    type TempDir: AsRef<Path>;

    fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>>;
    fn write_lines(&mut self, path: &Path, lines: &[String]) -> io::Result<()>;
    fn create_temp_dir(&mut self) -> io::Result<Self::TempDir>;
    /// Blocks until the editor exits
    fn launch_editor(&mut self, path: &Path) -> Result<(), EditorError>;
    fn today(&self) -> NaiveDate;
    /// Non-fatal diagnostic
    fn warn(&mut self, message: &str);
    /// Called once per change, in merge order
    fn report_change(&mut self, change: &Change);
}

/// Real files, a real editor, the local clock
pub struct SystemEnv {
    editor: Editor,
    today: NaiveDate,
    /// Print each change to stdout as it is reported
    echo_changes: bool,
}

impl SystemEnv {
    pub fn new(editor: Editor, echo_changes: bool) -> Self {
        SystemEnv {
            editor,
            today: Local::now().date_naive(),
            echo_changes,
        }
    }
}

/// Keeps the directory alive; deleting it is `TempDir`'s job on drop.
pub struct ScratchDir(TempDir);

impl AsRef<Path> for ScratchDir {
    fn as_ref(&self) -> &Path {
        self.0.path()
    }
}

impl Environment for SystemEnv {
    type TempDir = ScratchDir;

    fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>> {
        todo_io::read_lines(path)
    }

    fn write_lines(&mut self, path: &Path, lines: &[String]) -> io::Result<()> {
        todo_io::write_lines(path, lines)
    }

    fn create_temp_dir(&mut self) -> io::Result<ScratchDir> {
        let dir = tempfile::Builder::new().prefix("todo-slice-").tempdir()?;
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(ScratchDir(dir))
    }

    fn launch_editor(&mut self, path: &Path) -> Result<(), EditorError> {
        self.editor.edit(path)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn report_change(&mut self, change: &Change) {
        if self.echo_changes {
            println!("{}", change);
        }
    }
}

/// Name of the scratch file: same as the todo file so editors pick the same
/// syntax highlighting.
pub fn scratch_file_name(todo_file: &Path) -> PathBuf {
    todo_file
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("todo.txt"))
}
