use std::path::Path;
use std::process::{Command, ExitStatus};

/// Error type for editor invocation
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no editor configured: set $VISUAL or $EDITOR, or `editor` in the config file")]
    NotConfigured,
    #[error("could not parse editor command {command:?}: {source}")]
    BadCommand {
        command: String,
        source: shell_words::ParseError,
    },
    #[error("could not launch editor {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("editor {program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// An editor command line, e.g. `code --wait`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    /// Split a shell-style command line. Empty commands count as unset.
    pub fn from_command(command: &str) -> Result<Self, EditorError> {
        let mut parts = shell_words::split(command).map_err(|source| EditorError::BadCommand {
            command: command.to_string(),
            source,
        })?;
        if parts.is_empty() {
            return Err(EditorError::NotConfigured);
        }
        let program = parts.remove(0);
        Ok(Editor {
            program,
            args: parts,
        })
    }

    /// The configured command, if any
    pub fn resolve(configured: Option<&str>) -> Result<Self, EditorError> {
        match configured {
            Some(command) if !command.trim().is_empty() => Editor::from_command(command),
            _ => Err(EditorError::NotConfigured),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Open `path` and block until the editor exits.
    pub fn edit(&self, path: &Path) -> Result<(), EditorError> {
        tracing::debug!(program = %self.program, path = %path.display(), "launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| EditorError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(EditorError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
