//! Subprocess execution.
//!
//! adb is the only external program apkscan runs, and it always runs to
//! completion with both streams captured. [`Cmd`] does that and sorts the
//! ways it can go wrong into [`ProcessError`].

use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Captured result of a finished child.
#[derive(Debug, Clone)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    /// Exit code, or -1 when the child was killed by a signal.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Nothing executable at that name or path.
    #[error("'{program}' not found. Is it installed and on PATH?")]
    NotFound { program: String },

    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child ran and exited non-zero.
    #[error("{context} (exit code {code}){}", stderr_suffix(.stderr))]
    Failed {
        context: String,
        code: i32,
        stderr: String,
    },
}

/// Non-blank lines of `text`, trimmed and joined with `; `.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// One external command, built up then run once.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    context: Option<String>,
}

impl Cmd {
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            context: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    /// Message leading a non-zero exit error, e.g. `adb devices failed`.
    pub fn context(mut self, msg: impl Into<String>) -> Self {
        self.context = Some(msg.into());
        self
    }

    /// Run to completion. Blocks with no timeout; a hung adb hangs the scan.
    pub fn run(self) -> Result<Captured, ProcessError> {
        tracing::trace!(program = %self.program, args = ?self.args, "exec");

        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => output,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(ProcessError::NotFound {
                    program: self.program,
                })
            }
            Err(source) => {
                return Err(ProcessError::Spawn {
                    program: self.program,
                    source,
                })
            }
        };

        let captured = Captured {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if captured.status.success() {
            return Ok(captured);
        }
        Err(ProcessError::Failed {
            context: self
                .context
                .unwrap_or_else(|| format!("'{}' failed", self.program)),
            code: captured.code(),
            stderr: single_line(&captured.stderr),
        })
    }
}

/// Resolve a program name on PATH, or check an explicit path is executable.
pub fn which(program: &str) -> Option<String> {
    which::which(program)
        .ok()
        .map(|path| path.to_string_lossy().into_owned())
}
