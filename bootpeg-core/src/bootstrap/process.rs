//! External command execution
//!
//! The build tool and the grammar compiler are opaque collaborators. The run
//! only needs their exit status and captured output, which [`CommandRunner`]
//! abstracts so the orchestration can be exercised without spawning anything.
//! Calls block until the process exits; there is no timeout.

use crate::bootstrap::error::BootstrapError;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// A fully resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What a finished process left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub success: bool,
}

impl ProcessOutput {
    /// Turn a failed exit into [`BootstrapError::ExternalProcess`].
    ///
    /// Diagnostics come from stderr, or from stdout when stderr is empty.
    pub fn require_success(self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        if self.success {
            return Ok(self);
        }
        let diagnostics = if self.stderr.trim().is_empty() {
            self.stdout
        } else {
            self.stderr
        };
        Err(BootstrapError::ExternalProcess {
            command: invocation.to_string(),
            status: self.status,
            diagnostics,
        })
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        (**self).run(invocation)
    }
}

/// Spawns real processes with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        debug!(
            command = %invocation,
            working_dir = %invocation.working_dir.display(),
            "spawning process"
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .output()
            .map_err(|err| BootstrapError::ExternalProcess {
                command: invocation.to_string(),
                status: None,
                diagnostics: format!("failed to start: {}", err),
            })?;

        let status = output.status.code();
        debug!(command = %invocation, ?status, "process exited");

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status,
            success: output.status.success(),
        })
    }
}
