//! Error taxonomy for a refresh run
//!
//! Every stage is a pure transform that either succeeds or aborts the whole run.
//! There is no partial recovery: the first error is propagated to the caller,
//! wrapped in [`BootstrapError::StageFailed`] by the runner so the message names
//! the stage that failed.

use std::fmt;
use std::path::{Path, PathBuf};

/// The steps of a refresh run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BuildPrelude,
    WritePrelude,
    Rebuild,
    Compile,
    WriteCompiled,
    Splice,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::BuildPrelude => "build-prelude",
            Stage::WritePrelude => "write-prelude",
            Stage::Rebuild => "rebuild",
            Stage::Compile => "compile",
            Stage::WriteCompiled => "write-compiled",
            Stage::Splice => "splice",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Errors that abort a refresh run
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Neither `<dir>/<name>/mod.rs` nor `<dir>/<name>.rs` exists
    ModuleResolution {
        name: String,
        declared_in: PathBuf,
        candidates: Vec<PathBuf>,
    },
    /// A module (transitively) declares one of its own ancestors
    ModuleCycle { chain: Vec<PathBuf> },
    /// An expected sentinel line is missing
    MarkerNotFound { marker: String, context: String },
    /// The build or compiler process could not run or exited with failure
    ExternalProcess {
        command: String,
        status: Option<i32>,
        diagnostics: String,
    },
    /// The top-level rule sentinel is absent from compiler output
    ExtractionAmbiguity { sentinel: String },
    /// A configured pattern could not be compiled
    InvalidPattern { pattern: String, message: String },
    /// Reading or writing a file failed
    Io { path: PathBuf, message: String },
    /// Any of the above, tagged with the stage that raised it
    StageFailed {
        stage: Stage,
        source: Box<BootstrapError>,
    },
}

impl BootstrapError {
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        BootstrapError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Tag this error with the stage it occurred in.
    ///
    /// Errors that are already tagged keep their original stage.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            tagged @ BootstrapError::StageFailed { .. } => tagged,
            other => BootstrapError::StageFailed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage this error was raised in, if it has been tagged
    pub fn stage(&self) -> Option<Stage> {
        match self {
            BootstrapError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage tag removed
    pub fn root_cause(&self) -> &BootstrapError {
        match self {
            BootstrapError::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::ModuleResolution {
                name,
                declared_in,
                candidates,
            } => {
                let tried = candidates
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "Module '{}' declared in {} not found (tried {})",
                    name,
                    declared_in.display(),
                    tried
                )
            }
            BootstrapError::ModuleCycle { chain } => {
                let chain = chain
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                write!(f, "Cyclic module declarations: {}", chain)
            }
            BootstrapError::MarkerNotFound { marker, context } => {
                write!(f, "Marker '{}' not found: {}", marker, context)
            }
            BootstrapError::ExternalProcess {
                command,
                status,
                diagnostics,
            } => {
                match status {
                    Some(code) => write!(f, "Command `{}` exited with status {}", command, code)?,
                    None => write!(f, "Command `{}` did not complete", command)?,
                }
                if diagnostics.trim().is_empty() {
                    Ok(())
                } else {
                    write!(f, ":\n{}", diagnostics.trim_end())
                }
            }
            BootstrapError::ExtractionAmbiguity { sentinel } => write!(
                f,
                "Compiler output has no line starting with '{}'",
                sentinel
            ),
            BootstrapError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            BootstrapError::Io { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
            BootstrapError::StageFailed { stage, source } => {
                write!(f, "Stage '{}' failed: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::StageFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
