//! Source units and artifact writing

use crate::bootstrap::error::BootstrapError;
use std::fs;
use std::path::{Path, PathBuf};

/// A text resource identified by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SourceUnit {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a unit from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| BootstrapError::io(path, err))?;
        Ok(SourceUnit::new(path, text))
    }

    /// Directory that module declarations in this unit resolve against
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Overwrite `path` with `contents`, creating missing parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), BootstrapError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| BootstrapError::io(parent, err))?;
    }
    fs::write(path, contents).map_err(|err| BootstrapError::io(path, err))
}
