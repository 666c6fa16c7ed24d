//! Module inlining stage
//!
//! Unlike the other stages the inliner needs to know where its input came
//! from, so the stage is bound to the path of the root source file.

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::inlining::ModuleInliner;
use crate::bootstrap::transforms::Runnable;
use std::path::PathBuf;
use tracing::debug;

pub struct InlineModules {
    root: PathBuf,
    inliner: ModuleInliner,
}

impl InlineModules {
    pub fn new(root: impl Into<PathBuf>, indent_unit: impl Into<String>) -> Self {
        InlineModules {
            root: root.into(),
            inliner: ModuleInliner::new(indent_unit),
        }
    }
}

impl Runnable<String, String> for InlineModules {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        debug!(stage = "inline-modules", root = %self.root.display(), "running stage");
        self.inliner.inline(&self.root, &input)
    }
}
