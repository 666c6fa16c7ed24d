//! Prelude packaging stage

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::packaging::prelude_wrap;
use crate::bootstrap::transforms::Runnable;

/// Wraps the flattened text in the `PRELUDE` constant
pub struct PackagePrelude {
    header: Option<String>,
}

impl PackagePrelude {
    pub fn new(header: Option<String>) -> Self {
        PackagePrelude { header }
    }
}

impl Runnable<String, String> for PackagePrelude {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        Ok(prelude_wrap(&input, self.header.as_deref()))
    }
}
