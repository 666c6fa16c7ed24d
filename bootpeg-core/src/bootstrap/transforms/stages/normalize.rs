//! Whitespace normalization stage

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::normalize::strip_extra_whitespace;
use crate::bootstrap::transforms::Runnable;

pub struct NormalizeWhitespace;

impl NormalizeWhitespace {
    pub fn new() -> Self {
        NormalizeWhitespace
    }
}

impl Default for NormalizeWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for NormalizeWhitespace {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        Ok(strip_extra_whitespace(&input))
    }
}
