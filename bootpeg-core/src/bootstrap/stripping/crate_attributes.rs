//! Removal of crate-level attribute lines
//!
//! Attributes such as `#![crate_id = "peg"]` are only legal at the root of a
//! crate and would be rejected inside the module that embeds the prelude.
//! Only lines starting at column 0 with `#![<name>` for a configured name are
//! removed; other inner attributes (`#![allow(...)]`) are kept.

use crate::bootstrap::error::BootstrapError;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct CrateAttributeFilter {
    pattern: Option<Regex>,
}

impl CrateAttributeFilter {
    /// Build a filter for the given attribute names; no names means no filtering.
    pub fn new(names: &[String]) -> Result<Self, BootstrapError> {
        if names.is_empty() {
            return Ok(CrateAttributeFilter { pattern: None });
        }
        let alternatives = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"^#!\[\s*(?:{})\b", alternatives);
        let pattern = Regex::new(&source).map_err(|err| BootstrapError::InvalidPattern {
            pattern: source.clone(),
            message: err.to_string(),
        })?;
        Ok(CrateAttributeFilter {
            pattern: Some(pattern),
        })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(line))
    }

    pub fn strip(&self, text: &str) -> String {
        if self.pattern.is_none() {
            return text.to_string();
        }
        text.split('\n')
            .filter(|line| !self.matches(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
