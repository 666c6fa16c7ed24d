//! Stripping stages
//!
//! Thin `Runnable` wrappers around the scanners in
//! [`crate::bootstrap::stripping`].

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::options::MarkerSet;
use crate::bootstrap::stripping::{self, CommentPolicy, CrateAttributeFilter};
use crate::bootstrap::transforms::Runnable;
use tracing::debug;

/// Drops rule-marker spans
pub struct StripRules {
    markers: MarkerSet,
}

impl StripRules {
    pub fn new(markers: MarkerSet) -> Self {
        StripRules { markers }
    }
}

impl Runnable<String, String> for StripRules {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        debug!(stage = "strip-rules", "running stage");
        stripping::strip_rules(&input, &self.markers)
    }
}

/// Drops `#[cfg(test)]` items
pub struct StripTestBlocks {
    sentinel: String,
}

impl StripTestBlocks {
    pub fn new(sentinel: impl Into<String>) -> Self {
        StripTestBlocks {
            sentinel: sentinel.into(),
        }
    }
}

impl Runnable<String, String> for StripTestBlocks {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        debug!(stage = "strip-tests", "running stage");
        stripping::strip_test_blocks(&input, &self.sentinel)
    }
}

/// Drops line comments not covered by the policy's exclusions
pub struct StripComments {
    policy: CommentPolicy,
}

impl StripComments {
    pub fn new(policy: CommentPolicy) -> Self {
        StripComments { policy }
    }
}

impl Runnable<String, String> for StripComments {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        debug!(stage = "strip-comments", "running stage");
        Ok(stripping::strip_comments(&input, &self.policy))
    }
}

/// Drops crate-level attribute lines
pub struct StripCrateAttributes {
    filter: CrateAttributeFilter,
}

impl StripCrateAttributes {
    pub fn new(names: &[String]) -> Result<Self, BootstrapError> {
        Ok(StripCrateAttributes {
            filter: CrateAttributeFilter::new(names)?,
        })
    }
}

impl Runnable<String, String> for StripCrateAttributes {
    fn run(&self, input: String) -> Result<String, BootstrapError> {
        debug!(stage = "strip-crate-attributes", "running stage");
        Ok(self.filter.strip(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::transforms::Transform;

    #[test]
    fn test_stripping_stages_compose() {
        let pipeline = Transform::from_fn(Ok)
            .then(StripRules::new(MarkerSet::default()))
            .then(StripTestBlocks::new("#[cfg(test)]"))
            .then(StripComments::new(CommentPolicy::default()))
            .then(StripCrateAttributes::new(&["crate_id".to_string()]).unwrap());

        let source = [
            "#![crate_id = \"peg\"]",
            "/// Entry point",
            "pub fn parse() {} // TODO",
            "// RULES START",
            "rule!( A <- B );",
            "// RULES END",
            "#[cfg(test)]",
            "mod tests {",
            "}",
        ]
        .join("\n");

        assert_eq!(
            pipeline.run(source).unwrap(),
            "/// Entry point\npub fn parse() {}"
        );
    }

    #[test]
    fn test_stage_errors_propagate() {
        let stage = StripTestBlocks::new("#[cfg(test)]");
        assert!(stage.run("#[cfg(test)]\nmod tests {".to_string()).is_err());
    }
}
