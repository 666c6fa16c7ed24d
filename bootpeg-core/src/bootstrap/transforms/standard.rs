//! Standard transform definitions
//!
//! The prelude pipeline, in order:
//!
//! 1. strip rule-marker spans (root file only, before anything is inlined)
//! 2. inline modules recursively
//! 3. strip test blocks
//! 4. strip comments
//! 5. strip crate-level attributes (skipped when no names are configured)
//! 6. normalize whitespace
//! 7. wrap in the `PRELUDE` constant

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::options::PreludeOptions;
use crate::bootstrap::stripping::CommentPolicy;
use crate::bootstrap::transforms::stages::{
    InlineModules, NormalizeWhitespace, PackagePrelude, StripComments, StripCrateAttributes,
    StripRules, StripTestBlocks,
};
use crate::bootstrap::transforms::{TextTransform, Transform};
use once_cell::sync::Lazy;
use std::path::Path;

/// Whitespace normalization as a standalone transform
pub static NORMALIZE: Lazy<TextTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(NormalizeWhitespace::new()));

/// Steps 1 to 5: the flattened, stripped source before normalization
pub fn flatten_transform(
    root: &Path,
    options: &PreludeOptions,
) -> Result<TextTransform, BootstrapError> {
    let transform = Transform::from_fn(Ok)
        .then(StripRules::new(options.markers.clone()))
        .then(InlineModules::new(root, options.indent_unit.clone()))
        .then(StripTestBlocks::new(options.markers.test_sentinel.clone()))
        .then(StripComments::new(CommentPolicy::new(
            options.comment_exclusions.iter().cloned(),
        )));

    if options.crate_attributes.is_empty() {
        Ok(transform)
    } else {
        Ok(transform.then(StripCrateAttributes::new(&options.crate_attributes)?))
    }
}

/// The complete pipeline from root source text to the packaged prelude
pub fn prelude_transform(
    root: &Path,
    options: &PreludeOptions,
) -> Result<TextTransform, BootstrapError> {
    Ok(flatten_transform(root, options)?
        .then_transform(&NORMALIZE)
        .then(PackagePrelude::new(options.header.clone())))
}
