//! Marker-block strippers
//!
//! Each stripper is a single forward scan over the lines of its input. A scan
//! keeps an explicit state (outside a block, or inside one waiting for its
//! closing line), so deletions never invalidate positions still to be visited.
//!
//! - [`rules`]: spans between the rules start and end sentinels
//! - [`test_blocks`]: `#[cfg(test)]` items closed by a brace at the same indentation
//! - [`comments`]: trailing line comments, except excluded (documentation) prefixes
//! - [`crate_attributes`]: crate-level attribute lines such as `#![crate_id = "..."]`

pub mod comments;
pub mod crate_attributes;
pub mod rules;
pub mod test_blocks;

pub use comments::{strip_comments, CommentPolicy};
pub use crate_attributes::CrateAttributeFilter;
pub use rules::strip_rules;
pub use test_blocks::strip_test_blocks;
