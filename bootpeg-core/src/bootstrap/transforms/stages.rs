//! Individual transformation stages
//!
//! Each stage wraps one text pass and implements `Runnable<String, String>`.

pub mod inlining;
pub mod normalize;
pub mod packaging;
pub mod stripping;

pub use inlining::InlineModules;
pub use normalize::NormalizeWhitespace;
pub use packaging::PackagePrelude;
pub use stripping::{StripComments, StripCrateAttributes, StripRules, StripTestBlocks};
