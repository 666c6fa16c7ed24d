//! Main module for bootpeg library functionality

pub mod error;
pub mod inlining;
pub mod normalize;
pub mod options;
pub mod packaging;
pub mod process;
pub mod rules;
pub mod runner;
pub mod source;
pub mod stripping;
pub mod text;
pub mod transforms;

pub use error::{BootstrapError, Stage};
pub use options::{CommandSpec, ExtractOptions, MarkerSet, PreludeOptions, ProjectLayout, RunOptions};
pub use runner::{Bootstrapper, RunReport};
