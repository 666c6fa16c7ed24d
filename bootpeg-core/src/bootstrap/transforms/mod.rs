//! Transform pipeline infrastructure
//!
//! The prelude is produced by a chain of text-to-text stages. Each stage
//! implements [`Runnable`], and [`Transform`] composes stages with `.then()`:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(StripRules::new(markers.clone()))
//!     .then(InlineModules::new(root_path, "  "))
//!     .then(StripTestBlocks::new("#[cfg(test)]"));
//!
//! let flattened = pipeline.run(source)?;
//! ```
//!
//! The compiler checks that each stage's input type matches the previous
//! stage's output type, and the first failing stage aborts the chain.
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages (strippers, inliner, normalizer, packager)
//! - [`standard`]: the prelude pipeline assembled from [`PreludeOptions`](crate::bootstrap::options::PreludeOptions)

pub mod stages;
pub mod standard;

use crate::bootstrap::error::BootstrapError;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, BootstrapError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, BootstrapError> + Send + Sync>,
}

/// The shape of every prelude stage
pub type TextTransform = Transform<String, String>;

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, BootstrapError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static transform after this transform
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, BootstrapError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, BootstrapError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    struct Uppercase;
    impl Runnable<String, String> for Uppercase {
        fn run(&self, input: String) -> Result<String, BootstrapError> {
            Ok(input.to_uppercase())
        }
    }

    struct LineCount;
    impl Runnable<String, usize> for LineCount {
        fn run(&self, input: String) -> Result<usize, BootstrapError> {
            Ok(input.lines().count())
        }
    }

    struct RejectEmpty;
    impl Runnable<String, String> for RejectEmpty {
        fn run(&self, input: String) -> Result<String, BootstrapError> {
            if input.is_empty() {
                Err(BootstrapError::MarkerNotFound {
                    marker: "<anything>".to_string(),
                    context: "empty input".to_string(),
                })
            } else {
                Ok(input)
            }
        }
    }

    static TRIM: Lazy<TextTransform> =
        Lazy::new(|| Transform::from_fn(|s: String| Ok(s.trim().to_string())));

    #[test]
    fn test_stages_run_in_order() {
        let transform = Transform::from_fn(|s: String| Ok(format!("{}\nb", s)))
            .then(Uppercase)
            .then(LineCount);
        assert_eq!(transform.run("a".to_string()).unwrap(), 2);
    }

    #[test]
    fn test_error_stops_the_chain() {
        let transform = Transform::from_fn(Ok).then(RejectEmpty).then(Uppercase);
        assert!(transform.run(String::new()).is_err());
        assert_eq!(transform.run("x".to_string()).unwrap(), "X");
    }

    #[test]
    fn test_then_transform_uses_static_pipeline() {
        let transform = Transform::from_fn(Ok).then(Uppercase).then_transform(&TRIM);
        assert_eq!(transform.run("  mod a;  ".to_string()).unwrap(), "MOD A;");
    }
}
