//! # bootpeg
//!
//! Tooling for a self-hosting PEG parser generator.
//!
//! A generator that parses its own grammar language carries two copies of its
//! parser: the hand-edited multi-file development tree, and a single-file
//! "prelude" embedded as a string constant into every parser it generates.
//! This crate keeps the two in sync:
//!
//! 1. The development tree is flattened into the prelude: module declarations
//!    are inlined recursively, rule markers, test blocks, comments and crate
//!    attributes are stripped, whitespace is normalized, and the result is
//!    wrapped in a raw string literal.
//! 2. After a rebuild, the generator is run over its canonical grammar and the
//!    freshly generated rule block is spliced back into the marker region of
//!    the development source.
//!
//! Layout
//!
//! src/bootstrap
//!   ├── stripping     Marker-block strippers (rules, tests, comments, crate attributes)
//!   ├── inlining      Recursive module inliner
//!   ├── normalize     Whitespace normalizer
//!   ├── packaging     Prelude literal template
//!   ├── rules         Rule-block extraction and splicing
//!   ├── transforms    Runnable stages and their composition
//!   ├── process       External command execution
//!   └── runner        The end-to-end refresh run

pub mod bootstrap;
