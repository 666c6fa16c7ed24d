//! Prelude packaging
//!
//! The flattened parser support code is embedded into the generator as a raw
//! string constant. Generated parsers start with the prelude text, so the
//! literal opens with an `allow(dead_code)` attribute for the embedding crate.

use tracing::warn;

/// Everything up to and including the opening of the raw literal
pub const PRELUDE_OPEN: &str = "pub static PRELUDE : &'static str = r###\"#![allow(dead_code)]\n\n";

/// Closes the raw literal and the item
pub const PRELUDE_CLOSE: &str = "\"###;\n";

const RAW_TERMINATOR: &str = "\"###";

/// Wrap `text` verbatim in the prelude template.
///
/// The content is not validated. Text containing the raw-literal terminator
/// produces a broken constant; this is logged but not rejected.
pub fn prelude_wrap(text: &str, header: Option<&str>) -> String {
    if text.contains(RAW_TERMINATOR) {
        warn!(
            terminator = RAW_TERMINATOR,
            "prelude text contains the raw string terminator"
        );
    }

    let mut packaged = String::with_capacity(text.len() + PRELUDE_OPEN.len() + 256);
    if let Some(header) = header.filter(|h| !h.trim().is_empty()) {
        packaged.push_str(header.trim_end());
        packaged.push('\n');
    }
    packaged.push_str(PRELUDE_OPEN);
    packaged.push_str(text);
    packaged.push_str(PRELUDE_CLOSE);
    packaged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_text_in_raw_literal() {
        let packaged = prelude_wrap("mod base {\n  pub struct Node;\n}", None);
        assert!(packaged.ends_with("}\"###;\n"));
        insta::assert_snapshot!(packaged.trim_end(), @r####"
        pub static PRELUDE : &'static str = r###"#![allow(dead_code)]

        mod base {
          pub struct Node;
        }"###;
        "####);
    }

    #[test]
    fn test_header_precedes_constant() {
        let packaged = prelude_wrap("x", Some("// Copyright 2014\n\n"));
        assert!(packaged.starts_with("// Copyright 2014\npub static PRELUDE"));
    }

    #[test]
    fn test_blank_header_is_ignored() {
        assert!(prelude_wrap("x", Some("  \n")).starts_with(PRELUDE_OPEN));
    }

    #[test]
    fn test_content_is_not_escaped() {
        let text = r#"lit!( "\n" ) "quoted" \ backslash"#;
        let packaged = prelude_wrap(text, None);
        assert_eq!(packaged, format!("{}{}{}", PRELUDE_OPEN, text, PRELUDE_CLOSE));
    }
}
