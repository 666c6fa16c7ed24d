//! Whitespace normalization
//!
//! Stripping and inlining leave gaps behind: blank lines where a test module or
//! a comment block used to close a scope, and indentation on lines that were
//! blank in the original file. This pass
//!
//! - strips trailing whitespace from every line, and
//! - removes the blank lines directly above a line holding only `}` (with any
//!   indentation), so the brace follows the preceding content line. When only
//!   blank lines precede the brace, a single newline is left in front of it.
//!
//! Applying the pass twice yields the same text as applying it once.

pub fn strip_extra_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim_end();
        if line.trim_start() == "}" {
            let blanks = lines.iter().rev().take_while(|l| l.is_empty()).count();
            if blanks > 0 {
                let keep = if blanks == lines.len() { 1 } else { 0 };
                lines.truncate(lines.len() - blanks + keep);
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blank_lines_before_closing_brace_collapse() {
        let source = "mod base {\n  fn f() {}\n\n\n}\n";
        assert_eq!(strip_extra_whitespace(source), "mod base {\n  fn f() {}\n}\n");
    }

    #[test]
    fn test_closing_brace_keeps_its_indentation() {
        let source = "mod a {\n  mod b {\n    x();\n  \n\t\n  }\n}";
        assert_eq!(
            strip_extra_whitespace(source),
            "mod a {\n  mod b {\n    x();\n  }\n}"
        );
    }

    #[test]
    fn test_trailing_whitespace_is_removed() {
        assert_eq!(strip_extra_whitespace("a  \n\tb\t\n"), "a\n\tb\n");
    }

    #[test]
    fn test_blank_lines_elsewhere_are_kept() {
        let source = "fn a() {}\n\n\nfn b() {}\n";
        assert_eq!(strip_extra_whitespace(source), source);
    }

    #[test]
    fn test_only_blank_lines_before_brace_leave_one_newline() {
        assert_eq!(strip_extra_whitespace("\n\n  \n}"), "\n}");
        assert_eq!(strip_extra_whitespace("}"), "}");
    }

    #[test]
    fn test_brace_followed_by_code_is_not_a_closing_line() {
        let source = "if x {\n\n} else {\n\n}";
        assert_eq!(strip_extra_whitespace(source), "if x {\n\n} else {\n}");
    }

    proptest! {
        #[test]
        fn prop_idempotent(text in "([ \t]{0,3}(\\}|[a-z{;]{0,4})[ \t]{0,2}\n){0,12}") {
            let once = strip_extra_whitespace(&text);
            let twice = strip_extra_whitespace(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_idempotent_any_text(text in "\\PC{0,64}") {
            let once = strip_extra_whitespace(&text);
            prop_assert_eq!(strip_extra_whitespace(&once), once);
        }

        #[test]
        fn prop_no_trailing_whitespace(text in "([ \t]*[a-z}]*[ \t]*\n){0,8}") {
            let normalized = strip_extra_whitespace(&text);
            for line in normalized.split('\n') {
                prop_assert_eq!(line, line.trim_end());
            }
        }
    }
}
