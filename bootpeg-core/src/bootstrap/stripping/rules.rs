//! Removal of rule-marker spans
//!
//! The development source keeps its hand-maintained rule block between two
//! sentinel lines. The prelude must not carry those rules (the generator emits
//! fresh ones after the prelude), so every span from a start sentinel through
//! the next end sentinel, inclusive, is dropped.

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::options::MarkerSet;

pub fn strip_rules(text: &str, markers: &MarkerSet) -> Result<String, BootstrapError> {
    let mut kept = Vec::new();
    let mut opened_at: Option<usize> = None;

    for (index, line) in text.split('\n').enumerate() {
        let trimmed = line.trim();
        match opened_at {
            Some(_) => {
                if trimmed == markers.rules_end {
                    opened_at = None;
                }
            }
            None if trimmed == markers.rules_start => opened_at = Some(index + 1),
            None => kept.push(line),
        }
    }

    if let Some(line_number) = opened_at {
        return Err(BootstrapError::MarkerNotFound {
            marker: markers.rules_end.clone(),
            context: format!(
                "'{}' on line {} is never closed",
                markers.rules_start, line_number
            ),
        });
    }

    Ok(kept.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> Result<String, BootstrapError> {
        strip_rules(text, &MarkerSet::default())
    }

    #[test]
    fn test_removes_single_marker_span() {
        let source = "use base;\n// RULES START\n\nrule!( A <- lit!( \"a\" ) );\n\n// RULES END\nfn parse() {}\n";
        assert_eq!(strip(source).unwrap(), "use base;\nfn parse() {}\n");
    }

    #[test]
    fn test_no_start_sentinel_is_noop() {
        let source = "fn main() {}\n// RULES END\n";
        assert_eq!(strip(source).unwrap(), source);
    }

    #[test]
    fn test_indented_markers_are_recognized() {
        let source = "mod rules {\n  // RULES START\n  rule!( A <- B );\n  // RULES END\n}";
        assert_eq!(strip(source).unwrap(), "mod rules {\n}");
    }

    #[test]
    fn test_every_span_is_removed() {
        let source = "a\n// RULES START\nx\n// RULES END\nb\n// RULES START\ny\n// RULES END\nc";
        assert_eq!(strip(source).unwrap(), "a\nb\nc");
    }

    #[test]
    fn test_unterminated_span_is_fatal() {
        let err = strip("a\n// RULES START\nrule!( A <- B );\n").unwrap_err();
        assert_eq!(
            err,
            BootstrapError::MarkerNotFound {
                marker: "// RULES END".to_string(),
                context: "'// RULES START' on line 2 is never closed".to_string(),
            }
        );
    }
}
