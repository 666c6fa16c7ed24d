//! Rule-block extraction and splicing
//!
//! The generator's output for its own grammar contains the freshly generated
//! rules as one contiguous run of lines, opened by the top-level rule. That
//! run is cut out of the compiler output and written into the development
//! source between the rules markers:
//!
//! ```text
//! // RULES START
//!
//! rule!( Grammar <- ... );
//! rule!( Definition <- ... );
//!
//! // RULES END
//! ```

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::options::{ExtractOptions, MarkerSet};
use crate::bootstrap::text::{common_indent, indent_lines, is_blank, leading_whitespace};
use std::fmt;

/// Generated rule text, one rule per line, without surrounding blank lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock(String);

impl RuleBlock {
    pub fn new(text: impl Into<String>) -> Self {
        RuleBlock(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn line_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split('\n').count()
        }
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cut the generated rule block out of compiler output.
///
/// Collection starts at the first line whose trimmed text begins with the
/// sentinel and stops at the first blank line (or the end of the output).
pub fn extract_rules(compiled: &str, options: &ExtractOptions) -> Result<RuleBlock, BootstrapError> {
    let mut collected: Vec<&str> = Vec::new();
    let mut collecting = false;

    for line in compiled.lines() {
        if collecting {
            if is_blank(line) {
                break;
            }
            collected.push(line.trim_end());
        } else if line.trim_start().starts_with(options.sentinel.as_str()) {
            collecting = true;
            collected.push(line.trim_end());
        }
    }

    if !collecting {
        return Err(BootstrapError::ExtractionAmbiguity {
            sentinel: options.sentinel.clone(),
        });
    }

    let text = if options.dedent {
        let indent = common_indent(&collected);
        collected
            .iter()
            .map(|line| &line[indent.len()..])
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        collected.join("\n")
    };

    Ok(RuleBlock(text))
}

/// Replace the interior of the rules marker region of `original` with `block`.
///
/// The region is rewritten as a blank line, the block indented like the start
/// marker, and a blank line. The marker lines and everything outside them are
/// kept as they are.
pub fn replace_rules(
    original: &str,
    block: &RuleBlock,
    markers: &MarkerSet,
) -> Result<String, BootstrapError> {
    let lines: Vec<&str> = original.split('\n').collect();

    let start = lines
        .iter()
        .position(|line| line.trim() == markers.rules_start)
        .ok_or_else(|| BootstrapError::MarkerNotFound {
            marker: markers.rules_start.clone(),
            context: "development source has no rules region".to_string(),
        })?;
    let end = lines[start + 1..]
        .iter()
        .position(|line| line.trim() == markers.rules_end)
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| BootstrapError::MarkerNotFound {
            marker: markers.rules_end.clone(),
            context: format!(
                "'{}' on line {} is never closed",
                markers.rules_start,
                start + 1
            ),
        })?;

    let indent = leading_whitespace(lines[start]);
    let mut spliced: Vec<String> = lines[..=start].iter().map(|l| l.to_string()).collect();
    spliced.push(String::new());
    spliced.extend(indent_lines(block.as_str().split('\n'), indent));
    spliced.push(String::new());
    spliced.extend(lines[end..].iter().map(|l| l.to_string()));

    Ok(spliced.join("\n"))
}
