//! Removal of test-only items
//!
//! A test block starts at a sentinel line (`#[cfg(test)]` by default) and ends
//! at the first later line consisting of exactly the sentinel's indentation
//! followed by `}`. Everything from the sentinel through that closing line is
//! removed. Lines in between are never inspected for further sentinels, so a
//! nested `#[cfg(test)]` goes with its enclosing block.
//!
//! The sentinel is expected to sit on a braced item. On a braceless item such
//! as `#[cfg(test)] use x;` the skip still runs to the next `}` at the
//! sentinel's indentation, taking any following items with it. When more than
//! one item starts at that indentation inside a skipped span, a warning names
//! the sentinel's line.

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::text::{is_blank, leading_whitespace};
use tracing::warn;

enum ScanState<'a> {
    Outside,
    AwaitingClose {
        indent: &'a str,
        opened_at: usize,
        items: usize,
    },
}

fn closes_block(line: &str, indent: &str) -> bool {
    line.trim_end().strip_prefix(indent) == Some("}")
}

/// Whether `line` begins an item at exactly `indent`
fn starts_item(line: &str, indent: &str) -> bool {
    if is_blank(line) || leading_whitespace(line) != indent {
        return false;
    }
    let code = line.trim_start();
    !(code.starts_with('}') || code.starts_with("#[") || code.starts_with("//"))
}

pub fn strip_test_blocks(text: &str, sentinel: &str) -> Result<String, BootstrapError> {
    let mut kept = Vec::new();
    let mut state = ScanState::Outside;

    for (index, line) in text.split('\n').enumerate() {
        state = match state {
            ScanState::Outside if line.trim() == sentinel => ScanState::AwaitingClose {
                indent: leading_whitespace(line),
                opened_at: index + 1,
                items: 0,
            },
            ScanState::Outside => {
                kept.push(line);
                ScanState::Outside
            }
            ScanState::AwaitingClose {
                indent,
                opened_at,
                items,
            } if closes_block(line, indent) => {
                if items > 1 {
                    warn!(
                        sentinel,
                        line = opened_at,
                        items,
                        "test block removed more than one item; is the sentinel on a braceless item?"
                    );
                }
                ScanState::Outside
            }
            ScanState::AwaitingClose {
                indent,
                opened_at,
                items,
            } => ScanState::AwaitingClose {
                indent,
                opened_at,
                items: items + usize::from(starts_item(line, indent)),
            },
        };
    }

    match state {
        ScanState::Outside => Ok(kept.join("\n")),
        ScanState::AwaitingClose {
            indent, opened_at, ..
        } => Err(BootstrapError::MarkerNotFound {
            marker: format!("{}}}", indent),
            context: format!(
                "'{}' on line {} has no closing brace at its indentation",
                sentinel, opened_at
            ),
        }),
    }
}
