//! Line-level helpers shared by the stripping, inlining and splicing stages
//!
//! All stages work on `text.split('\n')` so that joining the kept lines with
//! `'\n'` reproduces untouched input byte for byte, including a trailing newline.

/// The leading spaces and tabs of `line`
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Prefix every non-blank line with `indent`; blank lines become empty.
pub fn indent_lines<'a, I>(lines: I, indent: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| {
            if is_blank(line) {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect()
}

/// The longest leading-whitespace prefix shared by every non-blank line
pub fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut common: Option<&'a str> = None;
    for line in lines.iter().filter(|line| !is_blank(line)) {
        let indent = leading_whitespace(line);
        common = Some(match common {
            None => indent,
            Some(current) => {
                let shared = current
                    .bytes()
                    .zip(indent.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &current[..shared]
            }
        });
    }
    common.unwrap_or("")
}
