//! Removal of line comments
//!
//! A `//` outside a double-quoted string starts a comment; the comment and the
//! whitespace before it are removed. Lines that held nothing but a removed
//! comment are dropped. Comments whose text begins with one of the policy's
//! excluded prefixes (documentation comments by default) are left in place,
//! as is the rest of their line.

/// Which comments survive stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPolicy {
    excluded_prefixes: Vec<String>,
}

impl CommentPolicy {
    pub fn new<I, S>(excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommentPolicy {
            excluded_prefixes: excluded_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Strip every comment, documentation included
    pub fn strip_all() -> Self {
        CommentPolicy::new(Vec::<String>::new())
    }

    pub fn is_excluded(&self, comment: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| comment.starts_with(prefix.as_str()))
    }
}

impl Default for CommentPolicy {
    fn default() -> Self {
        CommentPolicy::new(["///", "//!"])
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

/// If a raw string literal (`r"`, `r#"`, `br##"`, ...) opens at `i`, its hash
/// count and the offset just past the opening quote
fn raw_string_open(bytes: &[u8], i: usize) -> Option<(usize, usize)> {
    if bytes[i] != b'r' {
        return None;
    }
    let prefix_start = if i > 0 && bytes[i - 1] == b'b' { i - 1 } else { i };
    if prefix_start > 0 && is_ident_byte(bytes[prefix_start - 1]) {
        return None;
    }
    let hashes = bytes[i + 1..].iter().take_while(|&&b| b == b'#').count();
    match bytes.get(i + 1 + hashes) {
        Some(b'"') => Some((hashes, i + 2 + hashes)),
        _ => None,
    }
}

/// Offset just past the `"#...` closing a raw string, searching from `from`
fn raw_string_end(bytes: &[u8], from: usize, hashes: usize) -> Option<usize> {
    (from..bytes.len()).find_map(|i| {
        let closes = bytes[i] == b'"'
            && bytes
                .get(i + 1..i + 1 + hashes)
                .is_some_and(|run| run.iter().all(|&b| b == b'#'));
        closes.then_some(i + 1 + hashes)
    })
}

/// Byte offset of the first `//` that is not inside a string literal
///
/// Raw strings are skipped without escape handling. A raw string still open
/// at the end of the line hides the rest of that line.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        if !in_string {
            if let Some((hashes, body)) = raw_string_open(bytes, i) {
                i = raw_string_end(bytes, body, hashes)?;
                continue;
            }
        }
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            // '"' as a char literal must not open a string
            b'\'' if !in_string && bytes.get(i + 1) == Some(&b'"') && bytes.get(i + 2) == Some(&b'\'') => {
                i += 2
            }
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

pub fn strip_comments(text: &str, policy: &CommentPolicy) -> String {
    let mut kept = Vec::new();

    for line in text.split('\n') {
        match comment_start(line) {
            Some(start) if !policy.is_excluded(&line[start..]) => {
                let code = line[..start].trim_end();
                if !code.is_empty() {
                    kept.push(code);
                }
            }
            _ => kept.push(line),
        }
    }

    kept.join("\n")
}
