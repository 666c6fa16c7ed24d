//! Recursive module inlining
//!
//! Every `mod name;` declaration is replaced by a braced block holding the
//! referenced file's own (already inlined) text:
//!
//! ```text
//! mod base;            ->   mod base {
//!                             pub fn f() {}
//!                             mod literal {
//!                               pub fn g() {}
//!                             }
//!                           }
//! ```
//!
//! A declaration resolves against the directory of the file that declares it,
//! trying `<dir>/<name>/mod.rs` first and `<dir>/<name>.rs` second. The file
//! currently being expanded is always passed explicitly, so the inliner holds
//! no state between calls. The chain of files being expanded is tracked so that
//! a module declaring one of its ancestors is reported instead of looping.

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::source::SourceUnit;
use crate::bootstrap::text::indent_lines;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

static MODULE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?P<attrs>(?:#\[[^\]]*\]\s*)*)(?:(?P<vis>pub(?:\s*\([^)]*\))?)\s+)?mod\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*;\s*$",
    )
    .unwrap()
});

static OUTER_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\[[^\]]*\]").unwrap());

/// A `mod name;` line found in a source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub indent: String,
    /// Outer attributes written on the declaration line, e.g. `#[macro_use]`
    pub attributes: Vec<String>,
    pub visibility: Option<String>,
    pub name: String,
    /// 1-based line number in the declaring unit
    pub line: usize,
}

impl ModuleReference {
    pub fn parse(line: &str, line_number: usize) -> Option<Self> {
        let captures = MODULE_DECLARATION.captures(line)?;
        Some(ModuleReference {
            indent: captures["indent"].to_string(),
            attributes: OUTER_ATTRIBUTE
                .find_iter(&captures["attrs"])
                .map(|attr| attr.as_str().to_string())
                .collect(),
            visibility: captures.name("vis").map(|vis| vis.as_str().to_string()),
            name: captures["name"].to_string(),
            line: line_number,
        })
    }

    /// One line per attribute, at the declaration's indentation.
    ///
    /// Attributes go on their own lines so that `#[cfg(test)] mod tests;`
    /// becomes a sentinel line the test stripper recognizes.
    pub fn attribute_lines(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|attr| format!("{}{}", self.indent, attr))
            .collect()
    }

    /// The `mod name {` line that replaces the declaration
    pub fn opening_line(&self) -> String {
        match &self.visibility {
            Some(vis) => format!("{}{} mod {} {{", self.indent, vis, self.name),
            None => format!("{}mod {} {{", self.indent, self.name),
        }
    }

    pub fn closing_line(&self) -> String {
        format!("{}}}", self.indent)
    }
}

/// Find the file a module declaration refers to.
pub fn resolve_module(
    directory: &Path,
    name: &str,
    declared_in: &Path,
) -> Result<PathBuf, BootstrapError> {
    let candidates = [
        directory.join(name).join("mod.rs"),
        directory.join(format!("{}.rs", name)),
    ];
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| BootstrapError::ModuleResolution {
            name: name.to_string(),
            declared_in: declared_in.to_path_buf(),
            candidates: candidates.to_vec(),
        })
}

fn identity_of(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Debug, Clone)]
pub struct ModuleInliner {
    indent_unit: String,
}

impl ModuleInliner {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        ModuleInliner {
            indent_unit: indent_unit.into(),
        }
    }

    /// Inline every module declared (transitively) by `text`, which was read from `path`.
    pub fn inline(&self, path: &Path, text: &str) -> Result<String, BootstrapError> {
        let mut ancestry = Vec::new();
        self.inline_unit(path, text, &mut ancestry)
    }

    pub fn inline_source(&self, unit: &SourceUnit) -> Result<String, BootstrapError> {
        self.inline(&unit.path, &unit.text)
    }

    fn inline_unit(
        &self,
        path: &Path,
        text: &str,
        ancestry: &mut Vec<PathBuf>,
    ) -> Result<String, BootstrapError> {
        let identity = identity_of(path);
        if ancestry.contains(&identity) {
            let mut chain = ancestry.clone();
            chain.push(identity);
            return Err(BootstrapError::ModuleCycle { chain });
        }
        ancestry.push(identity);

        let directory = path.parent().unwrap_or_else(|| Path::new(""));
        let mut lines = Vec::new();

        for (index, line) in text.split('\n').enumerate() {
            let Some(reference) = ModuleReference::parse(line, index + 1) else {
                lines.push(line.to_string());
                continue;
            };

            let module_path = resolve_module(directory, &reference.name, path)?;
            debug!(
                module = %reference.name,
                file = %module_path.display(),
                declared_in = %path.display(),
                "inlining module"
            );
            let unit = SourceUnit::load(&module_path)?;
            let body = self.inline_unit(&unit.path, unit.text.trim(), ancestry)?;

            let indent = format!("{}{}", reference.indent, self.indent_unit);
            lines.extend(reference.attribute_lines());
            lines.push(reference.opening_line());
            lines.extend(indent_lines(body.split('\n'), &indent));
            lines.push(reference.closing_line());
        }

        ancestry.pop();
        Ok(lines.join("\n"))
    }
}

impl Default for ModuleInliner {
    fn default() -> Self {
        ModuleInliner::new("  ")
    }
}
