//! Knobs consumed by the pipeline stages and the runner
//!
//! The defaults here match `bootpeg-config/defaults/bootpeg.default.toml`;
//! applications normally build these from a loaded configuration rather than
//! by hand.

use std::path::{Path, PathBuf};

/// Sentinel lines recognized in development sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    pub rules_start: String,
    pub rules_end: String,
    pub test_sentinel: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet {
            rules_start: "// RULES START".to_string(),
            rules_end: "// RULES END".to_string(),
            test_sentinel: "#[cfg(test)]".to_string(),
        }
    }
}

/// Controls how the development tree is flattened into the prelude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreludeOptions {
    pub markers: MarkerSet,
    /// Comments starting with one of these prefixes survive comment stripping
    pub comment_exclusions: Vec<String>,
    /// Crate-level attribute names removed from the prelude; empty disables the stage
    pub crate_attributes: Vec<String>,
    /// Added once per nesting level when a module body is inlined
    pub indent_unit: String,
    /// Text emitted above the `PRELUDE` constant (e.g. a license comment)
    pub header: Option<String>,
}

impl Default for PreludeOptions {
    fn default() -> Self {
        PreludeOptions {
            markers: MarkerSet::default(),
            comment_exclusions: vec!["///".to_string(), "//!".to_string()],
            crate_attributes: vec![
                "crate_id".to_string(),
                "crate_name".to_string(),
                "crate_type".to_string(),
            ],
            indent_unit: "  ".to_string(),
            header: None,
        }
    }
}

/// Controls how the rule block is located in compiler output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Prefix of the (trimmed) line that opens the generated rule block
    pub sentinel: String,
    /// Remove the indentation common to every extracted line
    pub dedent: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            sentinel: "rule!( Grammar <-".to_string(),
            dedent: true,
        }
    }
}

/// An external program and its fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Where the run reads and writes, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub source: PathBuf,
    pub prelude: PathBuf,
    pub compiled: PathBuf,
    pub grammar: PathBuf,
}

impl ProjectLayout {
    /// Resolve a layout path against the project root (absolute paths are kept)
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn source_path(&self) -> PathBuf {
        self.resolve(&self.source)
    }

    pub fn prelude_path(&self) -> PathBuf {
        self.resolve(&self.prelude)
    }

    pub fn compiled_path(&self) -> PathBuf {
        self.resolve(&self.compiled)
    }

    pub fn grammar_path(&self) -> PathBuf {
        self.resolve(&self.grammar)
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout {
            root: PathBuf::from("."),
            source: PathBuf::from("src/parser.rs"),
            prelude: PathBuf::from("src/prelude.rs"),
            compiled: PathBuf::from("target/bootpeg/compiled_parser.rs"),
            grammar: PathBuf::from("src/grammar.peg"),
        }
    }
}

/// Everything a [`Bootstrapper`](crate::bootstrap::runner::Bootstrapper) needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub layout: ProjectLayout,
    pub prelude: PreludeOptions,
    pub extract: ExtractOptions,
    pub build: CommandSpec,
    pub compiler: CommandSpec,
    /// Flag placed before the grammar path on the compiler command line
    pub grammar_flag: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            layout: ProjectLayout::default(),
            prelude: PreludeOptions::default(),
            extract: ExtractOptions::default(),
            build: CommandSpec::new("make").arg("-B"),
            compiler: CommandSpec::new("./nailgun"),
            grammar_flag: "-g".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_resolves_relative_to_root() {
        let layout = ProjectLayout {
            root: PathBuf::from("/work/peg"),
            ..ProjectLayout::default()
        };
        assert_eq!(layout.source_path(), PathBuf::from("/work/peg/src/parser.rs"));
        assert_eq!(
            layout.resolve(Path::new("/abs/grammar.peg")),
            PathBuf::from("/abs/grammar.peg")
        );
    }

    #[test]
    fn test_command_spec_builder() {
        let spec = CommandSpec::new("make").arg("-B");
        assert_eq!(spec.program, "make");
        assert_eq!(spec.args, vec!["-B".to_string()]);
    }
}
