//! Configuration loader for the bootpeg tools.
//!
//! `defaults/bootpeg.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer project files on top of
//! those defaults via [`Loader`] before deserializing into [`BootpegConfig`],
//! then turn the result into the options the core crate consumes with
//! [`BootpegConfig::run_options`].

use bootpeg_core::bootstrap::{
    CommandSpec, ExtractOptions, MarkerSet, PreludeOptions, ProjectLayout, RunOptions,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/bootpeg.default.toml");

/// Project-level file picked up from the root when present.
pub const PROJECT_FILE: &str = "bootpeg.toml";

/// Top-level configuration consumed by the bootpeg tools.
#[derive(Debug, Clone, Deserialize)]
pub struct BootpegConfig {
    pub paths: PathsConfig,
    pub markers: MarkersConfig,
    pub comments: CommentsConfig,
    pub crate_attributes: CrateAttributesConfig,
    pub inline: InlineConfig,
    pub prelude: PreludeConfig,
    pub extract: ExtractConfig,
    pub commands: CommandsConfig,
}

/// File locations, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub prelude: PathBuf,
    pub compiled: PathBuf,
    pub grammar: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkersConfig {
    pub rules_start: String,
    pub rules_end: String,
    pub test_sentinel: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsConfig {
    pub excluded_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrateAttributesConfig {
    pub strip: bool,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineConfig {
    pub indent_unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreludeConfig {
    /// Empty string means no header.
    pub header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub sentinel: String,
    pub dedent: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    pub grammar_flag: String,
    pub build: CommandConfig,
    pub compiler: CommandConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl From<&CommandConfig> for CommandSpec {
    fn from(command: &CommandConfig) -> Self {
        command
            .args
            .iter()
            .fold(CommandSpec::new(command.program.clone()), |spec, arg| {
                spec.arg(arg.clone())
            })
    }
}

impl BootpegConfig {
    /// Build the run options for the project rooted at `root`.
    pub fn run_options(&self, root: impl Into<PathBuf>) -> RunOptions {
        let crate_attributes = if self.crate_attributes.strip {
            self.crate_attributes.names.clone()
        } else {
            Vec::new()
        };
        let header = Some(self.prelude.header.trim_end())
            .filter(|header| !header.is_empty())
            .map(str::to_string);

        RunOptions {
            layout: ProjectLayout {
                root: root.into(),
                source: self.paths.source.clone(),
                prelude: self.paths.prelude.clone(),
                compiled: self.paths.compiled.clone(),
                grammar: self.paths.grammar.clone(),
            },
            prelude: PreludeOptions {
                markers: MarkerSet {
                    rules_start: self.markers.rules_start.clone(),
                    rules_end: self.markers.rules_end.clone(),
                    test_sentinel: self.markers.test_sentinel.clone(),
                },
                comment_exclusions: self.comments.excluded_prefixes.clone(),
                crate_attributes,
                indent_unit: self.inline.indent_unit.clone(),
                header,
            },
            extract: ExtractOptions {
                sentinel: self.extract.sentinel.clone(),
                dedent: self.extract.dedent,
            },
            build: CommandSpec::from(&self.commands.build),
            compiler: CommandSpec::from(&self.commands.compiler),
            grammar_flag: self.commands.grammar_flag.clone(),
        }
    }
}

/// Helper for layering project overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `bootpeg.toml` from the project root, if there is one.
    pub fn with_project(self, root: impl AsRef<Path>) -> Self {
        self.with_optional_file(root.as_ref().join(PROJECT_FILE))
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BootpegConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BootpegConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.paths.source, PathBuf::from("src/parser.rs"));
        assert_eq!(config.markers.rules_start, "// RULES START");
        assert!(config.crate_attributes.strip);
        assert_eq!(config.commands.build.args, vec!["-B".to_string()]);
        assert!(config.commands.compiler.args.is_empty());
    }

    #[test]
    fn defaults_match_core_defaults() {
        let options = load_defaults().unwrap().run_options(".");
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("commands.compiler.program", "./peg-compiler")
            .expect("override to apply")
            .set_override("extract.dedent", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.commands.compiler.program, "./peg-compiler");
        assert!(!config.extract.dedent);
    }

    #[test]
    fn project_file_layers_over_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            "[paths]\nsource = \"src/peg.rs\"\n\n[crate_attributes]\nstrip = false\n\n[prelude]\nheader = \"// generated\\n\"\n",
        )
        .unwrap();

        let options = Loader::new()
            .with_project(dir.path())
            .build()
            .unwrap()
            .run_options(dir.path());

        assert_eq!(options.layout.source_path(), dir.path().join("src/peg.rs"));
        assert_eq!(options.layout.grammar_path(), dir.path().join("src/grammar.peg"));
        assert!(options.prelude.crate_attributes.is_empty());
        assert_eq!(options.prelude.header.as_deref(), Some("// generated"));
    }

    #[test]
    fn missing_project_file_is_ignored() {
        let dir = tempdir().unwrap();
        assert!(Loader::new().with_project(dir.path()).build().is_ok());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
    }
}
