//! Command-line interface for bootpeg
//! Keeps a self-hosting PEG parser's embedded prelude and generated rules in sync with its
//! development source.
//!
//! Usage:
//!   bootpeg prelude [--output `<file>`]   - Print (or write) the packaged prelude
//!   bootpeg run                          - Rebuild, recompile the grammar and splice the rules
//!   bootpeg splice `<compiled>`            - Splice rules from an existing compiler output
//!
//! Global options: --root `<dir>`, --config `<file>`, --set `<key=value>` (repeatable),
//! -v (repeatable), --json

use bootpeg_config::{BootpegConfig, ConfigError, Loader};
use bootpeg_core::bootstrap::process::SystemRunner;
use bootpeg_core::bootstrap::source::{write_artifact, SourceUnit};
use bootpeg_core::bootstrap::{BootstrapError, Bootstrapper, RunReport, Stage};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

enum CliError {
    Config(ConfigError),
    Bootstrap(BootstrapError),
    Report(serde_json::Error),
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Invalid configuration: {}", err),
            CliError::Bootstrap(err) => write!(f, "{}", err),
            CliError::Report(err) => write!(f, "Failed to serialize report: {}", err),
            CliError::Usage(message) => write!(f, "{}", message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<BootstrapError> for CliError {
    fn from(err: BootstrapError) -> Self {
        CliError::Bootstrap(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Report(err)
    }
}

fn cli() -> Command {
    Command::new("bootpeg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Refresh the prelude and generated rules of a self-hosting PEG parser")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .global(true)
                .help("Project root; paths in the configuration are relative to it")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults and <root>/bootpeg.toml"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .global(true)
                .value_name("KEY=VALUE")
                .help("Override one configuration key, e.g. extract.dedent=false")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log more (-v for progress, -vv for every stage)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .help("Print a JSON report instead of a summary (run and splice)")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("prelude")
                .about("Flatten the development source into the packaged prelude")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the prelude to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Write the prelude, rebuild, compile the grammar and splice the rules"),
        )
        .subcommand(
            Command::new("splice")
                .about("Splice the rule block from an existing compiler output")
                .arg(
                    Arg::new("compiled")
                        .help("Path to the compiler output")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    init_logging(matches.get_count("verbose"));

    if let Err(err) = execute(&matches) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

fn execute(matches: &ArgMatches) -> Result<(), CliError> {
    let root = matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let overrides: Vec<&String> = matches
        .get_many::<String>("set")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config = load_config(&root, matches.get_one::<String>("config"), &overrides)?;
    let bootstrapper = Bootstrapper::new(config.run_options(&root), SystemRunner);
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("prelude", sub)) => {
            handle_prelude_command(&bootstrapper, sub.get_one::<String>("output"))
        }
        Some(("run", _)) => {
            let report = bootstrapper.run()?;
            print_report(&report, json)
        }
        Some(("splice", sub)) => {
            let compiled = sub
                .get_one::<String>("compiled")
                .expect("compiled output path is required");
            let report = SourceUnit::load(compiled)
                .and_then(|compiled| bootstrapper.splice(&compiled.text))
                .map_err(|e| e.in_stage(Stage::Splice))?;
            print_report(&report, json)
        }
        _ => Ok(()),
    }
}

fn load_config(
    root: &Path,
    explicit: Option<&String>,
    overrides: &[&String],
) -> Result<BootpegConfig, CliError> {
    let mut loader = Loader::new().with_project(root);
    if let Some(path) = explicit {
        debug!(path = %path, "layering configuration file");
        loader = loader.with_file(path);
    }
    for setting in overrides {
        let (key, value) = parse_setting(setting)?;
        debug!(key, value, "overriding configuration key");
        loader = loader.set_override(key, value)?;
    }
    Ok(loader.build()?)
}

/// Split a `--set` argument into its key and value.
fn parse_setting(setting: &str) -> Result<(&str, &str), CliError> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::Usage(format!(
            "Invalid --set '{}': expected KEY=VALUE",
            setting
        ))),
    }
}

/// Handle the prelude command
fn handle_prelude_command(
    bootstrapper: &Bootstrapper<SystemRunner>,
    output: Option<&String>,
) -> Result<(), CliError> {
    let prelude = bootstrapper
        .build_prelude()
        .map_err(|e| e.in_stage(Stage::BuildPrelude))?;
    match output {
        Some(path) => {
            write_artifact(Path::new(path), &prelude)
                .map_err(|e| e.in_stage(Stage::WritePrelude))?;
            println!("Wrote prelude to {}", path);
        }
        None => print!("{}", prelude),
    }
    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(prelude) = &report.prelude {
        println!("prelude:  {}", prelude.display());
    }
    if let Some(compiled) = &report.compiled {
        println!("compiled: {}", compiled.display());
    }
    let status = if report.source_changed {
        "updated"
    } else {
        "unchanged"
    };
    println!(
        "rules:    {} ({} lines, {})",
        report.source.display(),
        report.rule_lines,
        status
    );
    Ok(())
}
