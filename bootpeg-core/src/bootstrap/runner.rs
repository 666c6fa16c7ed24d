//! The refresh run
//!
//! A run is strictly sequential and stops at the first failure:
//!
//! 1. flatten the development source into the prelude and write it
//! 2. run the build command (the generator picks up the new prelude)
//! 3. run the grammar compiler over the canonical grammar, capturing stdout
//! 4. write the compiler output
//! 5. extract the generated rule block and splice it into the development source
//!
//! Files written before a failure stay on disk; nothing is rolled back. The
//! prelude is fully built in memory before step 1 writes anything, so a
//! resolution failure leaves the tree untouched.

use crate::bootstrap::error::{BootstrapError, Stage};
use crate::bootstrap::options::RunOptions;
use crate::bootstrap::process::{CommandRunner, Invocation, ProcessOutput};
use crate::bootstrap::rules::{extract_rules, replace_rules, RuleBlock};
use crate::bootstrap::source::{write_artifact, SourceUnit};
use crate::bootstrap::transforms::standard::prelude_transform;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a run (or a partial run) wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub prelude: Option<PathBuf>,
    pub compiled: Option<PathBuf>,
    pub source: PathBuf,
    pub rule_lines: usize,
    /// Whether splicing changed the development source
    pub source_changed: bool,
}

pub struct Bootstrapper<R> {
    options: RunOptions,
    runner: R,
}

impl<R: CommandRunner> Bootstrapper<R> {
    pub fn new(options: RunOptions, runner: R) -> Self {
        Bootstrapper { options, runner }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Flatten the development source into the packaged prelude text.
    pub fn build_prelude(&self) -> Result<String, BootstrapError> {
        let source_path = self.options.layout.source_path();
        let root = SourceUnit::load(&source_path)?;
        let transform = prelude_transform(&root.path, &self.options.prelude)?;
        transform.run(root.text.trim().to_string())
    }

    /// Run every step.
    pub fn run(&self) -> Result<RunReport, BootstrapError> {
        let layout = &self.options.layout;

        let prelude = self
            .build_prelude()
            .map_err(|e| e.in_stage(Stage::BuildPrelude))?;
        let prelude_path = layout.prelude_path();
        write_artifact(&prelude_path, &prelude).map_err(|e| e.in_stage(Stage::WritePrelude))?;
        info!(path = %prelude_path.display(), "wrote prelude");

        let build = self.invocation(&self.options.build.program, self.options.build.args.clone());
        self.execute(&build).map_err(|e| e.in_stage(Stage::Rebuild))?;

        let mut compiler_args = self.options.compiler.args.clone();
        compiler_args.push(self.options.grammar_flag.clone());
        compiler_args.push(layout.grammar_path().display().to_string());
        let compile = self.invocation(&self.options.compiler.program, compiler_args);
        let compiled = self
            .execute(&compile)
            .map_err(|e| e.in_stage(Stage::Compile))?
            .stdout;

        let compiled_path = layout.compiled_path();
        write_artifact(&compiled_path, &compiled).map_err(|e| e.in_stage(Stage::WriteCompiled))?;
        info!(path = %compiled_path.display(), "wrote compiler output");

        let mut report = self
            .splice(&compiled)
            .map_err(|e| e.in_stage(Stage::Splice))?;
        report.prelude = Some(prelude_path);
        report.compiled = Some(compiled_path);
        Ok(report)
    }

    /// Step 5 alone: splice the rules found in `compiled` into the development source.
    pub fn splice(&self, compiled: &str) -> Result<RunReport, BootstrapError> {
        let block = extract_rules(compiled, &self.options.extract)?;
        debug!(lines = block.line_count(), "extracted rule block");
        self.splice_block(&block)
    }

    fn splice_block(&self, block: &RuleBlock) -> Result<RunReport, BootstrapError> {
        let source_path = self.options.layout.source_path();
        let original = SourceUnit::load(&source_path)?;
        let spliced = replace_rules(&original.text, block, &self.options.prelude.markers)?;

        let source_changed = spliced != original.text;
        if source_changed {
            write_artifact(&source_path, &spliced)?;
            info!(path = %source_path.display(), rules = block.line_count(), "updated rules");
        } else {
            info!(path = %source_path.display(), "rules already up to date");
        }

        Ok(RunReport {
            prelude: None,
            compiled: None,
            source: source_path,
            rule_lines: block.line_count(),
            source_changed,
        })
    }

    fn invocation(&self, program: &str, args: Vec<String>) -> Invocation {
        Invocation {
            program: program.to_string(),
            args,
            working_dir: self.options.layout.root.clone(),
        }
    }

    fn execute(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        info!(command = %invocation, "running");
        self.runner.run(invocation)?.require_success(invocation)
    }
}
