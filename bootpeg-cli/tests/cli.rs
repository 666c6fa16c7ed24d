use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const PARSER: &str = "\
#![crate_id = \"peg\"]
mod base;

// RULES START

rule!( Grammar <- OLD );

// RULES END
pub fn parse() {}
";

const BASE: &str = "\
pub struct Node; // leaf

#[cfg(test)]
mod tests {
  fn t() {}
}
";

const COMPILED: &str = "\
mod rules {
  rule!( Grammar <- ex!( Rule ) );
  rule!( Rule <- lit!( \"r\" ) );

}
";

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/parser.rs"), PARSER).unwrap();
    fs::write(dir.path().join("src/base.rs"), BASE).unwrap();
    dir
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}

#[test]
fn prelude_prints_packaged_literal() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("prelude");

    let expected = "pub static PRELUDE : &'static str = r###\"#![allow(dead_code)]\n\n\
                    mod base {\n  pub struct Node;\n}\n\npub fn parse() {}\"###;\n";

    cmd.assert().success().stdout(predicate::eq(expected));
    assert!(!dir.path().join("src/prelude.rs").exists());
}

#[test]
fn prelude_writes_output_file() {
    let dir = project();
    let output = dir.path().join("out/prelude.rs");
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("prelude")
        .arg("--root")
        .arg(dir.path())
        .arg("--output")
        .arg(&output);

    cmd.assert().success();
    assert!(fs::read_to_string(&output)
        .unwrap()
        .starts_with("pub static PRELUDE"));
}

#[test]
fn prelude_output_write_failure_names_write_stage() {
    let dir = project();
    let output = dir.path().join("src/parser.rs/prelude.rs");
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root")
        .arg(dir.path())
        .arg("prelude")
        .arg("--output")
        .arg(&output);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: Stage 'write-prelude' failed"));
    assert_eq!(read(dir.path(), "src/parser.rs"), PARSER);
}

#[test]
fn set_overrides_configuration_key() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root")
        .arg(dir.path())
        .arg("--set")
        .arg("crate_attributes.strip=false")
        .arg("prelude");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#![crate_id = \"peg\"]"));
}

#[test]
fn set_without_value_is_rejected() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root")
        .arg(dir.path())
        .arg("prelude")
        .arg("--set")
        .arg("extract.dedent");

    cmd.assert().failure().code(1).stderr(predicate::str::contains(
        "Invalid --set 'extract.dedent': expected KEY=VALUE",
    ));
}

#[test]
fn missing_module_fails_with_stage_and_module_name() {
    let dir = project();
    fs::write(dir.path().join("src/parser.rs"), "mod missing;\n").unwrap();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("prelude");

    cmd.assert().failure().code(1).stderr(
        predicate::str::starts_with("error: Stage 'build-prelude' failed")
            .and(predicate::str::contains("Module 'missing'")),
    );
}

#[test]
fn splice_rewrites_rules_region() {
    let dir = project();
    let compiled = dir.path().join("compiled.rs");
    fs::write(&compiled, COMPILED).unwrap();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("splice").arg(&compiled);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 lines, updated"));
    assert_eq!(
        read(dir.path(), "src/parser.rs"),
        PARSER.replace(
            "rule!( Grammar <- OLD );",
            "rule!( Grammar <- ex!( Rule ) );\nrule!( Rule <- lit!( \"r\" ) );"
        )
    );
}

#[test]
fn splice_without_rules_in_output_fails() {
    let dir = project();
    let compiled = dir.path().join("compiled.rs");
    fs::write(&compiled, "fn main() {}\n").unwrap();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("splice").arg(&compiled);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Stage 'splice' failed"));
    assert_eq!(read(dir.path(), "src/parser.rs"), PARSER);
}

#[cfg(unix)]
#[test]
fn run_uses_configured_commands() {
    let dir = project();
    fs::write(dir.path().join("rules.out"), COMPILED).unwrap();
    fs::write(
        dir.path().join("bootpeg.toml"),
        "[commands.build]\nprogram = \"true\"\nargs = []\n\n\
         [commands.compiler]\nprogram = \"sh\"\nargs = [\"-c\", \"cat rules.out\"]\n",
    )
    .unwrap();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("run").arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"source_changed\": true"));
    assert!(read(dir.path(), "src/prelude.rs").contains("mod base {"));
    assert_eq!(read(dir.path(), "target/bootpeg/compiled_parser.rs"), COMPILED);
    assert!(read(dir.path(), "src/parser.rs").contains("rule!( Rule <- lit!( \"r\" ) );"));
}

#[cfg(unix)]
#[test]
fn run_reports_failed_build() {
    let dir = project();
    fs::write(
        dir.path().join("bootpeg.toml"),
        "[commands.build]\nprogram = \"sh\"\nargs = [\"-c\", \"echo broken >&2; exit 2\"]\n",
    )
    .unwrap();
    let mut cmd = cargo_bin_cmd!("bootpeg");
    cmd.arg("--root").arg(dir.path()).arg("run");

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("Stage 'rebuild' failed")
            .and(predicate::str::contains("exited with status 2"))
            .and(predicate::str::contains("broken")),
    );
    assert!(dir.path().join("src/prelude.rs").exists());
    assert_eq!(read(dir.path(), "src/parser.rs"), PARSER);
}
