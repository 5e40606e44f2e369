// Regression tests for the ast-builder binary.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn fixture(name: &str) -> String {
    format!("tests/fixtures/{name}.json")
}

/// A scratch file under the system temp dir, unique per test.
fn scratch(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ast-builder-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn bin() -> Command {
    Command::cargo_bin("ast-builder").unwrap()
}

#[test]
fn cli_convert_prints_one_call_per_statement() {
    bin()
        .args(["convert", &fixture("classDeclaration")])
        .assert()
        .success()
        .stdout(contains(
            "j.classDeclaration(j.identifier('A'), j.classBody([]), null)\n",
        ))
        .stdout(contains("j.classDeclaration(j.identifier('B'), "));
}

#[test]
fn cli_convert_flags_override_render_options() {
    bin()
        .args([
            "convert",
            &fixture("literal"),
            "--namespace",
            "b",
            "--quote",
            "double",
        ])
        .assert()
        .success()
        .stdout(contains(r#"b.expressionStatement(b.literal("hello"))"#));
}

#[test]
fn cli_convert_reads_config_file() {
    let config = scratch("config.yaml", "render:\n  namespace: types.builders\n");
    bin()
        .args(["convert", &fixture("importStatement"), "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("types.builders.importDeclaration(["));
    let _ = fs::remove_file(config);
}

#[test]
fn cli_convert_json_format() {
    bin()
        .args(["convert", &fixture("classDeclaration"), "--format", "json"])
        .assert()
        .success()
        .stdout(contains(r#""type": "ClassDeclaration""#));
}

#[test]
fn cli_reports_miette_diagnostics_on_unsupported_node() {
    let program = scratch(
        "jsx.json",
        r#"{ "type": "Program", "body": [
            { "type": "ExpressionStatement", "start": 0, "end": 8,
              "expression": { "type": "JSXElement", "start": 0, "end": 7 } }
        ] }"#,
    );
    let source = scratch("jsx.js", "<div />;\n");
    bin()
        .arg("convert")
        .arg(&program)
        .arg("--source")
        .arg(&source)
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(
            contains("ast_builder::convert::unsupported_node_type")
                .and(contains("JSXElement"))
                .and(contains("help:")),
        );
    let _ = fs::remove_file(program);
    let _ = fs::remove_file(source);
}

#[test]
fn cli_rejects_non_program_input() {
    let input = scratch("stmt.json", r#"{ "type": "EmptyStatement" }"#);
    bin()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("ast_builder::input::invalid_input"));
    let _ = fs::remove_file(input);
}

#[test]
fn cli_check_passes_on_fixtures() {
    bin()
        .args(["check", "tests/fixtures"])
        .assert()
        .success()
        .stdout(contains("tryStatement.json").and(contains("FAILED").not()));
}

#[test]
fn cli_check_accepts_esprima_output() {
    bin()
        .args(["check", &fixture("esprimaOutput")])
        .assert()
        .success()
        .stdout(contains("ok").and(contains("FAILED").not()));
}

#[test]
fn cli_check_fails_when_reconstruction_differs() {
    // `extra` has no builder slot, so it cannot come back.
    let input = scratch(
        "extra.json",
        r#"{ "type": "Program", "body": [
            { "type": "EmptyStatement", "extra": { "parenthesized": true } }
        ] }"#,
    );
    bin()
        .arg("check")
        .arg(&input)
        .assert()
        .failure()
        .stdout(contains("FAILED").and(contains("-    \"extra\"")));
    let _ = fs::remove_file(input);
}

#[test]
fn cli_lists_builders() {
    bin()
        .arg("builders")
        .assert()
        .success()
        .stdout(contains("classDeclaration(id?, body, superClass?)"))
        .stdout(contains("catchClause(param?, guard?, body)"));
}
