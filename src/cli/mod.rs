//! The ast-builder Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::{env, fs, process};
use walkdir::WalkDir;

use crate::ast::ConstructorExpr;
use crate::cli::args::{AstBuilderArgs, Command};
use crate::config::{Config, OutputFormat};
use crate::engine::{build_ast, program_body};
use crate::errors::{print_error, AstError, Result};
use crate::estree::normalize;
use crate::interp::{evaluate_all, EstreeBuilders};
use crate::render::{QuoteStyle, RenderOptions, Renderer};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run(args: AstBuilderArgs) {
    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Convert {
            file,
            source,
            namespace,
            quote,
            format,
            config,
        } => handle_convert(ConvertRequest {
            file,
            source,
            namespace,
            quote,
            format,
            config,
        }),
        Command::Check { path } => handle_check(&path),
        Command::Builders => output::print_signatures().map(|()| true).map_err(io_error),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

// ============================================================================
// CONVERT
// ============================================================================

struct ConvertRequest {
    file: PathBuf,
    source: Option<PathBuf>,
    namespace: Option<String>,
    quote: Option<QuoteStyle>,
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
}

fn handle_convert(req: ConvertRequest) -> Result<bool> {
    let mut config = match &req.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir().map_err(io_error)?),
    };
    // Flags win over the file.
    if let Some(namespace) = req.namespace {
        config.render.namespace = namespace;
    }
    if let Some(quote) = req.quote {
        config.render.quote = quote;
    }
    if let Some(format) = req.format {
        config.format = format;
    }

    let input = read_json(&req.file)?;
    let exprs = match build_ast(&input) {
        Ok(exprs) => exprs,
        Err(e) => return Err(attach_source(e, req.source.as_deref())),
    };
    info!("{}: {} statement(s)", req.file.display(), exprs.len());

    match config.format {
        OutputFormat::Text => {
            let lines = Renderer::new(config.render)?.render_all(&exprs)?;
            output::print_lines(&lines).map_err(io_error)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&exprs)
                .map_err(|e| AstError::invalid_input(format!("cannot serialize: {}", e)))?;
            output::print_lines(&[json]).map_err(io_error)?;
        }
    }
    Ok(true)
}

/// Attaches the JavaScript text so the report can point at the node.
fn attach_source(err: AstError, source: Option<&Path>) -> AstError {
    let Some(path) = source else { return err };
    match fs::read_to_string(path) {
        Ok(text) => err.with_source(path.display().to_string(), text),
        Err(e) => {
            debug!("cannot read {} for error context: {}", path.display(), e);
            err
        }
    }
}

// ============================================================================
// CHECK
// ============================================================================

/// Returns `Ok(false)` when any program fails to round-trip.
fn handle_check(path: &Path) -> Result<bool> {
    let files = discover_json_files(path)?;
    if files.is_empty() {
        return Err(AstError::invalid_input(format!(
            "no .json files under {}",
            path.display()
        )));
    }

    let mut failures = 0;
    for file in &files {
        let label = file.display().to_string();
        match check_file(file) {
            Ok(None) => output::print_status(true, &label, None).map_err(io_error)?,
            Ok(Some(mismatch)) => {
                failures += 1;
                output::print_status(false, &label, Some(mismatch.reason)).map_err(io_error)?;
                output::print_mismatch(&mismatch.expected, &mismatch.actual).map_err(io_error)?;
            }
            Err(e) => {
                failures += 1;
                output::print_status(false, &label, Some(&e.to_string())).map_err(io_error)?;
            }
        }
    }
    info!("{} checked, {} failed", files.len(), failures);
    Ok(failures == 0)
}

/// Why a program failed to round-trip, with both sides pretty-printed.
#[derive(Debug)]
struct Mismatch {
    reason: &'static str,
    expected: String,
    actual: String,
}

/// Round-trips one program; `Some` when the rebuilt tree or its calls differ.
fn check_file(path: &Path) -> Result<Option<Mismatch>> {
    let input = read_json(path)?;
    let body = Value::Array(program_body(&input)?.clone());
    let exprs = build_ast(&input)?;
    let rebuilt = Value::Array(evaluate_all(&exprs, &EstreeBuilders)?);

    let expected = normalize(&body);
    let actual = normalize(&rebuilt);
    if expected != actual {
        return Ok(Some(Mismatch {
            reason: "reconstruction differs",
            expected: pretty(&expected)?,
            actual: pretty(&actual)?,
        }));
    }

    // Converting the reconstruction must give back the same calls.
    let again = build_ast(&serde_json::json!({ "type": "Program", "body": rebuilt }))?;
    compare_calls(&exprs, &again)
}

fn compare_calls(first: &[ConstructorExpr], again: &[ConstructorExpr]) -> Result<Option<Mismatch>> {
    if first == again {
        return Ok(None);
    }
    let calls = |exprs: &[ConstructorExpr]| -> Result<String> {
        let lines = Renderer::new(RenderOptions::default())?.render_all(exprs)?;
        Ok(lines.join("\n"))
    };
    Ok(Some(Mismatch {
        reason: "reconverting the reconstruction gives different calls",
        expected: calls(first)?,
        actual: calls(again)?,
    }))
}

fn discover_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            AstError::invalid_input(format!("failed to walk {}: {}", root.display(), e))
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .map_err(|e| AstError::invalid_input(format!("cannot read '{}': {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| {
        AstError::invalid_input(format!("'{}' is not valid JSON: {}", path.display(), e))
    })
}

fn pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AstError::invalid_input(format!("cannot serialize: {}", e)))
}

fn io_error(e: std::io::Error) -> AstError {
    AstError::invalid_input(format!("i/o error: {}", e))
}
