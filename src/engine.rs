//! The tree transducer: a whole program in, one constructor expression per
//! top-level statement out.
//!
//! Conversion is all-or-nothing. The first failing statement aborts the run
//! and its error carries the path from the program root (`body[3]...`).

use log::{debug, warn};
use serde_json::Value;

use crate::ast::ConstructorExpr;
use crate::convert::Converter;
use crate::errors::{AstError, Result};
use crate::estree::{describe, NodePath};

// ============================================================================
// PROGRAM ENTRY POINT
// ============================================================================

/// Converts every statement of `program`, in source order.
///
/// Accepts an ESTree `Program`, or a recast/babel `File` whose `program`
/// field holds one. Directive prologues (`"use strict";`) are ordinary
/// `ExpressionStatement`s and come through like any other statement.
pub fn build_ast(program: &Value) -> Result<Vec<ConstructorExpr>> {
    let body = program_body(program)?;
    debug!("building {} top-level statement(s)", body.len());

    let mut out = Vec::with_capacity(body.len());
    for (index, statement) in body.iter().enumerate() {
        let mut path = NodePath::root();
        path.push_field("body");
        path.push_index(index);
        let expr = Converter::new(path).convert(statement)?;
        debug!("body[{}] -> {}", index, expr.builder());
        out.push(expr);
    }
    Ok(out)
}

/// Parses JSON text and runs [`build_ast`] on it.
pub fn build_ast_from_str(json: &str) -> Result<Vec<ConstructorExpr>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AstError::invalid_input(format!("not valid JSON: {}", e)))?;
    build_ast(&value)
}

// ============================================================================
// INPUT UNWRAPPING
// ============================================================================

/// The top-level statement list of a `Program` or `File` input.
pub fn program_body(input: &Value) -> Result<&Vec<Value>> {
    let tag = input.get("type").and_then(Value::as_str);
    let program = match tag {
        Some("Program") => input,
        Some("File") => {
            warn!("input is a File wrapper; converting its `program`");
            input
                .get("program")
                .filter(|p| p.get("type").and_then(Value::as_str) == Some("Program"))
                .ok_or_else(|| AstError::invalid_input("File node has no `program` of type Program"))?
        }
        Some(other) => {
            return Err(AstError::invalid_input(format!(
                "expected a Program node, found '{}'",
                other
            ))
            .with_help("convert a single node with `ast_builder::convert` instead"))
        }
        None => {
            return Err(AstError::invalid_input(format!(
                "expected a Program node, found {}",
                describe(input)
            )))
        }
    };

    match program.get("body") {
        Some(Value::Array(body)) => Ok(body),
        Some(other) => Err(AstError::invalid_input(format!(
            "Program `body` must be an array, found {}",
            describe(other)
        ))),
        None => Err(AstError::invalid_input("Program has no `body`")),
    }
}
