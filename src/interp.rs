//! Direct interpretation of constructor expressions.
//!
//! [`evaluate`] walks a [`ConstructorExpr`] bottom-up and hands each call to a
//! [`BuilderSet`], the explicit set of builder capabilities. Nothing is
//! rendered to text and re-parsed. [`EstreeBuilders`] is the bundled set; it
//! reconstructs ESTree JSON nodes.

use log::trace;
use serde_json::{Map, Number, Value};

use crate::ast::{Arg, ConstructorExpr, LiteralValue};
use crate::errors::{AstError, Result};
use crate::registry::{NodeType, ParamKind, Signature};

// ============================================================================
// BUILDER CAPABILITIES
// ============================================================================

/// An argument after its nested calls have been built.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated<N> {
    Null,
    Bool(bool),
    Str(String),
    Literal(LiteralValue),
    Node(N),
    List(Vec<Evaluated<N>>),
    Template { cooked: Option<String>, raw: String },
}

/// One constructor per node type, keyed by signature.
///
/// `build` receives the arguments in signature order. Implementations are
/// expected to reject argument lists that do not fit `sig` with
/// `SignatureMismatch` instead of guessing.
pub trait BuilderSet {
    type Node;

    fn build(&self, sig: Signature, args: Vec<Evaluated<Self::Node>>) -> Result<Self::Node>;
}

/// Builds the node described by `expr` with `builders`.
///
/// Every call is checked against its signature before its arguments are
/// evaluated, so a mismatch is reported at the outermost bad call.
pub fn evaluate<B: BuilderSet>(expr: &ConstructorExpr, builders: &B) -> Result<B::Node> {
    expr.check_signature()?;
    let sig = expr.signature();
    let mut args = Vec::with_capacity(expr.args().len());
    for arg in expr.args() {
        args.push(evaluate_arg(arg, builders)?);
    }
    trace!("building {}", sig.builder);
    builders.build(sig, args)
}

/// Evaluates a program's worth of expressions, preserving order.
pub fn evaluate_all<B: BuilderSet>(exprs: &[ConstructorExpr], builders: &B) -> Result<Vec<B::Node>> {
    exprs.iter().map(|e| evaluate(e, builders)).collect()
}

fn evaluate_arg<B: BuilderSet>(arg: &Arg, builders: &B) -> Result<Evaluated<B::Node>> {
    Ok(match arg {
        Arg::Null => Evaluated::Null,
        Arg::Bool(b) => Evaluated::Bool(*b),
        Arg::Str(s) => Evaluated::Str(s.clone()),
        Arg::Literal(value) => Evaluated::Literal(value.clone()),
        Arg::Node(expr) => Evaluated::Node(evaluate(expr, builders)?),
        Arg::List(items) => Evaluated::List(
            items
                .iter()
                .map(|item| evaluate_arg(item, builders))
                .collect::<Result<_>>()?,
        ),
        Arg::Template { cooked, raw } => Evaluated::Template {
            cooked: cooked.clone(),
            raw: raw.clone(),
        },
    })
}

// ============================================================================
// ESTREE JSON BUILDERS
// ============================================================================

/// Builds ESTree JSON: `{ "type": <tag>, <field>: <arg>, ... }` with fields in
/// signature order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstreeBuilders;

impl BuilderSet for EstreeBuilders {
    type Node = Value;

    fn build(&self, sig: Signature, args: Vec<Evaluated<Value>>) -> Result<Value> {
        if args.len() != sig.arity() {
            return Err(AstError::signature_mismatch(
                sig.builder,
                format!("{} argument(s) {}", sig.arity(), sig),
                args.len().to_string(),
            ));
        }

        let mut node = Map::new();
        node.insert("type".into(), Value::String(sig.node_type.tag().into()));
        for (param, arg) in sig.params.iter().zip(args) {
            match (param.kind, arg) {
                // Parsers stopped emitting the guard; only keep a real one.
                (ParamKind::LegacyChild, Evaluated::Null) => {}
                (ParamKind::LiteralValue, Evaluated::Literal(value)) => {
                    literal_fields(&mut node, sig, value)?
                }
                (ParamKind::TemplateValue, Evaluated::Template { cooked, raw }) => {
                    let mut value = Map::new();
                    value.insert("raw".into(), Value::String(raw));
                    value.insert("cooked".into(), cooked.map_or(Value::Null, Value::String));
                    node.insert(param.field.into(), Value::Object(value));
                }
                (kind, arg) => {
                    let value = plain(sig, param.field, kind, arg)?;
                    node.insert(param.field.into(), value);
                }
            }
        }
        implied_fields(&mut node, sig.node_type);
        Ok(Value::Object(node))
    }
}

/// ESTree fields that are constant for a node type and so have no slot.
fn implied_fields(node: &mut Map<String, Value>, node_type: NodeType) {
    if node_type == NodeType::ArrowFunctionExpression {
        node.insert("id".into(), Value::Null);
        node.insert("generator".into(), Value::Bool(false));
    }
}

fn plain(sig: Signature, field: &str, kind: ParamKind, arg: Evaluated<Value>) -> Result<Value> {
    match arg {
        Evaluated::Null => Ok(Value::Null),
        Evaluated::Bool(b) => Ok(Value::Bool(b)),
        Evaluated::Str(s) => Ok(Value::String(s)),
        Evaluated::Node(node) => Ok(node),
        Evaluated::List(items) => items
            .into_iter()
            .map(|item| plain(sig, field, kind, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Evaluated::Literal(value) => Err(AstError::signature_mismatch(
            sig.builder,
            format!("{} for `{}`", kind.describe(), field),
            format!("{} literal", value.type_name()),
        )),
        Evaluated::Template { .. } => Err(AstError::signature_mismatch(
            sig.builder,
            format!("{} for `{}`", kind.describe(), field),
            "template value",
        )),
    }
}

fn literal_fields(node: &mut Map<String, Value>, sig: Signature, value: LiteralValue) -> Result<()> {
    match value {
        LiteralValue::String(s) => {
            node.insert("value".into(), Value::String(s));
        }
        LiteralValue::Boolean(b) => {
            node.insert("value".into(), Value::Bool(b));
        }
        LiteralValue::Null => {
            node.insert("value".into(), Value::Null);
        }
        LiteralValue::Number(n) => {
            let number = json_number(n).ok_or_else(|| {
                AstError::render(sig.builder, format!("{} cannot be represented in JSON", n))
            })?;
            node.insert("value".into(), Value::Number(number));
        }
        LiteralValue::RegExp { pattern, flags } => {
            let mut regex = Map::new();
            regex.insert("pattern".into(), Value::String(pattern));
            regex.insert("flags".into(), Value::String(flags));
            node.insert("value".into(), Value::Null);
            node.insert("regex".into(), Value::Object(regex));
        }
        LiteralValue::BigInt(digits) => {
            node.insert("value".into(), Value::String(digits.clone()));
            node.insert("bigint".into(), Value::String(digits));
        }
    }
    Ok(())
}

/// Integral values come back as JSON integers, the way parsers serialize
/// them. Past 2^53 the digits are the shortest decimal for the double, which
/// is what `JSON.stringify` writes (`12345678901234567000`, not `...168`).
fn json_number(n: f64) -> Option<Number> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() != 0.0 || (n == 0.0 && n.is_sign_negative()) {
        return Number::from_f64(n);
    }
    let digits = n.to_string();
    let integer = if n >= 0.0 {
        digits.parse::<u64>().ok().map(Number::from)
    } else {
        digits.parse::<i64>().ok().map(Number::from)
    };
    integer.or_else(|| Number::from_f64(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn builds_estree_json() {
        let decl = variable_declaration(
            "const",
            vec![variable_declarator(identifier("x"), Some(number_literal(1.0)))],
        );
        let node = evaluate(&decl, &EstreeBuilders).unwrap();
        assert_eq!(
            node,
            json!({
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "x" },
                    "init": { "type": "Literal", "value": 1 }
                }]
            })
        );
    }

    #[test]
    fn absent_guard_is_not_materialized() {
        let clause = catch_clause(Some(identifier("e")), block_statement(vec![]));
        let node = evaluate(&clause, &EstreeBuilders).unwrap();
        assert!(node.get("guard").is_none());
        assert_eq!(node["param"]["name"], "e");
    }

    #[test]
    fn arrow_functions_carry_implied_fields() {
        let arrow = arrow_function_expression(vec![], identifier("x"), true, false);
        let node = evaluate(&arrow, &EstreeBuilders).unwrap();
        assert_eq!(node["id"], Value::Null);
        assert_eq!(node["generator"], Value::Bool(false));
    }

    #[test]
    fn builder_rejects_wrong_arity() {
        let err = EstreeBuilders
            .build(NodeType::IfStatement.signature(), vec![Evaluated::Null])
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SignatureMismatch { .. }));
    }

    #[test]
    fn evaluate_checks_before_building() {
        let bad = ConstructorExpr::new(NodeType::ReturnStatement, vec![Arg::Str("x".into())]);
        let err = evaluate(&bad, &EstreeBuilders).unwrap_err();
        assert_eq!(
            err.to_string(),
            "returnStatement expects node or null for `argument`, got string"
        );
    }

    #[test]
    fn numbers_keep_their_json_shape() {
        assert_eq!(json_number(3.0), Some(Number::from(3u64)));
        assert_eq!(json_number(-2.0), Some(Number::from(-2i64)));
        assert_eq!(json_number(0.25).and_then(|n| n.as_f64()), Some(0.25));
        assert_eq!(json_number(f64::NAN), None);
    }

    #[test]
    fn large_integers_keep_their_parsed_digits() {
        let parsed: Value = serde_json::from_str("12345678901234567000").unwrap();
        let n = parsed.as_f64().unwrap();
        assert_eq!(json_number(n).map(Value::Number), Some(parsed));
        assert_eq!(
            json_number(-9_007_199_254_740_993.0),
            Some(Number::from(-9_007_199_254_740_992i64))
        );
        // Beyond u64 serde_json reads a float, and so do we.
        assert!(json_number(1e21).is_some_and(|n| n.is_f64()));
    }

    /// A builder set that only counts calls, to show the seam is generic.
    struct Counting;

    impl BuilderSet for Counting {
        type Node = usize;

        fn build(&self, _sig: Signature, args: Vec<Evaluated<usize>>) -> Result<usize> {
            fn count(arg: &Evaluated<usize>) -> usize {
                match arg {
                    Evaluated::Node(n) => *n,
                    Evaluated::List(items) => items.iter().map(count).sum(),
                    _ => 0,
                }
            }
            Ok(1 + args.iter().map(count).sum::<usize>())
        }
    }

    #[test]
    fn custom_builder_sets_see_every_call() {
        let call = call_expression(
            member_expression(identifier("a"), identifier("b"), false, false),
            vec![identifier("c")],
            false,
        );
        assert_eq!(evaluate(&call, &Counting).unwrap(), 5);
    }
}
