//! Constructor expressions: the output of conversion.
//!
//! A [`ConstructorExpr`] is "a call that would build a given node": the node
//! type (which names its builder) plus the positional arguments for that
//! builder. Expressions are immutable once built and serialize with serde.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::errors::{AstError, Result};
use crate::registry::{NodeType, Param, ParamKind, Signature};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// The value of an ESTree `Literal`.
///
/// # Examples
///
/// ```rust
/// use ast_builder::ast::LiteralValue;
/// assert_eq!(LiteralValue::Number(1.0).type_name(), "number");
/// assert_eq!(LiteralValue::Null.type_name(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    RegExp { pattern: String, flags: String },
    /// Decimal digits without the trailing `n`.
    BigInt(String),
}

impl LiteralValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::String(_) => "string",
            LiteralValue::Number(_) => "number",
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Null => "null",
            LiteralValue::RegExp { .. } => "regexp",
            LiteralValue::BigInt(_) => "bigint",
        }
    }
}

/// One positional argument of a builder call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    /// Explicit "no value" in an optional slot or a list hole.
    Null,
    Bool(bool),
    /// Names, operators and keywords, preserved byte-for-byte.
    Str(String),
    Literal(LiteralValue),
    Node(Box<ConstructorExpr>),
    List(Vec<Arg>),
    Template { cooked: Option<String>, raw: String },
}

impl Arg {
    pub fn node(expr: ConstructorExpr) -> Self {
        Arg::Node(Box::new(expr))
    }

    pub fn optional(expr: Option<ConstructorExpr>) -> Self {
        expr.map_or(Arg::Null, Arg::node)
    }

    pub fn list(exprs: impl IntoIterator<Item = ConstructorExpr>) -> Self {
        Arg::List(exprs.into_iter().map(Arg::node).collect())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Arg::Null => "null",
            Arg::Bool(_) => "boolean",
            Arg::Str(_) => "string",
            Arg::Literal(_) => "literal value",
            Arg::Node(_) => "node",
            Arg::List(_) => "list",
            Arg::Template { .. } => "template value",
        }
    }

    /// Whether this argument may sit in a slot of the given kind.
    pub fn fits(&self, kind: ParamKind) -> bool {
        match (kind, self) {
            (ParamKind::Name, Arg::Str(_)) => true,
            (ParamKind::Keyword(set), Arg::Str(s)) => set.iter().any(|k| *k == s.as_str()),
            (ParamKind::Flag, Arg::Bool(_)) => true,
            (ParamKind::Child, Arg::Node(_)) => true,
            (ParamKind::OptionalChild | ParamKind::LegacyChild, Arg::Node(_) | Arg::Null) => {
                true
            }
            (ParamKind::ChildList, Arg::List(items)) => {
                items.iter().all(|a| matches!(a, Arg::Node(_)))
            }
            (ParamKind::SparseList, Arg::List(items)) => {
                items.iter().all(|a| matches!(a, Arg::Node(_) | Arg::Null))
            }
            (ParamKind::LiteralValue, Arg::Literal(_)) => true,
            (ParamKind::TemplateValue, Arg::Template { .. }) => true,
            _ => false,
        }
    }
}

/// A builder invocation that reconstructs one node.
///
/// # Examples
///
/// ```rust
/// use ast_builder::ast::builders;
/// use ast_builder::registry::NodeType;
/// let expr = builders::identifier("x");
/// assert_eq!(expr.node_type(), NodeType::Identifier);
/// assert_eq!(expr.builder(), "identifier");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorExpr {
    #[serde(rename = "type")]
    node_type: NodeType,
    args: Vec<Arg>,
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl ConstructorExpr {
    /// Assembles an expression without checking it against its signature.
    /// The renderer and the interpreter check before use; [`builders`] only
    /// produces well-formed expressions.
    pub fn new(node_type: NodeType, args: Vec<Arg>) -> Self {
        Self { node_type, args }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn builder(&self) -> &'static str {
        self.node_type.builder_name()
    }

    pub fn signature(&self) -> Signature {
        self.node_type.signature()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The argument bound to `field`, if the signature has that field.
    pub fn arg(&self, field: &str) -> Option<&Arg> {
        let index = self.signature().params.iter().position(|p| p.field == field)?;
        self.args.get(index)
    }

    /// Checks this call (not its children) against its signature.
    pub fn check_signature(&self) -> Result<()> {
        let sig = self.signature();
        if self.args.len() != sig.arity() {
            return Err(AstError::signature_mismatch(
                sig.builder,
                format!("{} argument(s) {}", sig.arity(), sig),
                format!("{}", self.args.len()),
            ));
        }
        for (param, arg) in sig.params.iter().zip(&self.args) {
            if !arg.fits(param.kind) {
                return Err(mismatch(sig.builder, param, arg));
            }
        }
        Ok(())
    }

    /// Direct child expressions in argument order, list elements included.
    pub fn children(&self) -> Vec<&ConstructorExpr> {
        let mut out = Vec::new();
        for arg in &self.args {
            match arg {
                Arg::Node(expr) => out.push(&**expr),
                Arg::List(items) => out.extend(items.iter().filter_map(|a| match a {
                    Arg::Node(expr) => Some(&**expr),
                    _ => None,
                })),
                _ => {}
            }
        }
        out
    }
}

fn mismatch(builder: &str, param: &Param, arg: &Arg) -> AstError {
    let found = match (param.kind, arg) {
        (ParamKind::Keyword(_), Arg::Str(s)) => format!("unknown keyword '{}'", s),
        _ => arg.kind_name().to_string(),
    };
    AstError::signature_mismatch(
        builder,
        format!("{} for `{}`", param.kind.describe(), param.field),
        found,
    )
}

// ============================================================================
// MODULE EXPORTS
// ============================================================================

pub mod builders;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_signature_reports_arity() {
        let expr = ConstructorExpr::new(NodeType::IfStatement, vec![Arg::Null]);
        let err = expr.check_signature().unwrap_err();
        assert!(err.to_string().contains("ifStatement expects 3 argument(s)"));
    }

    #[test]
    fn check_signature_rejects_unknown_operator() {
        let x = builders::identifier("x");
        let expr = ConstructorExpr::new(
            NodeType::BinaryExpression,
            vec![Arg::Str("<>".into()), Arg::node(x.clone()), Arg::node(x)],
        );
        let err = expr.check_signature().unwrap_err();
        assert!(err.to_string().contains("unknown keyword '<>'"));
    }

    #[test]
    fn children_walks_lists_and_slots() {
        let call = builders::call_expression(
            builders::identifier("f"),
            vec![builders::identifier("a"), builders::identifier("b")],
            false,
        );
        let names: Vec<_> = call.children().iter().map(|c| c.builder()).collect();
        assert_eq!(names, ["identifier", "identifier", "identifier"]);
    }

    #[test]
    fn arg_looks_up_by_field_name() {
        let decl = builders::variable_declaration("const", vec![]);
        assert_eq!(decl.arg("kind"), Some(&Arg::Str("const".into())));
        assert_eq!(decl.arg("init"), None);
    }
}
