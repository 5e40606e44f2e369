//! The recursive node-type dispatcher.
//!
//! `convert` resolves a node's tag to its [`NodeType`], then walks that type's
//! signature and reads each parameter from the node according to its
//! [`ParamKind`]. There is no per-type code here: arity, order and optionality
//! all come from the registry.

use log::trace;
use serde_json::Value;

use crate::ast::{Arg, ConstructorExpr, LiteralValue};
use crate::errors::{AstError, Result};
use crate::estree::{describe, is_vacant, Node, NodePath};
use crate::registry::{NodeType, Param, ParamKind};

/// Converts one ESTree node (and everything below it) into the builder call
/// that reconstructs it.
///
/// Errors carry the structural path from `node` downwards.
pub fn convert(node: &Value) -> Result<ConstructorExpr> {
    Converter::new(NodePath::root()).convert(node)
}

/// Walk state: the path from the nearest top-level statement.
pub(crate) struct Converter {
    path: NodePath,
}

impl Converter {
    pub(crate) fn new(path: NodePath) -> Self {
        Self { path }
    }

    pub(crate) fn convert(&mut self, value: &Value) -> Result<ConstructorExpr> {
        let node = Node::from_value(value).map_err(|e| e.at_path(self.path.clone()))?;
        let node_type = NodeType::from_tag(node.tag()).ok_or_else(|| {
            AstError::unsupported(node.tag())
                .at_path(self.path.clone())
                .at_position(node.position())
        })?;
        trace!("converting {} at {}", node_type, self.path);

        let sig = node_type.signature();
        for field in node_type.unslotted_fields() {
            if node.get(field).is_some_and(|v| !is_vacant(v)) {
                return Err(node
                    .malformed(format!("`{}` is set but {} has no slot for it", field, sig.builder))
                    .at_path(self.path.clone()));
            }
        }
        let mut args = Vec::with_capacity(sig.arity());
        for param in sig.params {
            let arg = self
                .convert_param(&node, param)
                .map_err(|e| e.at_path(self.path.clone()))?;
            args.push(arg);
        }
        Ok(ConstructorExpr::new(node_type, args))
    }

    fn convert_param(&mut self, node: &Node<'_>, param: &Param) -> Result<Arg> {
        match param.kind {
            ParamKind::Name => Ok(Arg::Str(node.string(param.field)?.to_string())),
            ParamKind::Keyword(allowed) => {
                let word = node.string(param.field)?;
                if allowed.iter().any(|k| *k == word) {
                    Ok(Arg::Str(word.to_string()))
                } else {
                    Err(node.malformed(format!(
                        "`{}` cannot be '{}' (expected one of {})",
                        param.field,
                        word,
                        allowed.join(", ")
                    )))
                }
            }
            ParamKind::Flag => Ok(Arg::Bool(node.flag(param.field)?)),
            ParamKind::Child => {
                let child = node.required(param.field)?;
                self.nested(param.field, None, child).map(Arg::node)
            }
            ParamKind::OptionalChild | ParamKind::LegacyChild => match node.optional(param.field) {
                Some(child) => self.nested(param.field, None, child).map(Arg::node),
                None => Ok(Arg::Null),
            },
            ParamKind::ChildList => {
                let items = node.array(param.field)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    if item.is_null() {
                        return Err(node.malformed(format!(
                            "`{}[{}]` is null but this list cannot have holes",
                            param.field, i
                        )));
                    }
                    out.push(Arg::node(self.nested(param.field, Some(i), item)?));
                }
                Ok(Arg::List(out))
            }
            ParamKind::SparseList => {
                let items = node.array(param.field)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(match item {
                        Value::Null => Arg::Null,
                        item => Arg::node(self.nested(param.field, Some(i), item)?),
                    });
                }
                Ok(Arg::List(out))
            }
            ParamKind::LiteralValue => literal_value(node).map(Arg::Literal),
            ParamKind::TemplateValue => template_value(node, param.field),
        }
    }

    /// Converts a child while the path points at it.
    fn nested(&mut self, field: &str, index: Option<usize>, value: &Value) -> Result<ConstructorExpr> {
        self.path.push_field(field);
        if let Some(i) = index {
            self.path.push_index(i);
        }
        let result = self.convert(value);
        if index.is_some() {
            self.path.pop();
        }
        self.path.pop();
        result
    }
}

// ----------------------------------------------------------------------------
// Scalar readers
// ----------------------------------------------------------------------------

fn literal_value(node: &Node<'_>) -> Result<LiteralValue> {
    if let Some(regex) = node.optional("regex") {
        let pattern = regex.get("pattern").and_then(Value::as_str);
        let flags = regex.get("flags").and_then(Value::as_str);
        return match (pattern, flags) {
            (Some(pattern), Some(flags)) => Ok(LiteralValue::RegExp {
                pattern: pattern.to_string(),
                flags: flags.to_string(),
            }),
            _ => Err(node.malformed("`regex` must have string `pattern` and `flags`")),
        };
    }
    if let Some(bigint) = node.optional("bigint") {
        let digits = bigint
            .as_str()
            .ok_or_else(|| node.malformed("`bigint` must be a string of digits"))?;
        return Ok(LiteralValue::BigInt(digits.to_string()));
    }
    match node.get("value") {
        None => Err(node.malformed("missing field `value`")),
        Some(Value::Null) => Ok(LiteralValue::Null),
        Some(Value::Bool(b)) => Ok(LiteralValue::Boolean(*b)),
        Some(Value::String(s)) => Ok(LiteralValue::String(s.clone())),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(LiteralValue::Number)
            .ok_or_else(|| node.malformed(format!("number {} is not representable", n))),
        Some(other) => Err(node.malformed(format!(
            "literal `value` cannot be {}",
            describe(other)
        ))),
    }
}

fn template_value(node: &Node<'_>, field: &str) -> Result<Arg> {
    let value = node.required(field)?;
    let raw = value
        .get("raw")
        .and_then(Value::as_str)
        .ok_or_else(|| node.malformed(format!("`{}.raw` must be a string", field)))?;
    // `cooked` is null for invalid escapes in tagged templates.
    let cooked = match value.get("cooked") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(node.malformed(format!(
                "`{}.cooked` cannot be {}",
                field,
                describe(other)
            )))
        }
    };
    Ok(Arg::Template {
        cooked,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn identifier_name_is_copied_verbatim() {
        let expr = convert(&json!({ "type": "Identifier", "name": "caf\u{e9}$_1" })).unwrap();
        assert_eq!(expr, builders::identifier("caf\u{e9}$_1"));
    }

    #[test]
    fn missing_alternate_becomes_null_slot() {
        let expr = convert(&json!({
            "type": "IfStatement",
            "test": { "type": "Identifier", "name": "a" },
            "consequent": { "type": "BlockStatement", "body": [] },
            "alternate": null
        }))
        .unwrap();
        assert_eq!(expr.args().len(), 3);
        assert_eq!(expr.arg("alternate"), Some(&Arg::Null));
    }

    #[test]
    fn array_holes_are_kept() {
        let expr = convert(&json!({
            "type": "ArrayExpression",
            "elements": [null, { "type": "Literal", "value": 1, "raw": "1" }]
        }))
        .unwrap();
        assert_eq!(
            expr,
            builders::array_expression(vec![None, Some(builders::number_literal(1.0))])
        );
    }

    #[test]
    fn holes_outside_sparse_lists_are_malformed() {
        let err = convert(&json!({ "type": "BlockStatement", "body": [null] })).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedNode { ref node_type, .. } if node_type == "BlockStatement"));
    }

    #[test]
    fn unknown_operator_is_malformed() {
        let err = convert(&json!({
            "type": "BinaryExpression", "operator": "<>",
            "left": { "type": "Identifier", "name": "a" },
            "right": { "type": "Identifier", "name": "b" }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`operator` cannot be '<>'"));
    }

    #[test]
    fn unsupported_tag_reports_nested_path() {
        let err = convert(&json!({
            "type": "ExpressionStatement",
            "expression": {
                "type": "CallExpression",
                "callee": { "type": "Identifier", "name": "f" },
                "arguments": [
                    { "type": "Identifier", "name": "a" },
                    { "type": "JSXElement", "start": 4, "end": 11 }
                ]
            }
        }))
        .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnsupportedNodeType {
                tag: "JSXElement".into()
            }
        );
        assert_eq!(
            err.location.path.as_ref().map(|p| p.to_string()).as_deref(),
            Some("expression.arguments[1]")
        );
        assert!(err.location.position.is_some());
    }

    #[test]
    fn regex_and_bigint_literals() {
        let regex = convert(&json!({
            "type": "Literal", "value": {}, "raw": "/a+/gi",
            "regex": { "pattern": "a+", "flags": "gi" }
        }))
        .unwrap();
        assert_eq!(
            regex,
            builders::literal(LiteralValue::RegExp {
                pattern: "a+".into(),
                flags: "gi".into()
            })
        );
        let big = convert(&json!({
            "type": "Literal", "value": "10", "raw": "10n", "bigint": "10"
        }))
        .unwrap();
        assert_eq!(big, builders::literal(LiteralValue::BigInt("10".into())));
    }

    #[test]
    fn literal_without_value_is_malformed() {
        let err = convert(&json!({ "type": "Literal", "raw": "1" })).unwrap_err();
        assert!(err.to_string().contains("missing field `value`"));
    }

    #[test]
    fn import_attributes_are_rejected_not_dropped() {
        let err = convert(&json!({
            "type": "ImportDeclaration",
            "specifiers": [{
                "type": "ImportDefaultSpecifier",
                "local": { "type": "Identifier", "name": "data" }
            }],
            "source": { "type": "Literal", "value": "./d.json", "raw": "'./d.json'" },
            "attributes": [{
                "type": "ImportAttribute",
                "key": { "type": "Identifier", "name": "type" },
                "value": { "type": "Literal", "value": "json", "raw": "'json'" }
            }]
        }))
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedNode { ref node_type, .. } if node_type == "ImportDeclaration"));
        assert!(err.to_string().contains("`attributes` is set"));
    }

    #[test]
    fn empty_import_attributes_are_accepted() {
        let expr = convert(&json!({
            "type": "ExportAllDeclaration",
            "source": { "type": "Literal", "value": "m", "raw": "'m'" },
            "exported": null,
            "attributes": []
        }))
        .unwrap();
        assert_eq!(expr, builders::export_all_declaration(builders::string_literal("m"), None));
    }

    #[test]
    fn dynamic_import_options_are_rejected() {
        let source = json!({ "type": "Literal", "value": "m", "raw": "'m'" });
        let plain = convert(&json!({ "type": "ImportExpression", "source": source, "options": null }));
        assert!(plain.is_ok());
        let err = convert(&json!({
            "type": "ImportExpression",
            "source": source,
            "options": { "type": "ObjectExpression", "properties": [] }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`options` is set but importExpression has no slot"));
    }

    #[test]
    fn template_element_with_invalid_escape() {
        let expr = convert(&json!({
            "type": "TemplateElement",
            "value": { "cooked": null, "raw": "\\unicode" },
            "tail": true
        }))
        .unwrap();
        assert_eq!(expr, builders::template_element(None, "\\unicode", true));
    }
}
