//! Read-only view over ESTree JSON produced by an external parser.
//!
//! The converter never trusts the input's shape. Every accessor here returns a
//! `MalformedNode` error carrying the node's tag and position instead of
//! panicking, and [`NodePath`] records how the walk reached the node.

use serde_json::{Map, Value};
use std::fmt;

use crate::errors::{to_source_span, AstError, Result};
use crate::registry::{NodeType, ParamKind};

/// Keys that only describe where a node came from or how it was spelled,
/// never what it is.
pub const METADATA_KEYS: &[&str] = &[
    "start", "end", "loc", "range", "raw", "comments", "directive",
];

// ============================================================================
// STRUCTURAL PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Structural path from the nearest top-level statement, e.g.
/// `body[2].declarations[0].init.callee`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push_field(&mut self, name: &str) {
        self.0.push(PathSegment::Field(name.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// SOURCE POSITIONS
// ============================================================================

/// Where a node sits in the original source, as far as the parser recorded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub span: Option<miette::SourceSpan>,
    /// 1-based line, as ESTree `loc` reports it.
    pub line: Option<usize>,
    /// 0-based column, as ESTree `loc` reports it.
    pub column: Option<usize>,
}

impl Position {
    /// Reads acorn-style `start`/`end`, esprima-style `range` and `loc`.
    pub fn of(map: &Map<String, Value>) -> Option<Self> {
        let offsets = match (map.get("start"), map.get("end")) {
            (Some(Value::Number(s)), Some(Value::Number(e))) => s.as_u64().zip(e.as_u64()),
            _ => match map.get("range") {
                Some(Value::Array(range)) if range.len() == 2 => {
                    range[0].as_u64().zip(range[1].as_u64())
                }
                _ => None,
            },
        };
        let start = map
            .get("loc")
            .and_then(|loc| loc.get("start"))
            .and_then(Value::as_object);
        let line = start
            .and_then(|s| s.get("line"))
            .and_then(Value::as_u64)
            .map(|n| n as usize);
        let column = start
            .and_then(|s| s.get("column"))
            .and_then(Value::as_u64)
            .map(|n| n as usize);

        if offsets.is_none() && line.is_none() {
            return None;
        }
        Some(Self {
            span: offsets.map(|(s, e)| to_source_span(s as usize, e as usize)),
            line,
            column,
        })
    }
}

// ============================================================================
// NODE VIEW
// ============================================================================

/// A borrowed ESTree node: a JSON object with a string `type` tag.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tag: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> Node<'a> {
    /// Views `value` as a node. Fails with `MalformedNode` when it is not an
    /// object or lacks a string `type`.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let fields = value.as_object().ok_or_else(|| {
            AstError::malformed("<unknown>", format!("expected a node object, found {}", describe(value)))
        })?;
        let tag = fields.get("type").and_then(Value::as_str).ok_or_else(|| {
            AstError::malformed("<unknown>", "node object has no string `type` tag")
                .at_position(Position::of(fields))
        })?;
        Ok(Self { tag, fields })
    }

    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn position(&self) -> Option<Position> {
        Position::of(self.fields)
    }

    /// The raw field; `None` only when the key is absent.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    /// A field that must be present and non-null.
    pub fn required(&self, name: &str) -> Result<&'a Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(self.malformed(format!("missing field `{}`", name))),
            Some(value) => Ok(value),
        }
    }

    /// A field that may be absent or `null`.
    pub fn optional(&self, name: &str) -> Option<&'a Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn string(&self, name: &str) -> Result<&'a str> {
        let value = self.required(name)?;
        value.as_str().ok_or_else(|| {
            self.malformed(format!("field `{}` must be a string, found {}", name, describe(value)))
        })
    }

    /// Boolean modifier; absent means `false`.
    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.malformed(format!(
                "field `{}` must be a boolean, found {}",
                name,
                describe(other)
            ))),
        }
    }

    pub fn array(&self, name: &str) -> Result<&'a Vec<Value>> {
        let value = self.required(name)?;
        value.as_array().ok_or_else(|| {
            self.malformed(format!("field `{}` must be an array, found {}", name, describe(value)))
        })
    }

    /// A `MalformedNode` error for this node, positioned at it.
    pub fn malformed(&self, reason: impl Into<String>) -> AstError {
        AstError::malformed(self.tag, reason).at_position(self.position())
    }
}

/// `null`, `[]` or `{}`: a field that says nothing.
pub fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Short description of a JSON value's kind for error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Strips what a parser may or may not write so two trees can be compared
/// structurally.
///
/// On node objects this drops the keys in [`METADATA_KEYS`], flags that are
/// `false` or `null` (absent means `false`) and vacant unslotted fields such
/// as acorn's `attributes: []`. A regex or bigint literal's `value` is dropped
/// too: parsers serialize the host object there, and `regex`/`bigint` fully
/// describe the literal.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            // Only nodes carry metadata; a template element's `value.raw` is data.
            let tag = map.get("type").and_then(Value::as_str);
            let node_type = tag.and_then(NodeType::from_tag);
            let is_special_literal = node_type == Some(NodeType::Literal)
                && (map.contains_key("regex") || map.contains_key("bigint"));
            let out = map
                .iter()
                .filter(|(k, _)| !(tag.is_some() && METADATA_KEYS.iter().any(|m| *m == k.as_str())))
                .filter(|(k, _)| !(is_special_literal && k.as_str() == "value"))
                .filter(|(k, v)| !node_type.is_some_and(|t| is_default_field(t, k, v)))
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect::<Map<_, _>>();
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        other => other.clone(),
    }
}

/// Whether `field` holds what its absence would mean for `node_type`.
fn is_default_field(node_type: NodeType, field: &str, value: &Value) -> bool {
    let is_flag = node_type
        .signature()
        .params
        .iter()
        .any(|p| p.field == field && p.kind == ParamKind::Flag);
    if is_flag {
        return matches!(value, Value::Null | Value::Bool(false));
    }
    node_type.unslotted_fields().iter().any(|f| *f == field) && is_vacant(value)
}
