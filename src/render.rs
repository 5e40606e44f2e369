//! Renders constructor expressions as builder-call source text.
//!
//! Output is a single line per expression, e.g.
//! `j.classDeclaration(j.identifier('A'), j.classBody([]), null)`. The text is
//! meant to be evaluated with the namespace bound to a builder library such as
//! ast-types' `builders`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::ast::{Arg, ConstructorExpr, LiteralValue};
use crate::errors::{AstError, Result};

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("namespace pattern is valid")
});

static REGEX_FLAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[dgimsuvy]*$").expect("flags pattern is valid"));

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Identifier the builder calls hang off, `j` in `j.identifier('x')`.
    pub namespace: String,
    pub quote: QuoteStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            namespace: "j".to_string(),
            quote: QuoteStyle::Single,
        }
    }
}

// ============================================================================
// RENDERER
// ============================================================================

#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Fails when the namespace is not a (dotted) JavaScript identifier.
    pub fn new(options: RenderOptions) -> Result<Self> {
        if !NAMESPACE.is_match(&options.namespace) {
            return Err(AstError::render(
                options.namespace.clone(),
                "namespace must be an identifier or a dotted identifier path",
            ));
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, expr: &ConstructorExpr) -> Result<String> {
        let mut out = String::new();
        self.write_expr(&mut out, expr)?;
        Ok(out)
    }

    pub fn render_all(&self, exprs: &[ConstructorExpr]) -> Result<Vec<String>> {
        exprs.iter().map(|e| self.render(e)).collect()
    }

    fn write_expr(&self, out: &mut String, expr: &ConstructorExpr) -> Result<()> {
        expr.check_signature()?;
        out.push_str(&self.options.namespace);
        out.push('.');
        out.push_str(expr.builder());
        out.push('(');
        for (i, arg) in expr.args().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_arg(out, expr, arg)?;
        }
        out.push(')');
        Ok(())
    }

    fn write_arg(&self, out: &mut String, owner: &ConstructorExpr, arg: &Arg) -> Result<()> {
        match arg {
            Arg::Null => out.push_str("null"),
            Arg::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Arg::Str(s) => self.write_string(out, s),
            Arg::Literal(value) => self.write_literal(out, owner, value)?,
            Arg::Node(expr) => self.write_expr(out, expr)?,
            Arg::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_arg(out, owner, item)?;
                }
                out.push(']');
            }
            Arg::Template { cooked, raw } => {
                out.push_str("{ cooked: ");
                match cooked {
                    Some(cooked) => self.write_string(out, cooked),
                    None => out.push_str("null"),
                }
                out.push_str(", raw: ");
                self.write_string(out, raw);
                out.push_str(" }");
            }
        }
        Ok(())
    }

    fn write_literal(
        &self,
        out: &mut String,
        owner: &ConstructorExpr,
        value: &LiteralValue,
    ) -> Result<()> {
        match value {
            LiteralValue::String(s) => self.write_string(out, s),
            LiteralValue::Number(n) => out.push_str(&format_number(*n).ok_or_else(|| {
                AstError::render(owner.builder(), format!("{} has no literal form", n))
            })?),
            LiteralValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            LiteralValue::Null => out.push_str("null"),
            LiteralValue::RegExp { pattern, flags } => {
                if pattern.is_empty() || pattern.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
                    return Err(AstError::render(
                        owner.builder(),
                        format!("regular expression /{}/ cannot be written literally", pattern),
                    ));
                }
                if !REGEX_FLAGS.is_match(flags) {
                    return Err(AstError::render(
                        owner.builder(),
                        format!("unknown regular expression flags '{}'", flags),
                    ));
                }
                let _ = write!(out, "/{}/{}", pattern, flags);
            }
            LiteralValue::BigInt(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AstError::render(
                        owner.builder(),
                        format!("bigint '{}' is not a decimal digit string", digits),
                    ));
                }
                let _ = write!(out, "{}n", digits);
            }
        }
        Ok(())
    }

    fn write_string(&self, out: &mut String, s: &str) {
        let quote = self.options.quote.char();
        out.push(quote);
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{8}' => out.push_str("\\b"),
                '\u{b}' => out.push_str("\\v"),
                '\u{c}' => out.push_str("\\f"),
                '\u{2028}' => out.push_str("\\u2028"),
                '\u{2029}' => out.push_str("\\u2029"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
        out.push(quote);
    }
}

/// Renders one expression with the given options.
pub fn render(expr: &ConstructorExpr, options: &RenderOptions) -> Result<String> {
    Renderer::new(options.clone())?.render(expr)
}

/// JavaScript source for a finite number; `None` for NaN and the infinities.
pub fn format_number(n: f64) -> Option<String> {
    if !n.is_finite() {
        return None;
    }
    if n == 0.0 {
        return Some(if n.is_sign_negative() { "-0" } else { "0" }.to_string());
    }
    // f64 Display is the shortest round-tripping decimal and never uses an
    // exponent, which JavaScript reads back to the same value.
    Some(format!("{}", n))
}
