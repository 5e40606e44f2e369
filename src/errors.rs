//! ast-builder error handling - unified encapsulated API
//!
//! Every failure in the pipeline (conversion, rendering, interpretation, input
//! loading) is an [`AstError`]. The kind says what went wrong, the location says
//! where in the input tree it happened, and the diagnostic info carries the code
//! and help text surfaced through `miette`.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::estree::{NodePath, Position};

// ============================================================================
// ERROR KINDS
// ============================================================================

/// All error types as a clean enum - no duplicate fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// The node's `type` tag has no conversion rule.
    #[error("unsupported node type '{tag}'")]
    UnsupportedNodeType { tag: String },

    /// A recognized node whose fields do not have the expected shape.
    #[error("malformed {node_type} node: {reason}")]
    MalformedNode { node_type: String, reason: String },

    /// A constructor expression that cannot be printed as valid builder source.
    #[error("cannot render {builder}: {reason}")]
    RenderError { builder: String, reason: String },

    /// Arguments that do not fit the builder signature they were handed to.
    #[error("{builder} expects {expected}, got {actual}")]
    SignatureMismatch {
        builder: String,
        expected: String,
        actual: String,
    },

    /// The top-level input is not something the transducer can walk.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedNodeType { .. } | Self::MalformedNode { .. } => {
                ErrorCategory::Convert
            }
            Self::RenderError { .. } => ErrorCategory::Render,
            Self::SignatureMismatch { .. } => ErrorCategory::Interpret,
            Self::InvalidInput { .. } => ErrorCategory::Input,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnsupportedNodeType { .. } => "unsupported_node_type",
            Self::MalformedNode { .. } => "malformed_node",
            Self::RenderError { .. } => "render_error",
            Self::SignatureMismatch { .. } => "signature_mismatch",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::UnsupportedNodeType { .. } => "no builder for this node",
            Self::MalformedNode { .. } => "malformed node",
            Self::RenderError { .. } => "cannot be rendered",
            Self::SignatureMismatch { .. } => "signature mismatch",
            Self::InvalidInput { .. } => "invalid input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Convert,
    Render,
    Interpret,
    Input,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Convert => "convert",
            ErrorCategory::Render => "render",
            ErrorCategory::Interpret => "interpret",
            ErrorCategory::Input => "input",
        }
    }
}

// ============================================================================
// THE ERROR TYPE
// ============================================================================

/// The single error type of the crate.
#[derive(Debug, Clone)]
pub struct AstError {
    /// What went wrong (type-specific data)
    pub kind: ErrorKind,
    /// Where it happened in the input tree
    pub location: ErrorLocation,
    /// How to help (auto-populated from the kind)
    pub diagnostic_info: DiagnosticInfo,
}

/// Tree and source coordinates of the offending node.
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Structural path from the nearest top-level statement.
    pub path: Option<NodePath>,
    /// Position recorded on the node by the parser, if any.
    pub position: Option<Position>,
    /// Source text attached by the caller for labelled output.
    pub source: Option<Arc<NamedSource<String>>>,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

pub type Result<T> = std::result::Result<T, AstError>;

impl AstError {
    pub fn new(kind: ErrorKind) -> Self {
        let error_code = format!(
            "ast_builder::{}::{}",
            kind.category().as_str(),
            kind.code_suffix()
        );
        let help = default_help(&kind);
        Self {
            kind,
            location: ErrorLocation::default(),
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }

    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedNodeType { tag: tag.into() })
    }

    pub fn malformed(node_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedNode {
            node_type: node_type.into(),
            reason: reason.into(),
        })
    }

    pub fn render(builder: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderError {
            builder: builder.into(),
            reason: reason.into(),
        })
    }

    pub fn signature_mismatch(
        builder: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::SignatureMismatch {
            builder: builder.into(),
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput {
            message: message.into(),
        })
    }

    /// Records where the error happened. The innermost path wins, so outer
    /// frames can call this unconditionally while unwinding.
    pub fn at_path(mut self, path: NodePath) -> Self {
        if self.location.path.is_none() {
            self.location.path = Some(path);
        }
        self
    }

    pub fn at_position(mut self, position: Option<Position>) -> Self {
        if self.location.position.is_none() {
            self.location.position = position;
        }
        self
    }

    /// Attaches the program's source text so the report can point into it.
    pub fn with_source(mut self, name: impl AsRef<str>, text: impl Into<String>) -> Self {
        self.location.source = Some(Arc::new(NamedSource::new(name, text.into())));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    /// The type tag of the offending node, when the error concerns one.
    pub fn node_type(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::UnsupportedNodeType { tag } => Some(tag),
            ErrorKind::MalformedNode { node_type, .. } => Some(node_type),
            ErrorKind::RenderError { builder, .. }
            | ErrorKind::SignatureMismatch { builder, .. } => Some(builder),
            ErrorKind::InvalidInput { .. } => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

fn default_help(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::UnsupportedNodeType { .. } => {
            Some("run `ast-builder builders` to list the supported node types".into())
        }
        ErrorKind::RenderError { .. } | ErrorKind::SignatureMismatch { .. } => Some(
            "hand-built expressions must follow the builder signature exactly".into(),
        ),
        ErrorKind::InvalidInput { .. } => {
            Some("expected ESTree JSON for a Program (or a File wrapping one)".into())
        }
        ErrorKind::MalformedNode { .. } => None,
    }
}

impl std::error::Error for AstError {}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(path) = &self.location.path {
            if !path.is_empty() {
                write!(f, " at {}", path)?;
            }
        }
        if let Some(Position {
            line: Some(line),
            column: Some(column),
            ..
        }) = &self.location.position
        {
            write!(f, " (line {}, column {})", line, column)?;
        }
        Ok(())
    }
}

impl Diagnostic for AstError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // Labels only make sense when there is text to point into.
        self.location.source.as_ref()?;
        let span = self.location.position.as_ref()?.span?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.location
            .source
            .as_ref()
            .map(|s| &**s as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Converts a byte range recorded on a node into a miette span.
pub fn to_source_span(start: usize, end: usize) -> SourceSpan {
    SourceSpan::from(start..end.max(start))
}

/// Prints an AstError with full miette diagnostics
///
/// Use this for user-facing error display in CLI contexts.
pub fn print_error(error: AstError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
