//! # ast-builder
//!
//! Converts a parsed JavaScript program (ESTree JSON) into the builder calls
//! that would construct it, one [`ConstructorExpr`] per top-level statement.
//!
//! ```rust
//! use ast_builder::{build_ast, render, RenderOptions};
//! use serde_json::json;
//!
//! let program = json!({
//!     "type": "Program",
//!     "body": [{
//!         "type": "ClassDeclaration",
//!         "id": { "type": "Identifier", "name": "A" },
//!         "superClass": null,
//!         "body": { "type": "ClassBody", "body": [] }
//!     }]
//! });
//! let exprs = build_ast(&program).unwrap();
//! assert_eq!(
//!     render(&exprs[0], &RenderOptions::default()).unwrap(),
//!     "j.classDeclaration(j.identifier('A'), j.classBody([]), null)"
//! );
//! ```
//!
//! The expressions can be rendered to text ([`render`]) or evaluated directly
//! against a [`BuilderSet`] ([`evaluate`]); [`EstreeBuilders`] rebuilds the
//! ESTree JSON.

pub mod ast;
pub mod cli;
pub mod config;
pub mod convert;
pub mod engine;
pub mod errors;
pub mod estree;
pub mod interp;
pub mod registry;
pub mod render;

pub use crate::ast::{Arg, ConstructorExpr, LiteralValue};
pub use crate::convert::convert;
pub use crate::engine::{build_ast, build_ast_from_str};
pub use crate::errors::{AstError, ErrorKind, Result};
pub use crate::interp::{evaluate, evaluate_all, BuilderSet, EstreeBuilders, Evaluated};
pub use crate::registry::{NodeType, Signature};
pub use crate::render::{render, QuoteStyle, RenderOptions, Renderer};
