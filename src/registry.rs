//! # Node Converter Registry
//!
//! The single source of truth for which node types are supported and how each
//! one maps onto its builder. Every supported ESTree tag is a [`NodeType`]
//! variant, and [`NodeType::signature`] is an exhaustive `match`, so a new
//! variant without a rule does not compile.
//!
//! Signatures follow the positional `build(...)` parameter lists of the
//! recast/ast-types builders. ESTree flags those builders do not take
//! positionally are appended after them.
//!
//! ## Registry Invariant
//! There is exactly one signature per node type. The converter, the renderer
//! and the interpreter all read arity and order from here and nowhere else.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// PARAMETER KINDS
// ============================================================================

/// How a builder parameter is read from the node and passed to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form string copied verbatim (identifier names).
    Name,
    /// String restricted to a closed keyword set (operators, kinds).
    Keyword(&'static [&'static str]),
    /// Boolean modifier; absent means `false`.
    Flag,
    /// Required nested node.
    Child,
    /// Nested node or explicit `null` in its slot.
    OptionalChild,
    /// Slot the builder signature still requires but ESTree parsers no
    /// longer emit (`CatchClause.guard`). Read like `OptionalChild`; the field
    /// is only materialized when it holds a node.
    LegacyChild,
    /// Array of nodes passed as one list argument.
    ChildList,
    /// Array of nodes where `null` entries are holes (`[a, , b]`).
    SparseList,
    /// The value of a `Literal` (string, number, boolean, null, regex, bigint).
    LiteralValue,
    /// The `{ cooked, raw }` record of a `TemplateElement`.
    TemplateValue,
}

impl ParamKind {
    /// Human readable description used in signature listings and errors.
    pub fn describe(&self) -> &'static str {
        match self {
            ParamKind::Name => "string",
            ParamKind::Keyword(_) => "keyword",
            ParamKind::Flag => "boolean",
            ParamKind::Child => "node",
            ParamKind::OptionalChild | ParamKind::LegacyChild => "node or null",
            ParamKind::ChildList => "node list",
            ParamKind::SparseList => "node list with holes",
            ParamKind::LiteralValue => "literal value",
            ParamKind::TemplateValue => "template value",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ParamKind::OptionalChild | ParamKind::LegacyChild)
    }
}

/// One positional builder parameter and the node field it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub field: &'static str,
    pub kind: ParamKind,
}

/// The conversion rule for one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub node_type: NodeType,
    /// Name of the builder function, e.g. `classDeclaration`.
    pub builder: &'static str,
    pub params: &'static [Param],
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.builder)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.field)?;
            match param.kind {
                ParamKind::OptionalChild | ParamKind::LegacyChild => write!(f, "?")?,
                ParamKind::ChildList | ParamKind::SparseList => write!(f, "[]")?,
                _ => {}
            }
        }
        write!(f, ")")
    }
}

// Struct literals keep the signature tables eligible for `'static` promotion.
macro_rules! p {
    ($field:literal, $kind:expr) => {
        Param {
            field: $field,
            kind: $kind,
        }
    };
}

// ============================================================================
// KEYWORD SETS
// ============================================================================

pub const DECLARATION_KINDS: &[&str] = &["var", "let", "const", "using", "await using"];
pub const PROPERTY_KINDS: &[&str] = &["init", "get", "set"];
pub const METHOD_KINDS: &[&str] = &["constructor", "method", "get", "set"];
pub const UNARY_OPERATORS: &[&str] = &["-", "+", "!", "~", "typeof", "void", "delete"];
pub const UPDATE_OPERATORS: &[&str] = &["++", "--"];
pub const BINARY_OPERATORS: &[&str] = &[
    "==", "!=", "===", "!==", "<", "<=", ">", ">=", "<<", ">>", ">>>", "+", "-", "*", "/", "%",
    "**", "|", "^", "&", "in", "instanceof",
];
pub const LOGICAL_OPERATORS: &[&str] = &["||", "&&", "??"];
pub const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "|=", "^=", "&=", "||=",
    "&&=", "??=",
];

// ============================================================================
// NODE TYPES
// ============================================================================

macro_rules! node_types {
    ($($variant:ident),* $(,)?) => {
        /// Every ESTree node type with a conversion rule.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum NodeType {
            $($variant),*
        }

        impl NodeType {
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant),*];

            /// The ESTree `type` tag.
            pub fn tag(self) -> &'static str {
                match self {
                    $(NodeType::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

node_types! {
    // expressions
    Identifier, Literal, ThisExpression, Super, ArrayExpression, ObjectExpression, Property,
    SpreadElement, FunctionExpression, ArrowFunctionExpression, ClassExpression,
    CallExpression, NewExpression, MemberExpression, ChainExpression, AssignmentExpression,
    LogicalExpression, BinaryExpression, ConditionalExpression, UnaryExpression,
    UpdateExpression, SequenceExpression, YieldExpression, AwaitExpression, TemplateLiteral,
    TemplateElement, TaggedTemplateExpression, MetaProperty, ImportExpression,
    // patterns
    RestElement, ArrayPattern, ObjectPattern, AssignmentPattern,
    // declarations
    FunctionDeclaration, ClassDeclaration, ClassBody, MethodDefinition, PropertyDefinition,
    StaticBlock, VariableDeclaration, VariableDeclarator,
    // modules
    ImportDeclaration, ImportSpecifier, ImportDefaultSpecifier, ImportNamespaceSpecifier,
    ExportDefaultDeclaration, ExportNamedDeclaration, ExportSpecifier, ExportAllDeclaration,
    // statements
    ExpressionStatement, BlockStatement, EmptyStatement, DebuggerStatement, ReturnStatement,
    ThrowStatement, BreakStatement, ContinueStatement, LabeledStatement, WithStatement,
    IfStatement, SwitchStatement, SwitchCase, ForStatement, ForInStatement, ForOfStatement,
    WhileStatement, DoWhileStatement, TryStatement, CatchClause,
}

static BY_TAG: Lazy<HashMap<&'static str, NodeType>> =
    Lazy::new(|| NodeType::ALL.iter().map(|t| (t.tag(), *t)).collect());

impl NodeType {
    /// Looks up a tag; `None` means the tag has no conversion rule.
    pub fn from_tag(tag: &str) -> Option<NodeType> {
        BY_TAG.get(tag).copied()
    }

    pub fn builder_name(self) -> &'static str {
        self.signature().builder
    }

    /// ESTree fields this node type may carry that no builder slot holds.
    ///
    /// They are accepted only while absent, `null` or empty; anything else
    /// would be lost in the builder call.
    pub fn unslotted_fields(self) -> &'static [&'static str] {
        use NodeType::*;

        match self {
            ImportDeclaration | ExportNamedDeclaration | ExportAllDeclaration => &["attributes"],
            ImportExpression => &["options"],
            _ => &[],
        }
    }

    /// The conversion rule for this node type.
    pub fn signature(self) -> Signature {
        use NodeType::*;
        use ParamKind::*;

        let (builder, params): (&'static str, &'static [Param]) = match self {
            Identifier => rule("identifier", &[p!("name", Name)]),
            Literal => rule("literal", &[p!("value", LiteralValue)]),
            ThisExpression => rule("thisExpression", &[]),
            Super => rule("super", &[]),
            ArrayExpression => rule("arrayExpression", &[p!("elements", SparseList)]),
            ObjectExpression => rule("objectExpression", &[p!("properties", ChildList)]),
            Property => rule(
                "property",
                &[
                    p!("kind", Keyword(PROPERTY_KINDS)),
                    p!("key", Child),
                    p!("value", Child),
                    p!("method", Flag),
                    p!("shorthand", Flag),
                    p!("computed", Flag),
                ],
            ),
            SpreadElement => rule("spreadElement", &[p!("argument", Child)]),
            FunctionExpression => rule("functionExpression", FUNCTION_PARAMS),
            ArrowFunctionExpression => rule(
                "arrowFunctionExpression",
                &[
                    p!("params", ChildList),
                    p!("body", Child),
                    p!("expression", Flag),
                    p!("async", Flag),
                ],
            ),
            ClassExpression => rule("classExpression", CLASS_PARAMS),
            CallExpression => rule(
                "callExpression",
                &[p!("callee", Child), p!("arguments", ChildList), p!("optional", Flag)],
            ),
            NewExpression => rule(
                "newExpression",
                &[p!("callee", Child), p!("arguments", ChildList)],
            ),
            MemberExpression => rule(
                "memberExpression",
                &[
                    p!("object", Child),
                    p!("property", Child),
                    p!("computed", Flag),
                    p!("optional", Flag),
                ],
            ),
            ChainExpression => rule("chainExpression", &[p!("expression", Child)]),
            AssignmentExpression => rule(
                "assignmentExpression",
                &[
                    p!("operator", Keyword(ASSIGNMENT_OPERATORS)),
                    p!("left", Child),
                    p!("right", Child),
                ],
            ),
            LogicalExpression => rule(
                "logicalExpression",
                &[
                    p!("operator", Keyword(LOGICAL_OPERATORS)),
                    p!("left", Child),
                    p!("right", Child),
                ],
            ),
            BinaryExpression => rule(
                "binaryExpression",
                &[
                    p!("operator", Keyword(BINARY_OPERATORS)),
                    p!("left", Child),
                    p!("right", Child),
                ],
            ),
            ConditionalExpression => rule(
                "conditionalExpression",
                &[p!("test", Child), p!("consequent", Child), p!("alternate", Child)],
            ),
            UnaryExpression => rule(
                "unaryExpression",
                &[
                    p!("operator", Keyword(UNARY_OPERATORS)),
                    p!("argument", Child),
                    p!("prefix", Flag),
                ],
            ),
            UpdateExpression => rule(
                "updateExpression",
                &[
                    p!("operator", Keyword(UPDATE_OPERATORS)),
                    p!("argument", Child),
                    p!("prefix", Flag),
                ],
            ),
            SequenceExpression => rule("sequenceExpression", &[p!("expressions", ChildList)]),
            YieldExpression => rule(
                "yieldExpression",
                &[p!("argument", OptionalChild), p!("delegate", Flag)],
            ),
            AwaitExpression => rule("awaitExpression", &[p!("argument", Child)]),
            TemplateLiteral => rule(
                "templateLiteral",
                &[p!("quasis", ChildList), p!("expressions", ChildList)],
            ),
            TemplateElement => rule(
                "templateElement",
                &[p!("value", TemplateValue), p!("tail", Flag)],
            ),
            TaggedTemplateExpression => rule(
                "taggedTemplateExpression",
                &[p!("tag", Child), p!("quasi", Child)],
            ),
            MetaProperty => rule("metaProperty", &[p!("meta", Child), p!("property", Child)]),
            ImportExpression => rule("importExpression", &[p!("source", Child)]),

            RestElement => rule("restElement", &[p!("argument", Child)]),
            ArrayPattern => rule("arrayPattern", &[p!("elements", SparseList)]),
            ObjectPattern => rule("objectPattern", &[p!("properties", ChildList)]),
            AssignmentPattern => rule(
                "assignmentPattern",
                &[p!("left", Child), p!("right", Child)],
            ),

            FunctionDeclaration => rule("functionDeclaration", FUNCTION_PARAMS),
            ClassDeclaration => rule("classDeclaration", CLASS_PARAMS),
            ClassBody => rule("classBody", &[p!("body", ChildList)]),
            MethodDefinition => rule(
                "methodDefinition",
                &[
                    p!("kind", Keyword(METHOD_KINDS)),
                    p!("key", Child),
                    p!("value", Child),
                    p!("static", Flag),
                    p!("computed", Flag),
                ],
            ),
            PropertyDefinition => rule(
                "propertyDefinition",
                &[
                    p!("key", Child),
                    p!("value", OptionalChild),
                    p!("computed", Flag),
                    p!("static", Flag),
                ],
            ),
            StaticBlock => rule("staticBlock", &[p!("body", ChildList)]),
            VariableDeclaration => rule(
                "variableDeclaration",
                &[
                    p!("kind", Keyword(DECLARATION_KINDS)),
                    p!("declarations", ChildList),
                ],
            ),
            VariableDeclarator => rule(
                "variableDeclarator",
                &[p!("id", Child), p!("init", OptionalChild)],
            ),

            ImportDeclaration => rule(
                "importDeclaration",
                &[p!("specifiers", ChildList), p!("source", Child)],
            ),
            ImportSpecifier => rule(
                "importSpecifier",
                &[p!("imported", Child), p!("local", Child)],
            ),
            ImportDefaultSpecifier => rule("importDefaultSpecifier", &[p!("local", Child)]),
            ImportNamespaceSpecifier => rule("importNamespaceSpecifier", &[p!("local", Child)]),
            ExportDefaultDeclaration => rule(
                "exportDefaultDeclaration",
                &[p!("declaration", Child)],
            ),
            ExportNamedDeclaration => rule(
                "exportNamedDeclaration",
                &[
                    p!("declaration", OptionalChild),
                    p!("specifiers", ChildList),
                    p!("source", OptionalChild),
                ],
            ),
            ExportSpecifier => rule(
                "exportSpecifier",
                &[p!("local", Child), p!("exported", Child)],
            ),
            ExportAllDeclaration => rule(
                "exportAllDeclaration",
                &[p!("source", Child), p!("exported", OptionalChild)],
            ),

            ExpressionStatement => rule("expressionStatement", &[p!("expression", Child)]),
            BlockStatement => rule("blockStatement", &[p!("body", ChildList)]),
            EmptyStatement => rule("emptyStatement", &[]),
            DebuggerStatement => rule("debuggerStatement", &[]),
            ReturnStatement => rule("returnStatement", &[p!("argument", OptionalChild)]),
            ThrowStatement => rule("throwStatement", &[p!("argument", Child)]),
            BreakStatement => rule("breakStatement", &[p!("label", OptionalChild)]),
            ContinueStatement => rule("continueStatement", &[p!("label", OptionalChild)]),
            LabeledStatement => rule(
                "labeledStatement",
                &[p!("label", Child), p!("body", Child)],
            ),
            WithStatement => rule("withStatement", &[p!("object", Child), p!("body", Child)]),
            IfStatement => rule(
                "ifStatement",
                &[
                    p!("test", Child),
                    p!("consequent", Child),
                    p!("alternate", OptionalChild),
                ],
            ),
            SwitchStatement => rule(
                "switchStatement",
                &[p!("discriminant", Child), p!("cases", ChildList)],
            ),
            SwitchCase => rule(
                "switchCase",
                &[p!("test", OptionalChild), p!("consequent", ChildList)],
            ),
            ForStatement => rule(
                "forStatement",
                &[
                    p!("init", OptionalChild),
                    p!("test", OptionalChild),
                    p!("update", OptionalChild),
                    p!("body", Child),
                ],
            ),
            ForInStatement => rule(
                "forInStatement",
                &[p!("left", Child), p!("right", Child), p!("body", Child)],
            ),
            ForOfStatement => rule(
                "forOfStatement",
                &[
                    p!("left", Child),
                    p!("right", Child),
                    p!("body", Child),
                    p!("await", Flag),
                ],
            ),
            WhileStatement => rule("whileStatement", &[p!("test", Child), p!("body", Child)]),
            DoWhileStatement => rule("doWhileStatement", &[p!("body", Child), p!("test", Child)]),
            TryStatement => rule(
                "tryStatement",
                &[
                    p!("block", Child),
                    p!("handler", OptionalChild),
                    p!("finalizer", OptionalChild),
                ],
            ),
            CatchClause => rule(
                "catchClause",
                &[
                    p!("param", OptionalChild),
                    p!("guard", LegacyChild),
                    p!("body", Child),
                ],
            ),
        };

        Signature {
            node_type: self,
            builder,
            params,
        }
    }
}

fn rule(builder: &'static str, params: &'static [Param]) -> (&'static str, &'static [Param]) {
    (builder, params)
}

const FUNCTION_PARAMS: &[Param] = &[
    p!("id", ParamKind::OptionalChild),
    p!("params", ParamKind::ChildList),
    p!("body", ParamKind::Child),
    p!("generator", ParamKind::Flag),
    p!("expression", ParamKind::Flag),
    p!("async", ParamKind::Flag),
];

const CLASS_PARAMS: &[Param] = &[
    p!("id", ParamKind::OptionalChild),
    p!("body", ParamKind::Child),
    p!("superClass", ParamKind::OptionalChild),
];

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// All signatures, in declaration order of [`NodeType`].
pub fn signatures() -> impl Iterator<Item = Signature> {
    NodeType::ALL.iter().map(|t| t.signature())
}
