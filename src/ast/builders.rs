//! Hand-callable constructor-expression builders, one per node type.
//!
//! Each function takes its arguments in the order of the node type's
//! signature in [`crate::registry`] and always produces an expression that
//! passes [`ConstructorExpr::check_signature`], provided keyword arguments
//! (operators, kinds) are valid for their slot.
//!
//! ```rust
//! use ast_builder::ast::builders::*;
//! let stmt = expression_statement(call_expression(identifier("f"), vec![], false));
//! assert!(stmt.check_signature().is_ok());
//! ```

use super::{Arg, ConstructorExpr, LiteralValue};
use crate::registry::NodeType;

type E = ConstructorExpr;

fn build(node_type: NodeType, args: Vec<Arg>) -> E {
    ConstructorExpr::new(node_type, args)
}

fn s(text: &str) -> Arg {
    Arg::Str(text.to_string())
}

fn sparse(items: Vec<Option<E>>) -> Arg {
    Arg::List(items.into_iter().map(Arg::optional).collect())
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

pub fn identifier(name: &str) -> E {
    build(NodeType::Identifier, vec![s(name)])
}

pub fn literal(value: LiteralValue) -> E {
    build(NodeType::Literal, vec![Arg::Literal(value)])
}

/// Shorthand for a string `literal`.
pub fn string_literal(value: &str) -> E {
    literal(LiteralValue::String(value.to_string()))
}

/// Shorthand for a numeric `literal`.
pub fn number_literal(value: f64) -> E {
    literal(LiteralValue::Number(value))
}

pub fn this_expression() -> E {
    build(NodeType::ThisExpression, vec![])
}

pub fn super_() -> E {
    build(NodeType::Super, vec![])
}

pub fn array_expression(elements: Vec<Option<E>>) -> E {
    build(NodeType::ArrayExpression, vec![sparse(elements)])
}

pub fn object_expression(properties: Vec<E>) -> E {
    build(NodeType::ObjectExpression, vec![Arg::list(properties)])
}

pub fn property(kind: &str, key: E, value: E, method: bool, shorthand: bool, computed: bool) -> E {
    build(
        NodeType::Property,
        vec![
            s(kind),
            Arg::node(key),
            Arg::node(value),
            Arg::Bool(method),
            Arg::Bool(shorthand),
            Arg::Bool(computed),
        ],
    )
}

pub fn spread_element(argument: E) -> E {
    build(NodeType::SpreadElement, vec![Arg::node(argument)])
}

pub fn function_expression(
    id: Option<E>,
    params: Vec<E>,
    body: E,
    generator: bool,
    expression: bool,
    is_async: bool,
) -> E {
    build(
        NodeType::FunctionExpression,
        function_args(id, params, body, generator, expression, is_async),
    )
}

pub fn arrow_function_expression(params: Vec<E>, body: E, expression: bool, is_async: bool) -> E {
    build(
        NodeType::ArrowFunctionExpression,
        vec![
            Arg::list(params),
            Arg::node(body),
            Arg::Bool(expression),
            Arg::Bool(is_async),
        ],
    )
}

pub fn class_expression(id: Option<E>, body: E, super_class: Option<E>) -> E {
    build(
        NodeType::ClassExpression,
        vec![Arg::optional(id), Arg::node(body), Arg::optional(super_class)],
    )
}

pub fn call_expression(callee: E, arguments: Vec<E>, optional: bool) -> E {
    build(
        NodeType::CallExpression,
        vec![Arg::node(callee), Arg::list(arguments), Arg::Bool(optional)],
    )
}

pub fn new_expression(callee: E, arguments: Vec<E>) -> E {
    build(
        NodeType::NewExpression,
        vec![Arg::node(callee), Arg::list(arguments)],
    )
}

pub fn member_expression(object: E, property: E, computed: bool, optional: bool) -> E {
    build(
        NodeType::MemberExpression,
        vec![
            Arg::node(object),
            Arg::node(property),
            Arg::Bool(computed),
            Arg::Bool(optional),
        ],
    )
}

pub fn chain_expression(expression: E) -> E {
    build(NodeType::ChainExpression, vec![Arg::node(expression)])
}

pub fn assignment_expression(operator: &str, left: E, right: E) -> E {
    build(
        NodeType::AssignmentExpression,
        vec![s(operator), Arg::node(left), Arg::node(right)],
    )
}

pub fn logical_expression(operator: &str, left: E, right: E) -> E {
    build(
        NodeType::LogicalExpression,
        vec![s(operator), Arg::node(left), Arg::node(right)],
    )
}

pub fn binary_expression(operator: &str, left: E, right: E) -> E {
    build(
        NodeType::BinaryExpression,
        vec![s(operator), Arg::node(left), Arg::node(right)],
    )
}

pub fn conditional_expression(test: E, consequent: E, alternate: E) -> E {
    build(
        NodeType::ConditionalExpression,
        vec![Arg::node(test), Arg::node(consequent), Arg::node(alternate)],
    )
}

pub fn unary_expression(operator: &str, argument: E, prefix: bool) -> E {
    build(
        NodeType::UnaryExpression,
        vec![s(operator), Arg::node(argument), Arg::Bool(prefix)],
    )
}

pub fn update_expression(operator: &str, argument: E, prefix: bool) -> E {
    build(
        NodeType::UpdateExpression,
        vec![s(operator), Arg::node(argument), Arg::Bool(prefix)],
    )
}

pub fn sequence_expression(expressions: Vec<E>) -> E {
    build(NodeType::SequenceExpression, vec![Arg::list(expressions)])
}

pub fn yield_expression(argument: Option<E>, delegate: bool) -> E {
    build(
        NodeType::YieldExpression,
        vec![Arg::optional(argument), Arg::Bool(delegate)],
    )
}

pub fn await_expression(argument: E) -> E {
    build(NodeType::AwaitExpression, vec![Arg::node(argument)])
}

pub fn template_literal(quasis: Vec<E>, expressions: Vec<E>) -> E {
    build(
        NodeType::TemplateLiteral,
        vec![Arg::list(quasis), Arg::list(expressions)],
    )
}

pub fn template_element(cooked: Option<&str>, raw: &str, tail: bool) -> E {
    build(
        NodeType::TemplateElement,
        vec![
            Arg::Template {
                cooked: cooked.map(str::to_string),
                raw: raw.to_string(),
            },
            Arg::Bool(tail),
        ],
    )
}

pub fn tagged_template_expression(tag: E, quasi: E) -> E {
    build(
        NodeType::TaggedTemplateExpression,
        vec![Arg::node(tag), Arg::node(quasi)],
    )
}

pub fn meta_property(meta: E, property: E) -> E {
    build(
        NodeType::MetaProperty,
        vec![Arg::node(meta), Arg::node(property)],
    )
}

pub fn import_expression(source: E) -> E {
    build(NodeType::ImportExpression, vec![Arg::node(source)])
}

// ----------------------------------------------------------------------------
// Patterns
// ----------------------------------------------------------------------------

pub fn rest_element(argument: E) -> E {
    build(NodeType::RestElement, vec![Arg::node(argument)])
}

pub fn array_pattern(elements: Vec<Option<E>>) -> E {
    build(NodeType::ArrayPattern, vec![sparse(elements)])
}

pub fn object_pattern(properties: Vec<E>) -> E {
    build(NodeType::ObjectPattern, vec![Arg::list(properties)])
}

pub fn assignment_pattern(left: E, right: E) -> E {
    build(
        NodeType::AssignmentPattern,
        vec![Arg::node(left), Arg::node(right)],
    )
}

// ----------------------------------------------------------------------------
// Declarations
// ----------------------------------------------------------------------------

pub fn function_declaration(
    id: Option<E>,
    params: Vec<E>,
    body: E,
    generator: bool,
    expression: bool,
    is_async: bool,
) -> E {
    build(
        NodeType::FunctionDeclaration,
        function_args(id, params, body, generator, expression, is_async),
    )
}

fn function_args(
    id: Option<E>,
    params: Vec<E>,
    body: E,
    generator: bool,
    expression: bool,
    is_async: bool,
) -> Vec<Arg> {
    vec![
        Arg::optional(id),
        Arg::list(params),
        Arg::node(body),
        Arg::Bool(generator),
        Arg::Bool(expression),
        Arg::Bool(is_async),
    ]
}

pub fn class_declaration(id: Option<E>, body: E, super_class: Option<E>) -> E {
    build(
        NodeType::ClassDeclaration,
        vec![Arg::optional(id), Arg::node(body), Arg::optional(super_class)],
    )
}

pub fn class_body(body: Vec<E>) -> E {
    build(NodeType::ClassBody, vec![Arg::list(body)])
}

pub fn method_definition(kind: &str, key: E, value: E, is_static: bool, computed: bool) -> E {
    build(
        NodeType::MethodDefinition,
        vec![
            s(kind),
            Arg::node(key),
            Arg::node(value),
            Arg::Bool(is_static),
            Arg::Bool(computed),
        ],
    )
}

pub fn property_definition(key: E, value: Option<E>, computed: bool, is_static: bool) -> E {
    build(
        NodeType::PropertyDefinition,
        vec![
            Arg::node(key),
            Arg::optional(value),
            Arg::Bool(computed),
            Arg::Bool(is_static),
        ],
    )
}

pub fn static_block(body: Vec<E>) -> E {
    build(NodeType::StaticBlock, vec![Arg::list(body)])
}

pub fn variable_declaration(kind: &str, declarations: Vec<E>) -> E {
    build(
        NodeType::VariableDeclaration,
        vec![s(kind), Arg::list(declarations)],
    )
}

pub fn variable_declarator(id: E, init: Option<E>) -> E {
    build(
        NodeType::VariableDeclarator,
        vec![Arg::node(id), Arg::optional(init)],
    )
}

// ----------------------------------------------------------------------------
// Modules
// ----------------------------------------------------------------------------

pub fn import_declaration(specifiers: Vec<E>, source: E) -> E {
    build(
        NodeType::ImportDeclaration,
        vec![Arg::list(specifiers), Arg::node(source)],
    )
}

pub fn import_specifier(imported: E, local: E) -> E {
    build(
        NodeType::ImportSpecifier,
        vec![Arg::node(imported), Arg::node(local)],
    )
}

pub fn import_default_specifier(local: E) -> E {
    build(NodeType::ImportDefaultSpecifier, vec![Arg::node(local)])
}

pub fn import_namespace_specifier(local: E) -> E {
    build(NodeType::ImportNamespaceSpecifier, vec![Arg::node(local)])
}

pub fn export_default_declaration(declaration: E) -> E {
    build(NodeType::ExportDefaultDeclaration, vec![Arg::node(declaration)])
}

pub fn export_named_declaration(declaration: Option<E>, specifiers: Vec<E>, source: Option<E>) -> E {
    build(
        NodeType::ExportNamedDeclaration,
        vec![
            Arg::optional(declaration),
            Arg::list(specifiers),
            Arg::optional(source),
        ],
    )
}

pub fn export_specifier(local: E, exported: E) -> E {
    build(
        NodeType::ExportSpecifier,
        vec![Arg::node(local), Arg::node(exported)],
    )
}

pub fn export_all_declaration(source: E, exported: Option<E>) -> E {
    build(
        NodeType::ExportAllDeclaration,
        vec![Arg::node(source), Arg::optional(exported)],
    )
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

pub fn expression_statement(expression: E) -> E {
    build(NodeType::ExpressionStatement, vec![Arg::node(expression)])
}

pub fn block_statement(body: Vec<E>) -> E {
    build(NodeType::BlockStatement, vec![Arg::list(body)])
}

pub fn empty_statement() -> E {
    build(NodeType::EmptyStatement, vec![])
}

pub fn debugger_statement() -> E {
    build(NodeType::DebuggerStatement, vec![])
}

pub fn return_statement(argument: Option<E>) -> E {
    build(NodeType::ReturnStatement, vec![Arg::optional(argument)])
}

pub fn throw_statement(argument: E) -> E {
    build(NodeType::ThrowStatement, vec![Arg::node(argument)])
}

pub fn break_statement(label: Option<E>) -> E {
    build(NodeType::BreakStatement, vec![Arg::optional(label)])
}

pub fn continue_statement(label: Option<E>) -> E {
    build(NodeType::ContinueStatement, vec![Arg::optional(label)])
}

pub fn labeled_statement(label: E, body: E) -> E {
    build(
        NodeType::LabeledStatement,
        vec![Arg::node(label), Arg::node(body)],
    )
}

pub fn with_statement(object: E, body: E) -> E {
    build(
        NodeType::WithStatement,
        vec![Arg::node(object), Arg::node(body)],
    )
}

pub fn if_statement(test: E, consequent: E, alternate: Option<E>) -> E {
    build(
        NodeType::IfStatement,
        vec![Arg::node(test), Arg::node(consequent), Arg::optional(alternate)],
    )
}

pub fn switch_statement(discriminant: E, cases: Vec<E>) -> E {
    build(
        NodeType::SwitchStatement,
        vec![Arg::node(discriminant), Arg::list(cases)],
    )
}

/// `test` is `None` for the `default:` case.
pub fn switch_case(test: Option<E>, consequent: Vec<E>) -> E {
    build(
        NodeType::SwitchCase,
        vec![Arg::optional(test), Arg::list(consequent)],
    )
}

pub fn for_statement(init: Option<E>, test: Option<E>, update: Option<E>, body: E) -> E {
    build(
        NodeType::ForStatement,
        vec![
            Arg::optional(init),
            Arg::optional(test),
            Arg::optional(update),
            Arg::node(body),
        ],
    )
}

pub fn for_in_statement(left: E, right: E, body: E) -> E {
    build(
        NodeType::ForInStatement,
        vec![Arg::node(left), Arg::node(right), Arg::node(body)],
    )
}

pub fn for_of_statement(left: E, right: E, body: E, is_await: bool) -> E {
    build(
        NodeType::ForOfStatement,
        vec![
            Arg::node(left),
            Arg::node(right),
            Arg::node(body),
            Arg::Bool(is_await),
        ],
    )
}

pub fn while_statement(test: E, body: E) -> E {
    build(
        NodeType::WhileStatement,
        vec![Arg::node(test), Arg::node(body)],
    )
}

pub fn do_while_statement(body: E, test: E) -> E {
    build(
        NodeType::DoWhileStatement,
        vec![Arg::node(body), Arg::node(test)],
    )
}

pub fn try_statement(block: E, handler: Option<E>, finalizer: Option<E>) -> E {
    build(
        NodeType::TryStatement,
        vec![
            Arg::node(block),
            Arg::optional(handler),
            Arg::optional(finalizer),
        ],
    )
}

/// The `guard` slot is always empty; ESTree has no catch guards.
pub fn catch_clause(param: Option<E>, body: E) -> E {
    build(
        NodeType::CatchClause,
        vec![Arg::optional(param), Arg::Null, Arg::node(body)],
    )
}
