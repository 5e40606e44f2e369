// tests/convert_tests.rs

use std::fs;
use std::path::PathBuf;

use ast_builder::ast::builders::*;
use ast_builder::errors::ErrorKind;
use ast_builder::{build_ast, render, Arg, LiteralValue, NodeType, RenderOptions};
use serde_json::{json, Value};

fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));
    let text = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn rendered(program: &Value) -> Vec<String> {
    build_ast(program)
        .unwrap()
        .iter()
        .map(|e| render(e, &RenderOptions::default()).unwrap())
        .collect()
}

fn program(body: Value) -> Value {
    json!({ "type": "Program", "body": body, "sourceType": "module" })
}

// ---
// Scenarios
// ---

#[test]
fn test_empty_class_declaration() {
    let lines = rendered(&fixture("classDeclaration"));
    assert_eq!(
        lines[0],
        "j.classDeclaration(j.identifier('A'), j.classBody([]), null)"
    );
}

#[test]
fn test_const_declaration() {
    let lines = rendered(&fixture("variableDeclaration"));
    assert_eq!(
        lines[0],
        "j.variableDeclaration('const', [j.variableDeclarator(j.identifier('x'), j.literal(1))])"
    );
    assert_eq!(
        lines[1],
        "j.variableDeclaration('let', [j.variableDeclarator(j.identifier('a'), null), \
         j.variableDeclarator(j.identifier('b'), j.literal('b'))])"
    );
}

#[test]
fn test_named_imports() {
    let exprs = build_ast(&fixture("importStatement")).unwrap();
    assert_eq!(
        exprs,
        vec![import_declaration(
            vec![
                import_specifier(identifier("a"), identifier("a")),
                import_specifier(identifier("b"), identifier("b")),
            ],
            string_literal("m"),
        )]
    );
    assert_eq!(
        render(&exprs[0], &RenderOptions::default()).unwrap(),
        "j.importDeclaration([j.importSpecifier(j.identifier('a'), j.identifier('a')), \
         j.importSpecifier(j.identifier('b'), j.identifier('b'))], j.literal('m'))"
    );
}

#[test]
fn test_member_chain_call() {
    let lines = rendered(&fixture("callExpression"));
    assert_eq!(
        lines[0],
        "j.expressionStatement(j.callExpression(j.memberExpression(j.memberExpression(\
         j.identifier('a'), j.identifier('b'), false, false), j.identifier('c'), false, false), \
         [], false))"
    );
}

#[test]
fn test_literal_forms() {
    let lines = rendered(&fixture("literal"));
    let values: Vec<_> = lines
        .iter()
        .map(|l| {
            l.trim_start_matches("j.expressionStatement(j.literal(")
                .trim_end_matches("))")
                .to_string()
        })
        .collect();
    assert_eq!(
        values,
        [
            "'hello'",
            "42",
            "1.5",
            "true",
            "null",
            "/ab+c/gi",
            "123n",
            r#"'it\'s "quoted"\n'"#,
        ]
    );
}

#[test]
fn test_switch_default_case_has_null_test() {
    let exprs = build_ast(&fixture("switch")).unwrap();
    let cases = match exprs[0].arg("cases") {
        Some(Arg::List(cases)) => cases,
        other => panic!("expected a case list, got {other:?}"),
    };
    assert_eq!(cases.len(), 3);
    let Arg::Node(default_case) = &cases[2] else {
        panic!("expected a node");
    };
    assert_eq!(default_case.node_type(), NodeType::SwitchCase);
    assert_eq!(default_case.arg("test"), Some(&Arg::Null));
}

#[test]
fn test_flags_round_trip_exactly() {
    let exprs = build_ast(&fixture("functionDeclaration")).unwrap();
    assert_eq!(exprs[1].arg("generator"), Some(&Arg::Bool(true)));
    assert_eq!(exprs[1].arg("async"), Some(&Arg::Bool(false)));
    assert_eq!(exprs[2].arg("async"), Some(&Arg::Bool(true)));

    let exprs = build_ast(&fixture("classDeclaration")).unwrap();
    let lines = render(&exprs[1], &RenderOptions::default()).unwrap();
    assert!(lines.contains("j.methodDefinition('method', j.identifier('create')"));
    assert!(lines.contains("true, false)"), "static method flag lost: {lines}");
}

#[test]
fn test_regex_literal_value() {
    let exprs = build_ast(&fixture("literal")).unwrap();
    let Some(Arg::Node(lit)) = exprs[5].arg("expression") else {
        panic!("expected a literal");
    };
    assert_eq!(
        lit.arg("value"),
        Some(&Arg::Literal(LiteralValue::RegExp {
            pattern: "ab+c".into(),
            flags: "gi".into()
        }))
    );
}

// ---
// Failures
// ---

#[test]
fn test_unsupported_node_type_names_tag_and_path() {
    let input = program(json!([
        { "type": "EmptyStatement" },
        {
            "type": "VariableDeclaration", "kind": "const",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": { "type": "Identifier", "name": "el" },
                "init": { "type": "JSXElement", "openingElement": null, "children": [] }
            }]
        }
    ]));
    let err = build_ast(&input).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnsupportedNodeType {
            tag: "JSXElement".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "unsupported node type 'JSXElement' at body[1].declarations[0].init"
    );
}

#[test]
fn test_malformed_node_reports_acorn_location() {
    // A call without a callee only comes from a hand-edited tree.
    let input = program(json!([{
        "type": "ExpressionStatement", "start": 0, "end": 7,
        "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 7 } },
        "expression": {
            "type": "CallExpression", "start": 0, "end": 6,
            "loc": { "start": { "line": 2, "column": 4 }, "end": { "line": 2, "column": 10 } },
            "arguments": [],
            "optional": false
        }
    }]));
    let err = build_ast(&input).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedNode { .. }));
    assert_eq!(
        err.to_string(),
        "malformed CallExpression node: missing field `callee` at body[0].expression (line 2, column 4)"
    );
}

#[test]
fn test_import_attributes_fail_instead_of_vanishing() {
    let input = program(json!([
        { "type": "EmptyStatement" },
        {
            "type": "ImportDeclaration", "start": 1, "end": 52,
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
        }
    ]));
    let err = build_ast(&input).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedNode { .. }));
    assert_eq!(
        err.to_string(),
        "malformed ImportDeclaration node: `attributes` is set but importDeclaration \
         has no slot for it at body[1]"
    );
}

#[test]
fn test_vacant_import_attributes_convert() {
    let lines = rendered(&fixture("importExpression"));
    assert_eq!(
        lines[0],
        "j.importDeclaration([j.importSpecifier(j.identifier('load'), j.identifier('load'))], \
         j.literal('./loader.js'))"
    );
    assert_eq!(
        lines[2],
        "j.variableDeclaration('const', [j.variableDeclarator(j.identifier('mod'), \
         j.awaitExpression(j.importExpression(j.literal('./mod.js'))))])"
    );
}

#[test]
fn test_diagnostic_points_into_attached_source() {
    use miette::Diagnostic;

    let input = program(json!([{
        "type": "ExpressionStatement", "start": 0, "end": 6,
        "expression": { "type": "Decorator", "start": 0, "end": 4 }
    }]));
    let err = build_ast(&input)
        .unwrap_err()
        .with_source("input.js", "@dec;\n");
    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 0);
    assert_eq!(labels[0].len(), 4);
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("ast_builder::convert::unsupported_node_type")
    );
}

#[test]
fn test_hand_built_expressions_render_like_converted_ones() {
    let built = expression_statement(call_expression(
        member_expression(
            member_expression(identifier("a"), identifier("b"), false, false),
            identifier("c"),
            false,
            false,
        ),
        vec![],
        false,
    ));
    let converted = build_ast(&fixture("callExpression")).unwrap();
    assert_eq!(converted[0], built);
}
