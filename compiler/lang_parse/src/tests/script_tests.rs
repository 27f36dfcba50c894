//! Tests for statements, assignments and function definitions.

use lang_ir::{Node, NodeKind, Operator, Parameter, ParameterKind, ParsingError};
use pretty_assertions::assert_eq;

use crate::parse;

fn assign(lvalue: Node, rvalue: Node) -> Node {
    Node::assignment(lvalue, rvalue)
}

fn var(name: &str) -> Node {
    Node::variable(name)
}

fn errors(nodes: &[Node]) -> Vec<ParsingError> {
    nodes
        .iter()
        .flat_map(Node::walk)
        .filter_map(|node| match node {
            Node::ParsingError(error) => Some(error.error),
            _ => None,
        })
        .collect()
}

#[test]
fn test_assignments() {
    assert_eq!(
        parse("$a = 5\n$b = 2\n$c = $a / $b"),
        vec![
            assign(var("$a"), Node::Int(5)),
            assign(var("$b"), Node::Int(2)),
            assign(
                var("$c"),
                Node::binary(
                    Operator::Div,
                    Node::unprocessed_variable("$a"),
                    Node::unprocessed_variable("$b")
                )
            ),
        ]
    );
}

#[test]
fn test_empty_assignment_is_void() {
    assert_eq!(parse("$a ="), vec![assign(var("$a"), Node::Void)]);
}

#[test]
fn test_compound_assignment() {
    assert_eq!(
        parse("$a += 2"),
        vec![assign(
            var("$a"),
            Node::binary(Operator::Add, var("$a"), Node::Int(2))
        )]
    );
    assert_eq!(
        parse("$a ??= x"),
        vec![assign(
            var("$a"),
            Node::binary(Operator::NullCoalescing, var("$a"), Node::text("x"))
        )]
    );
}

#[test]
fn test_indexed_assignment() {
    assert_eq!(
        parse("&list[1] = x"),
        vec![assign(
            Node::binary(Operator::GetItem, var("&list"), Node::Int(1)),
            Node::text("x")
        )]
    );
}

#[test]
fn test_pointer_assignment() {
    assert_eq!(parse("$*p = 3"), vec![assign(var("$*p"), Node::Int(3))]);
}

#[test]
fn test_translation_assignment_is_plain_text() {
    assert_eq!(
        parse("lang.greeting = Hello\\s$name + 1"),
        vec![assign(
            Node::text("lang.greeting"),
            Node::List(vec![
                Node::text("Hello"),
                Node::EscapeSequence('s'),
                Node::text("$name + 1"),
            ])
        )]
    );
}

#[test]
fn test_invalid_assignment_target() {
    assert_eq!(errors(&parse("func.println = 5")), vec![ParsingError::InvalidAssignment]);
    assert_eq!(errors(&parse("$a b = 5")), vec![ParsingError::InvalidAssignment]);
}

#[test]
fn test_comparison_is_not_assignment() {
    let nodes = parse("$a == 1");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Operation);
}

#[test]
fn test_function_definition_with_colon_separator() {
    assert_eq!(
        parse("fp.f = (\n) : {\n return 42\n}\n$x = f()"),
        vec![
            assign(
                var("fp.f"),
                Node::function_definition(
                    vec![],
                    vec![Node::Return(Some(Box::new(Node::Int(42))))]
                )
            ),
            assign(var("$x"), Node::function_call("f", vec![])),
        ]
    );
}

#[test]
fn test_one_line_function() {
    assert_eq!(
        parse("fp.double = ($a) -> $a * 2"),
        vec![assign(
            var("fp.double"),
            Node::function_definition(
                vec![Parameter::new("$a", ParameterKind::Normal)],
                vec![Node::Return(Some(Box::new(Node::binary(
                    Operator::Mul,
                    Node::unprocessed_variable("$a"),
                    Node::Int(2)
                ))))]
            )
        )]
    );
}

#[test]
fn test_named_function() {
    let nodes = parse("function add($a, $b) {\n\treturn $a + $b\n}\nfunc.println(done)");
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes[0],
        assign(
            var("fp.add"),
            Node::function_definition(
                vec![
                    Parameter::new("$a", ParameterKind::Normal),
                    Parameter::new("$b", ParameterKind::Normal),
                ],
                vec![Node::Return(Some(Box::new(Node::binary(
                    Operator::Add,
                    Node::unprocessed_variable("$a"),
                    Node::unprocessed_variable("$b")
                ))))]
            )
        )
    );
}

#[test]
fn test_invalid_parameter() {
    let nodes = parse("fp.f = (abc) -> {\n\treturn 1\n}\n$a = 1");
    assert_eq!(errors(&nodes), vec![ParsingError::InvalidParameter]);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1], assign(var("$a"), Node::Int(1)));
}

#[test]
fn test_unclosed_function_body() {
    assert_eq!(errors(&parse("fp.f = () -> {\n\treturn 1")), vec![ParsingError::Eof]);
}

#[test]
fn test_statements() {
    assert_eq!(
        parse("return\nreturn $a\nthrow $LANG_ERROR_DIV_BY_ZERO\nbreak\ncontinue 2"),
        vec![
            Node::Return(None),
            Node::Return(Some(Box::new(Node::unprocessed_variable("$a")))),
            Node::Throw(Box::new(Node::unprocessed_variable("$LANG_ERROR_DIV_BY_ZERO"))),
            Node::Break(None),
            Node::Continue(Some(Box::new(Node::Int(2)))),
        ]
    );
    assert_eq!(errors(&parse("throw")), vec![ParsingError::ContFlowArgMissing]);
}

#[test]
fn test_comments_and_raw_text() {
    assert_eq!(
        parse("# comment\n$a = {{{line1\nline2 # kept}}} # dropped"),
        vec![assign(var("$a"), Node::text("line1\nline2 # kept"))]
    );
}

#[test]
fn test_stray_close_brace_keeps_parsing() {
    let nodes = parse("$a = 1\n}\n$b = 2");
    assert_eq!(nodes.len(), 3);
    assert_eq!(errors(&nodes), vec![ParsingError::InvalidConPart]);
    assert_eq!(nodes[2], assign(var("$b"), Node::Int(2)));
}
