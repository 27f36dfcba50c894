//! Tests for operator precedence, operands and literals.

use lang_ir::{Node, Operator, ParsingError};
use pretty_assertions::assert_eq;

use crate::parse_expression;

fn var(name: &str) -> Node {
    Node::unprocessed_variable(name)
}

fn text(value: &str) -> Node {
    Node::text(value)
}

#[test]
fn test_binary_operator_needs_whitespace() {
    assert_eq!(
        parse_expression("$a + $b"),
        Node::binary(Operator::Add, var("$a"), var("$b"))
    );
    assert_eq!(parse_expression("a+b"), text("a+b"));
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(
        parse_expression("1 + 2 * 3"),
        Node::binary(
            Operator::Add,
            Node::Int(1),
            Node::binary(Operator::Mul, Node::Int(2), Node::Int(3))
        )
    );
    assert_eq!(
        parse_expression("1 - 2 - 3"),
        Node::binary(
            Operator::Sub,
            Node::binary(Operator::Sub, Node::Int(1), Node::Int(2)),
            Node::Int(3)
        )
    );
    assert_eq!(
        parse_expression("2 ** 3 ** 2"),
        Node::binary(
            Operator::Pow,
            Node::Int(2),
            Node::binary(Operator::Pow, Node::Int(3), Node::Int(2))
        )
    );
    assert_eq!(
        parse_expression("$a == 1 && $b"),
        Node::binary(
            Operator::And,
            Node::binary(Operator::Equals, var("$a"), Node::Int(1)),
            var("$b")
        )
    );
}

#[test]
fn test_longest_lexeme_wins() {
    assert_eq!(
        parse_expression("$a === $b"),
        Node::binary(Operator::StrictEquals, var("$a"), var("$b"))
    );
    assert_eq!(
        parse_expression("$a >>> 2"),
        Node::binary(Operator::Rzshift, var("$a"), Node::Int(2))
    );
    assert_eq!(
        parse_expression("$a // 2"),
        Node::binary(Operator::FloorDiv, var("$a"), Node::Int(2))
    );
}

#[test]
fn test_prefix_operators() {
    assert_eq!(parse_expression("-$a"), Node::unary(Operator::Inv, var("$a")));
    assert_eq!(parse_expression("!$a"), Node::unary(Operator::Not, var("$a")));
    assert_eq!(parse_expression("+|$a"), Node::unary(Operator::Inc, var("$a")));
    assert_eq!(parse_expression("@&list"), Node::unary(Operator::Len, var("&list")));
    assert_eq!(
        parse_expression("-$a ** 2"),
        Node::unary(
            Operator::Inv,
            Node::binary(Operator::Pow, var("$a"), Node::Int(2))
        )
    );
    assert_eq!(
        parse_expression("-$a * 2"),
        Node::binary(
            Operator::Mul,
            Node::unary(Operator::Inv, var("$a")),
            Node::Int(2)
        )
    );
    assert_eq!(parse_expression("- item"), text("- item"));
}

#[test]
fn test_conditional_operator() {
    assert_eq!(
        parse_expression("$a ? yes : no"),
        Node::ternary(var("$a"), text("yes"), text("no"))
    );
    assert_eq!(
        parse_expression("$a ?: fallback"),
        Node::binary(Operator::Elvis, var("$a"), text("fallback"))
    );
    assert_eq!(
        parse_expression("$a ?? 0"),
        Node::binary(Operator::NullCoalescing, var("$a"), Node::Int(0))
    );
    assert_eq!(
        parse_expression("what ? now"),
        text("what ? now")
    );
}

#[test]
fn test_literals() {
    assert_eq!(parse_expression("5"), Node::Int(5));
    assert_eq!(parse_expression(" -5 "), Node::Int(-5));
    assert_eq!(parse_expression("5000000000"), Node::Long(5_000_000_000));
    assert_eq!(parse_expression("5L"), Node::Long(5));
    assert_eq!(parse_expression("2.5"), Node::Double(2.5));
    assert_eq!(parse_expression("2.5f"), Node::Float(2.5));
    assert_eq!(parse_expression("null"), Node::Null);
    assert_eq!(parse_expression("5 apples"), text("5 apples"));
    assert_eq!(parse_expression(""), text(""));
}

#[test]
fn test_calls() {
    assert_eq!(
        parse_expression("func.println(Hello, World)"),
        Node::function_call(
            "func.println",
            vec![
                text("Hello"),
                Node::ArgumentSeparator(", ".to_string()),
                text("World"),
            ]
        )
    );
    assert_eq!(parse_expression("f()"), Node::function_call("f", vec![]));
    assert_eq!(
        parse_expression("func.println(func.len(abc), x)"),
        Node::function_call(
            "func.println",
            vec![
                Node::function_call("func.len", vec![text("abc")]),
                Node::ArgumentSeparator(", ".to_string()),
                text("x"),
            ]
        )
    );
    assert_eq!(
        parse_expression("$f(1)"),
        Node::List(vec![
            var("$f"),
            Node::FunctionCallPreviousNodeValue(vec![Node::Int(1)]),
        ])
    );
    assert_eq!(
        parse_expression("Result (x)"),
        Node::List(vec![
            text("Result "),
            Node::FunctionCallPreviousNodeValue(vec![text("x")]),
        ])
    );
}

#[test]
fn test_native_references() {
    assert_eq!(parse_expression("fp.f"), Node::variable("fp.f"));
    assert_eq!(parse_expression("func.len"), Node::variable("func.len"));
    assert_eq!(parse_expression("myfp.f"), text("myfp.f"));
}

#[test]
fn test_indexing_and_arrays() {
    assert_eq!(
        parse_expression("&list[0]"),
        Node::binary(Operator::GetItem, var("&list"), Node::Int(0))
    );
    assert_eq!(
        parse_expression("[1, 2, abc]"),
        Node::Array(vec![Node::Int(1), Node::Int(2), text("abc")])
    );
    assert_eq!(parse_expression("[]"), Node::Array(vec![]));
}

#[test]
fn test_groups() {
    assert_eq!(
        parse_expression("($a + 1) * 2"),
        Node::binary(
            Operator::Mul,
            Node::binary(Operator::Add, var("$a"), Node::Int(1)),
            Node::Int(2)
        )
    );
}

#[test]
fn test_text_pieces() {
    assert_eq!(parse_expression("{{{a + b}}}"), text("a + b"));
    assert_eq!(
        parse_expression("a\\nb"),
        Node::List(vec![text("a"), Node::EscapeSequence('n'), text("b")])
    );
    assert_eq!(
        parse_expression("Hello $name!"),
        Node::List(vec![text("Hello "), var("$name"), text("!")])
    );
    assert_eq!(
        parse_expression("$a +"),
        Node::List(vec![var("$a"), text(" +")])
    );
}

#[test]
fn test_pointer_syntax() {
    assert_eq!(parse_expression("$[$a]"), Node::variable("$[$a]"));
    assert_eq!(parse_expression("$*p"), Node::variable("$*p"));
    assert_eq!(parse_expression("$**p"), Node::variable("$**p"));
}

#[test]
fn test_unbalanced_brackets_are_errors() {
    for source in ["func.println(abc", "(1 + 2", "[1, 2", "{{{open"] {
        let node = parse_expression(source);
        let Node::ParsingError(error) = node else {
            panic!("expected a parsing error for {source:?}, got {node:?}");
        };
        assert_eq!(error.error, ParsingError::BracketMismatch);
    }
}
