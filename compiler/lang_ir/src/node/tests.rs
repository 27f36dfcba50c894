use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_single_element_list_collapses() {
    assert_eq!(Node::list(vec![Node::Int(1)]), Node::Int(1));
    assert_eq!(Node::list(vec![]), Node::List(vec![]));
    assert_eq!(
        Node::list(vec![Node::text("a"), Node::variable("$b")]),
        Node::List(vec![Node::text("a"), Node::variable("$b")])
    );
}

#[test]
fn test_structural_equality() {
    let a = Node::binary(Operator::Add, Node::Int(1), Node::variable("$x"));
    let b = Node::binary(Operator::Add, Node::Int(1), Node::variable("$x"));
    assert_eq!(a, b);
    assert_ne!(a, Node::binary(Operator::Sub, Node::Int(1), Node::variable("$x")));
}

#[test]
fn test_operation_children_in_order() {
    let node = Node::ternary(Node::variable("$c"), Node::Int(1), Node::Int(2));
    assert_eq!(
        node.children(),
        vec![&Node::variable("$c"), &Node::Int(1), &Node::Int(2)]
    );
    assert_eq!(Node::unary(Operator::Not, Node::Null).children(), vec![&Node::Null]);
}

#[test]
fn test_if_children_are_conditions_then_bodies() {
    let node = Node::If(IfStatement {
        parts: vec![
            IfPart {
                condition: Some(Node::variable("$a")),
                body: vec![Node::Int(1)],
            },
            IfPart {
                condition: None,
                body: vec![Node::Int(2)],
            },
        ],
    });
    assert_eq!(
        node.children(),
        vec![&Node::variable("$a"), &Node::Int(1), &Node::Int(2)]
    );
}

#[test]
fn test_leaves_have_no_children() {
    for node in [
        Node::Int(1),
        Node::Null,
        Node::Void,
        Node::text("x"),
        Node::parsing_error(ParsingError::Eof, "eof"),
    ] {
        assert!(node.children().is_empty(), "{node:?}");
    }
}

#[test]
fn test_walk_is_preorder() {
    let node = Node::assignment(
        Node::variable("$a"),
        Node::binary(Operator::Mul, Node::Int(2), Node::Int(3)),
    );
    let kinds: Vec<NodeKind> = node.walk().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Assignment,
            NodeKind::VariableName,
            NodeKind::Operation,
            NodeKind::Int,
            NodeKind::Int,
        ]
    );
}

#[test]
fn test_has_parsing_errors() {
    let clean = Node::function_call("func.println", vec![Node::text("hi")]);
    assert!(!clean.has_parsing_errors());
    let broken = Node::function_call(
        "func.println",
        vec![Node::parsing_error(ParsingError::BracketMismatch, "(")],
    );
    assert!(broken.has_parsing_errors());
}

#[test]
fn test_display_tree() {
    let node = Node::assignment(
        Node::variable("$a"),
        Node::binary(Operator::Add, Node::Int(1), Node::Double(2.5)),
    );
    assert_eq!(
        node.to_string(),
        "Assignment\n  VariableName $a\n  Operation Add `+`\n    Int 1\n    Double 2.5\n"
    );
}

#[test]
fn test_display_function_definition_parameters() {
    let node = Node::function_definition(
        vec![
            Parameter::new("$a", ParameterKind::Normal),
            Parameter::new("$b", ParameterKind::CallByPointer),
            Parameter::new("&rest", ParameterKind::VarArgs),
        ],
        vec![Node::Return(Some(Box::new(Node::variable("$a"))))],
    );
    assert_eq!(
        node.to_string(),
        "FunctionDefinition ($a, $[b], &rest...)\n  Return\n    VariableName $a\n"
    );
}

#[test]
fn test_loop_arguments() {
    let kind = LoopKind::Repeat {
        variable: Some(Node::variable("$i")),
        count: Node::Int(3),
    };
    assert_eq!(kind.arguments(), vec![&Node::variable("$i"), &Node::Int(3)]);
    assert_eq!(kind.keyword(), "repeat");
    assert!(LoopKind::Loop.arguments().is_empty());
}
