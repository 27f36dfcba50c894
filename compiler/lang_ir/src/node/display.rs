//! Indented tree rendering of AST nodes, used by `lang parse`.

use std::fmt;

use super::{LoopKind, Node, ParameterKind, TryKind};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    for node in nodes {
        write_node(f, node, depth)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match node {
        Node::List(nodes) => {
            writeln!(f, "List")?;
            write_block(f, nodes, depth + 1)
        }
        Node::Assignment(assignment) => {
            writeln!(f, "Assignment")?;
            write_node(f, &assignment.lvalue, depth + 1)?;
            write_node(f, &assignment.rvalue, depth + 1)
        }
        Node::EscapeSequence(c) => writeln!(f, "EscapeSequence {:?}", c),
        Node::UnprocessedVariableName(name) => writeln!(f, "UnprocessedVariableName {name}"),
        Node::VariableName(name) => writeln!(f, "VariableName {name}"),
        Node::ArgumentSeparator(text) => writeln!(f, "ArgumentSeparator {text:?}"),
        Node::FunctionCall(call) => {
            writeln!(f, "FunctionCall {}", call.name)?;
            write_block(f, &call.arguments, depth + 1)
        }
        Node::FunctionCallPreviousNodeValue(arguments) => {
            writeln!(f, "FunctionCallPreviousNodeValue")?;
            write_block(f, arguments, depth + 1)
        }
        Node::FunctionDefinition(def) => {
            let params: Vec<String> = def
                .parameters
                .iter()
                .map(|p| match p.kind {
                    ParameterKind::Normal => p.name.clone(),
                    ParameterKind::CallByPointer => format!("$[{}]", p.name.strip_prefix('$').unwrap_or(&p.name)),
                    ParameterKind::VarArgs => format!("{}...", p.name),
                })
                .collect();
            writeln!(f, "FunctionDefinition ({})", params.join(", "))?;
            write_block(f, &def.body, depth + 1)
        }
        Node::Operation(operation) => {
            writeln!(f, "Operation {:?} `{}`", operation.operator, operation.operator.symbol())?;
            write_node(f, &operation.left, depth + 1)?;
            if let Some(middle) = &operation.middle {
                write_node(f, middle, depth + 1)?;
            }
            if let Some(right) = &operation.right {
                write_node(f, right, depth + 1)?;
            }
            Ok(())
        }
        Node::If(statement) => {
            writeln!(f, "If")?;
            for (i, part) in statement.parts.iter().enumerate() {
                indent(f, depth + 1)?;
                match (&part.condition, i) {
                    (Some(condition), 0) => {
                        writeln!(f, "if")?;
                        write_node(f, condition, depth + 2)?;
                    }
                    (Some(condition), _) => {
                        writeln!(f, "elif")?;
                        write_node(f, condition, depth + 2)?;
                    }
                    (None, _) => writeln!(f, "else")?,
                }
                write_block(f, &part.body, depth + 2)?;
            }
            Ok(())
        }
        Node::Loop(statement) => {
            writeln!(f, "Loop")?;
            for part in &statement.parts {
                indent(f, depth + 1)?;
                writeln!(f, "{}", part.kind.keyword())?;
                if !matches!(part.kind, LoopKind::Loop | LoopKind::Else) {
                    for argument in part.kind.arguments() {
                        write_node(f, argument, depth + 2)?;
                    }
                }
                write_block(f, &part.body, depth + 2)?;
            }
            Ok(())
        }
        Node::Try(statement) => {
            writeln!(f, "Try")?;
            for part in &statement.parts {
                indent(f, depth + 1)?;
                writeln!(f, "{}", part.kind.keyword())?;
                if let TryKind::Catch(Some(errors)) = &part.kind {
                    write_block(f, errors, depth + 2)?;
                }
                write_block(f, &part.body, depth + 2)?;
            }
            Ok(())
        }
        Node::Break(value) => write_optional(f, "Break", value.as_deref(), depth),
        Node::Continue(value) => write_optional(f, "Continue", value.as_deref(), depth),
        Node::Return(value) => write_optional(f, "Return", value.as_deref(), depth),
        Node::Throw(value) => write_optional(f, "Throw", Some(value), depth),
        Node::Array(elements) => {
            writeln!(f, "Array")?;
            write_block(f, elements, depth + 1)
        }
        Node::Int(v) => writeln!(f, "Int {v}"),
        Node::Long(v) => writeln!(f, "Long {v}"),
        Node::Float(v) => writeln!(f, "Float {v:?}"),
        Node::Double(v) => writeln!(f, "Double {v:?}"),
        Node::Char(c) => writeln!(f, "Char {c:?}"),
        Node::Text(text) => writeln!(f, "Text {text:?}"),
        Node::Null => writeln!(f, "Null"),
        Node::Void => writeln!(f, "Void"),
        Node::ParsingError(error) => match &error.message {
            Some(message) => writeln!(f, "ParsingError {:?}: {message}", error.error),
            None => writeln!(f, "ParsingError {:?}", error.error),
        },
    }
}

fn write_optional(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<&Node>,
    depth: usize,
) -> fmt::Result {
    writeln!(f, "{label}")?;
    match value {
        Some(value) => write_node(f, value, depth + 1),
        None => Ok(()),
    }
}
