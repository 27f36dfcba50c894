//! AST node model.
//!
//! A parsed script is a `Vec<Node>` of statements. Nodes own their children
//! (no arena, no back references), are immutable once built, and compare
//! structurally. [`Node::children`] gives every node an ordered child list so
//! printers and tests can walk any tree generically.

use std::sync::Arc;

use crate::{Operator, ParsingError};

mod display;

/// A node of the Lang AST.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Transparent grouping; evaluates its children and concatenates them.
    List(Vec<Node>),
    Assignment(AssignmentNode),
    /// `\n`, `\t`, `\$` …; holds the character after the backslash. The
    /// interpreter maps it, so unknown escapes can be reported at runtime.
    EscapeSequence(char),
    /// A variable reference inside text, resolved against the scope at runtime
    /// (longest existing prefix wins).
    UnprocessedVariableName(String),
    /// An exact variable, pointer or native function reference.
    VariableName(String),
    /// A `,` between call arguments, with its surrounding whitespace.
    ArgumentSeparator(String),
    FunctionCall(FunctionCallNode),
    /// `(args)` directly after another piece; calls the previous value if it
    /// is a function pointer, otherwise renders as bracketed text.
    FunctionCallPreviousNodeValue(Vec<Node>),
    FunctionDefinition(Arc<FunctionDefinition>),
    Operation(OperationNode),
    If(IfStatement),
    Loop(LoopStatement),
    Try(TryStatement),
    Break(Option<Box<Node>>),
    Continue(Option<Box<Node>>),
    Return(Option<Box<Node>>),
    Throw(Box<Node>),
    /// `[a, b, c]`
    Array(Vec<Node>),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
    Null,
    Void,
    ParsingError(ParsingErrorNode),
}

/// Variant tag of a [`Node`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    List,
    Assignment,
    EscapeSequence,
    UnprocessedVariableName,
    VariableName,
    ArgumentSeparator,
    FunctionCall,
    FunctionCallPreviousNodeValue,
    FunctionDefinition,
    Operation,
    If,
    Loop,
    Try,
    Break,
    Continue,
    Return,
    Throw,
    Array,
    Int,
    Long,
    Float,
    Double,
    Char,
    Text,
    Null,
    Void,
    ParsingError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentNode {
    pub lvalue: Box<Node>,
    pub rvalue: Box<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCallNode {
    /// Name as written: `func.println`, `linker.link`, `fp.f` or a bare `f`.
    pub name: String,
    /// Argument expressions interleaved with [`Node::ArgumentSeparator`]s.
    pub arguments: Vec<Node>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParameterKind {
    /// `$a`, `&a`, `fp.a`
    Normal,
    /// `$[a]`: bound to a pointer to the argument instead of a copy.
    CallByPointer,
    /// `$a...` (joined text) or `&a...` (array); only valid last.
    VarArgs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Variable name with its sigil (`$a`, `&a`, `fp.a`).
    pub name: String,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Parameter {
            name: name.into(),
            kind,
        }
    }
}

/// A user-defined function: parameter list plus body.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDefinition {
    pub parameters: Vec<Parameter>,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationNode {
    pub operator: Operator,
    pub left: Box<Node>,
    pub middle: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

/// One `if` / `elif` / `else` part. `else` has no condition.
#[derive(Clone, Debug, PartialEq)]
pub struct IfPart {
    pub condition: Option<Node>,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub parts: Vec<IfPart>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoopKind {
    Loop,
    While(Node),
    Until(Node),
    Repeat {
        variable: Option<Node>,
        count: Node,
    },
    ForEach {
        variable: Node,
        collection: Node,
    },
    /// Runs when the loop body never ran.
    Else,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopPart {
    pub kind: LoopKind,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopStatement {
    pub parts: Vec<LoopPart>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TryKind {
    Try,
    SoftTry,
    NonTry,
    /// `catch` handles everything, `catch(errors...)` only the listed kinds.
    Catch(Option<Vec<Node>>),
    Else,
    Finally,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryPart {
    pub kind: TryKind,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryStatement {
    pub parts: Vec<TryPart>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsingErrorNode {
    pub error: ParsingError,
    pub message: Option<String>,
}

// Constructors

impl Node {
    /// Group nodes; an empty group stays a list, a single node is returned as is.
    pub fn list(mut nodes: Vec<Node>) -> Node {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Node::List(nodes)
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Node {
        Node::VariableName(name.into())
    }

    pub fn unprocessed_variable(name: impl Into<String>) -> Node {
        Node::UnprocessedVariableName(name.into())
    }

    pub fn assignment(lvalue: Node, rvalue: Node) -> Node {
        Node::Assignment(AssignmentNode {
            lvalue: Box::new(lvalue),
            rvalue: Box::new(rvalue),
        })
    }

    pub fn function_call(name: impl Into<String>, arguments: Vec<Node>) -> Node {
        Node::FunctionCall(FunctionCallNode {
            name: name.into(),
            arguments,
        })
    }

    pub fn function_definition(parameters: Vec<Parameter>, body: Vec<Node>) -> Node {
        Node::FunctionDefinition(Arc::new(FunctionDefinition { parameters, body }))
    }

    pub fn unary(operator: Operator, operand: Node) -> Node {
        Node::Operation(OperationNode {
            operator,
            left: Box::new(operand),
            middle: None,
            right: None,
        })
    }

    pub fn binary(operator: Operator, left: Node, right: Node) -> Node {
        Node::Operation(OperationNode {
            operator,
            left: Box::new(left),
            middle: None,
            right: Some(Box::new(right)),
        })
    }

    pub fn ternary(condition: Node, if_true: Node, if_false: Node) -> Node {
        Node::Operation(OperationNode {
            operator: Operator::Conditional,
            left: Box::new(condition),
            middle: Some(Box::new(if_true)),
            right: Some(Box::new(if_false)),
        })
    }

    pub fn parsing_error(error: ParsingError, message: impl Into<String>) -> Node {
        Node::ParsingError(ParsingErrorNode {
            error,
            message: Some(message.into()),
        })
    }
}

// Inspection

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::List(_) => NodeKind::List,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::EscapeSequence(_) => NodeKind::EscapeSequence,
            Node::UnprocessedVariableName(_) => NodeKind::UnprocessedVariableName,
            Node::VariableName(_) => NodeKind::VariableName,
            Node::ArgumentSeparator(_) => NodeKind::ArgumentSeparator,
            Node::FunctionCall(_) => NodeKind::FunctionCall,
            Node::FunctionCallPreviousNodeValue(_) => NodeKind::FunctionCallPreviousNodeValue,
            Node::FunctionDefinition(_) => NodeKind::FunctionDefinition,
            Node::Operation(_) => NodeKind::Operation,
            Node::If(_) => NodeKind::If,
            Node::Loop(_) => NodeKind::Loop,
            Node::Try(_) => NodeKind::Try,
            Node::Break(_) => NodeKind::Break,
            Node::Continue(_) => NodeKind::Continue,
            Node::Return(_) => NodeKind::Return,
            Node::Throw(_) => NodeKind::Throw,
            Node::Array(_) => NodeKind::Array,
            Node::Int(_) => NodeKind::Int,
            Node::Long(_) => NodeKind::Long,
            Node::Float(_) => NodeKind::Float,
            Node::Double(_) => NodeKind::Double,
            Node::Char(_) => NodeKind::Char,
            Node::Text(_) => NodeKind::Text,
            Node::Null => NodeKind::Null,
            Node::Void => NodeKind::Void,
            Node::ParsingError(_) => NodeKind::ParsingError,
        }
    }

    /// Ordered children. Statement parts contribute their condition (or
    /// arguments) followed by their body.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::List(nodes)
            | Node::FunctionCallPreviousNodeValue(nodes)
            | Node::Array(nodes) => nodes.iter().collect(),
            Node::FunctionCall(call) => call.arguments.iter().collect(),
            Node::FunctionDefinition(def) => def.body.iter().collect(),
            Node::Assignment(assignment) => vec![&*assignment.lvalue, &*assignment.rvalue],
            Node::Operation(operation) => {
                let mut children = vec![&*operation.left];
                children.extend(operation.middle.as_deref());
                children.extend(operation.right.as_deref());
                children
            }
            Node::If(statement) => statement
                .parts
                .iter()
                .flat_map(|part| part.condition.iter().chain(part.body.iter()))
                .collect(),
            Node::Loop(statement) => statement
                .parts
                .iter()
                .flat_map(|part| part.kind.arguments().into_iter().chain(part.body.iter()))
                .collect(),
            Node::Try(statement) => statement
                .parts
                .iter()
                .flat_map(|part| {
                    let errors = match &part.kind {
                        TryKind::Catch(Some(errors)) => errors.as_slice(),
                        _ => &[],
                    };
                    errors.iter().chain(part.body.iter())
                })
                .collect(),
            Node::Break(value) | Node::Continue(value) | Node::Return(value) => {
                value.as_deref().into_iter().collect()
            }
            Node::Throw(value) => vec![&**value],
            Node::EscapeSequence(_)
            | Node::UnprocessedVariableName(_)
            | Node::VariableName(_)
            | Node::ArgumentSeparator(_)
            | Node::Int(_)
            | Node::Long(_)
            | Node::Float(_)
            | Node::Double(_)
            | Node::Char(_)
            | Node::Text(_)
            | Node::Null
            | Node::Void
            | Node::ParsingError(_) => Vec::new(),
        }
    }

    /// Depth-first pre-order iteration over this node and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().into_iter().rev());
            Some(node)
        })
    }

    /// Whether this tree contains a parse failure anywhere.
    pub fn has_parsing_errors(&self) -> bool {
        self.walk().any(|node| matches!(node, Node::ParsingError(_)))
    }
}

impl LoopKind {
    /// Condition / argument nodes of this loop part.
    pub fn arguments(&self) -> Vec<&Node> {
        match self {
            LoopKind::Loop | LoopKind::Else => Vec::new(),
            LoopKind::While(condition) | LoopKind::Until(condition) => vec![condition],
            LoopKind::Repeat { variable, count } => {
                variable.iter().chain(std::iter::once(count)).collect()
            }
            LoopKind::ForEach {
                variable,
                collection,
            } => vec![variable, collection],
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            LoopKind::Loop => "loop",
            LoopKind::While(_) => "while",
            LoopKind::Until(_) => "until",
            LoopKind::Repeat { .. } => "repeat",
            LoopKind::ForEach { .. } => "foreach",
            LoopKind::Else => "else",
        }
    }
}

impl TryKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TryKind::Try => "try",
            TryKind::SoftTry => "softtry",
            TryKind::NonTry => "nontry",
            TryKind::Catch(_) => "catch",
            TryKind::Else => "else",
            TryKind::Finally => "finally",
        }
    }
}

#[cfg(test)]
mod tests;
