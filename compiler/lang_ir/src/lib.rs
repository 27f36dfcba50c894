//! Lang IR - AST and operator definitions shared by the parser and the
//! interpreter.
//!
//! - [`Node`]: the closed set of AST node variants
//! - [`Operator`]: operator lexemes, arity and precedence
//! - [`ParsingError`]: parse failures, stored in the tree as data
//!
//! # Design
//!
//! - **Owned trees**: children are boxed or held in vectors; there are no
//!   arenas and no back references, so a parsed program can be cloned,
//!   compared and shared (`Arc<FunctionDefinition>`) freely.
//! - **Errors are nodes**: the parser never aborts; malformed input becomes a
//!   [`Node::ParsingError`] leaf that the interpreter reports at runtime.

mod node;
mod operator;
mod parsing_error;

pub use node::{
    AssignmentNode, FunctionCallNode, FunctionDefinition, IfPart, IfStatement, LoopKind, LoopPart,
    LoopStatement, Node, NodeKind, OperationNode, Parameter, ParameterKind, ParsingErrorNode,
    TryKind, TryPart, TryStatement,
};
pub use operator::{Operator, OperatorArity};
pub use parsing_error::ParsingError;
