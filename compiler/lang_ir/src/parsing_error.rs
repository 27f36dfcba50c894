//! Parse failures carried inside the AST.

use std::fmt;

/// Kind of a parse failure embedded as a [`crate::Node::ParsingError`] leaf.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsingError {
    /// A `(`, `[` or `{{{` without its closing counterpart (or vice versa).
    BracketMismatch,
    /// A control flow statement without its condition or arguments.
    ContFlowArgMissing,
    /// The input ended inside a block.
    Eof,
    /// A part (`elif`, `catch`, `}` …) that does not belong where it appears.
    InvalidConPart,
    /// An assignment whose target can not be assigned to.
    InvalidAssignment,
    /// A malformed function parameter.
    InvalidParameter,
}

impl ParsingError {
    pub const fn description(self) -> &'static str {
        match self {
            Self::BracketMismatch => "Bracket mismatch",
            Self::ContFlowArgMissing => {
                "Control flow statement condition(s) or argument(s) is/are missing"
            }
            Self::Eof => "End of file was reached early",
            Self::InvalidConPart => "Invalid statement in control flow statement",
            Self::InvalidAssignment => "Invalid assignment",
            Self::InvalidParameter => "Invalid function parameter",
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
