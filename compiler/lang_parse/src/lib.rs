//! Parser for Lang.
//!
//! Turns source text into a `Vec<Node>` of statements. Hand-written and
//! substring based: there is no token buffer.
//!
//! - [`assemble_lines`]: comments, `\` continuations, multi-line `{{{…}}}`
//!   and open function headers, giving one statement per logical line
//! - statements and blocks, read line by line
//! - [`parse_expression`]: precedence climbing within one statement
//!
//! Parsing never fails. Malformed input becomes a [`Node::ParsingError`]
//! and parsing continues with the next line.

mod assignment;
mod block;
mod expr;
mod function;
mod lines;
mod scan;
mod statement;

#[cfg(test)]
mod tests;

pub use expr::parse_expression;
pub use lines::{assemble_lines, LogicalLine};

use lang_ir::Node;
use tracing::debug;

/// Parse a whole script.
pub fn parse(source: &str) -> Vec<Node> {
    Parser::new(source).parse()
}

/// Parser state: the logical lines not consumed yet.
pub struct Parser {
    lines: std::vec::IntoIter<LogicalLine>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Parser {
            lines: assemble_lines(source).into_iter(),
        }
    }

    fn next_line(&mut self) -> Option<LogicalLine> {
        self.lines.next()
    }

    /// Parse all remaining lines. Block boundaries without an open block
    /// (`endif`, a stray `}`) become `InvalidConPart` errors.
    pub fn parse(mut self) -> Vec<Node> {
        debug!(lines = self.lines.len(), "parse");
        let mut nodes = Vec::new();
        loop {
            let (body, boundary) = self.parse_body();
            nodes.extend(body);
            match boundary {
                Some(boundary) => nodes.push(boundary.misplaced()),
                None => break,
            }
        }
        nodes
    }
}
