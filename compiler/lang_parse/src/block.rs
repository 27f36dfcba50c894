//! `if`, loop and `try` constructs.
//!
//! Keyword form (`if(c)` … `endif`) and brace form (`if(c) {` … `}`) read
//! the same boundaries and build the same nodes.

use lang_ir::{
    IfPart, IfStatement, LoopKind, LoopPart, LoopStatement, Node, ParsingError, TryKind, TryPart,
    TryStatement,
};
use tracing::debug;

use crate::expr::{parse_expression, parse_values};
use crate::scan::{is_variable_name, split_top_level_commas};
use crate::statement::{BoundaryKind, Header};
use crate::Parser;

const LOOP_END_KEYWORDS: &[&str] = &["loop", "while", "until", "repeat", "foreach"];
const TRY_END_KEYWORDS: &[&str] = &["try", "softtry", "nontry"];

fn missing_argument(keyword: &str, line: usize) -> Node {
    Node::parsing_error(
        ParsingError::ContFlowArgMissing,
        format!("line {line}: `{keyword}` is missing its condition or arguments"),
    )
}

fn unterminated(keyword: &str, line: usize) -> Node {
    Node::parsing_error(
        ParsingError::Eof,
        format!("line {line}: `{keyword}` block is not terminated"),
    )
}

/// Non-empty condition text, parsed.
fn condition(text: Option<&str>) -> Option<Node> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(parse_expression)
}

/// A loop variable: an exact variable name, or any expression.
fn loop_variable(text: &str) -> Node {
    let text = text.trim();
    if is_variable_name(text) {
        Node::variable(text)
    } else {
        parse_expression(text)
    }
}

fn repeat_kind(arguments: &str) -> Option<LoopKind> {
    match split_top_level_commas(arguments).as_slice() {
        [count] if !count.trim().is_empty() => Some(LoopKind::Repeat {
            variable: None,
            count: parse_expression(count),
        }),
        [variable, count] => Some(LoopKind::Repeat {
            variable: Some(loop_variable(variable)),
            count: parse_expression(count),
        }),
        _ => None,
    }
}

fn foreach_kind(arguments: &str) -> Option<LoopKind> {
    match split_top_level_commas(arguments).as_slice() {
        [variable, collection] if !variable.trim().is_empty() => Some(LoopKind::ForEach {
            variable: loop_variable(variable),
            collection: parse_expression(collection),
        }),
        _ => None,
    }
}

impl Parser {
    pub(crate) fn parse_block(&mut self, header: Header, line: usize) -> Node {
        debug!(line, ?header, "block");
        match header {
            Header::If(text) => self.parse_if(text.as_deref(), line),
            Header::Loop => self.parse_loop(Some(LoopKind::Loop), "loop", line),
            Header::While(text) => {
                let kind = condition(text.as_deref()).map(LoopKind::While);
                self.parse_loop(kind, "while", line)
            }
            Header::Until(text) => {
                let kind = condition(text.as_deref()).map(LoopKind::Until);
                self.parse_loop(kind, "until", line)
            }
            Header::Repeat(text) => {
                let kind = text.as_deref().and_then(repeat_kind);
                self.parse_loop(kind, "repeat", line)
            }
            Header::ForEach(text) => {
                let kind = text.as_deref().and_then(foreach_kind);
                self.parse_loop(kind, "foreach", line)
            }
            Header::Try => self.parse_try(TryKind::Try, "try", line),
            Header::SoftTry => self.parse_try(TryKind::SoftTry, "softtry", line),
            Header::NonTry => self.parse_try(TryKind::NonTry, "nontry", line),
        }
    }

    fn parse_if(&mut self, first: Option<&str>, line: usize) -> Node {
        let mut missing = false;
        let mut next_condition = match condition(first) {
            Some(node) => Some(node),
            None => {
                missing = true;
                Some(Node::Null)
            }
        };
        let mut parts = Vec::new();
        loop {
            let (body, boundary) = self.parse_body();
            parts.push(IfPart {
                condition: next_condition.take(),
                body,
            });
            let Some(boundary) = boundary else {
                return unterminated("if", line);
            };
            match boundary.kind {
                BoundaryKind::Close | BoundaryKind::End("if") => break,
                BoundaryKind::Elif(ref text) => match condition(Some(text.as_str())) {
                    Some(node) => next_condition = Some(node),
                    None => {
                        missing = true;
                        next_condition = Some(Node::Null);
                    }
                },
                BoundaryKind::Else => next_condition = None,
                _ => return boundary.misplaced(),
            }
        }
        if missing {
            return missing_argument("if", line);
        }
        Node::If(IfStatement { parts })
    }

    fn parse_loop(&mut self, first: Option<LoopKind>, keyword: &str, line: usize) -> Node {
        let missing = first.is_none();
        let mut next_kind = first.unwrap_or(LoopKind::Loop);
        let mut parts = Vec::new();
        loop {
            let (body, boundary) = self.parse_body();
            parts.push(LoopPart {
                kind: std::mem::replace(&mut next_kind, LoopKind::Else),
                body,
            });
            let Some(boundary) = boundary else {
                return unterminated(keyword, line);
            };
            match boundary.kind {
                BoundaryKind::Close => break,
                BoundaryKind::End(end) if LOOP_END_KEYWORDS.contains(&end) => break,
                BoundaryKind::Else => {}
                _ => return boundary.misplaced(),
            }
        }
        if missing {
            return missing_argument(keyword, line);
        }
        Node::Loop(LoopStatement { parts })
    }

    fn parse_try(&mut self, first: TryKind, keyword: &str, line: usize) -> Node {
        let mut next_kind = first;
        let mut parts = Vec::new();
        loop {
            let (body, boundary) = self.parse_body();
            parts.push(TryPart {
                kind: std::mem::replace(&mut next_kind, TryKind::Else),
                body,
            });
            let Some(boundary) = boundary else {
                return unterminated(keyword, line);
            };
            next_kind = match &boundary.kind {
                BoundaryKind::Close => break,
                BoundaryKind::End(end) if TRY_END_KEYWORDS.contains(end) => break,
                BoundaryKind::Catch(errors) => TryKind::Catch(errors.as_deref().map(parse_values)),
                BoundaryKind::Else => TryKind::Else,
                BoundaryKind::Finally => TryKind::Finally,
                _ => return boundary.misplaced(),
            };
        }
        Node::Try(TryStatement { parts })
    }
}
