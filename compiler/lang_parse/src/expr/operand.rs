//! Operand pieces.
//!
//! An operand is a run of adjacent pieces evaluated as a list and
//! concatenated: raw text `{{{…}}}`, escapes, groups, calls, indexing,
//! array literals, variables and plain text.

use lang_ir::{Node, Operator, ParsingError};
use tracing::trace;

use super::{parse_arguments, parse_expression, parse_values};
use crate::scan::{find_matching, identifier_len, is_identifier_char};

/// Prefixes that name a function or function pointer.
const CALLABLE_PREFIXES: &[&str] = &["fp.", "func.", "linker."];

#[derive(Default)]
struct Pieces {
    nodes: Vec<Node>,
    buffer: String,
}

impl Pieces {
    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.buffer)));
        }
    }

    fn push(&mut self, node: Node) {
        self.flush();
        self.nodes.push(node);
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.buffer.is_empty()
    }

    /// Whether a callable prefix may start here: not glued to a preceding
    /// identifier (`myfp.x` is text).
    fn at_word_start(&self) -> bool {
        self.buffer
            .chars()
            .next_back()
            .map_or(true, |c| !is_identifier_char(c) && c != '.')
    }

    /// `(` after other pieces calls the previous value; `name(` at the start
    /// of the operand is a bare call; otherwise it is a group.
    fn open_paren(&mut self, inner: &str) {
        let is_bare_name = self.nodes.is_empty()
            && self
                .buffer
                .starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && self.buffer.chars().all(is_identifier_char);
        if is_bare_name {
            let name = std::mem::take(&mut self.buffer);
            self.push(Node::function_call(name, parse_arguments(inner)));
        } else if self.is_empty() {
            self.push(parse_expression(inner));
        } else {
            self.push(Node::FunctionCallPreviousNodeValue(parse_arguments(inner)));
        }
    }

    /// `[` directly after a non-text piece indexes it; anywhere else it
    /// starts an array literal.
    fn open_bracket(&mut self, inner: &str) {
        if self.buffer.is_empty() {
            if let Some(previous) = self.nodes.pop() {
                self.nodes.push(Node::binary(
                    Operator::GetItem,
                    previous,
                    parse_expression(inner),
                ));
                return;
            }
        }
        self.push(Node::Array(parse_values(inner)));
    }

    /// `$name`, `&name`, `$*name`, `$[…]`. Returns the bytes consumed, or 0
    /// if `rest` does not start a variable.
    fn variable(&mut self, rest: &str) -> usize {
        let is_dollar = rest.starts_with('$');
        let after = &rest[1..];
        if is_dollar && after.starts_with('[') {
            return match find_matching(rest, 1) {
                Some(close) => {
                    self.push(Node::variable(&rest[..=close]));
                    close + 1
                }
                None => {
                    self.push(unclosed(']'));
                    rest.len()
                }
            };
        }
        let stars = if is_dollar {
            after.len() - after.trim_start_matches('*').len()
        } else {
            0
        };
        let name_len = identifier_len(&after[stars..]);
        if name_len == 0 {
            return 0;
        }
        let end = 1 + stars + name_len;
        let name = &rest[..end];
        if stars > 0 {
            self.push(Node::variable(name));
        } else {
            self.push(Node::unprocessed_variable(name));
        }
        end
    }

    /// `fp.x`, `func.x`, `linker.x`, optionally called. Returns the bytes
    /// consumed, or 0.
    fn callable(&mut self, rest: &str) -> usize {
        for prefix in CALLABLE_PREFIXES {
            let Some(after) = rest.strip_prefix(prefix) else {
                continue;
            };
            let name_len = identifier_len(after);
            if name_len == 0 {
                continue;
            }
            let end = prefix.len() + name_len;
            let name = &rest[..end];
            if !rest[end..].starts_with('(') {
                self.push(Node::variable(name));
                return end;
            }
            return match find_matching(rest, end) {
                Some(close) => {
                    let arguments = parse_arguments(&rest[end + 1..close]);
                    self.push(Node::function_call(name, arguments));
                    close + 1
                }
                None => {
                    self.push(unclosed(')'));
                    rest.len()
                }
            };
        }
        0
    }

    fn into_node(mut self) -> Node {
        self.flush();
        if self.nodes.is_empty() {
            return Node::text("");
        }
        Node::list(self.nodes)
    }
}

fn unclosed(bracket: char) -> Node {
    Node::parsing_error(ParsingError::BracketMismatch, format!("missing `{bracket}`"))
}

/// Consume `{{{…}}}` at the start of `rest`. Returns the node and the bytes
/// consumed.
fn raw_text(rest: &str) -> (Node, usize) {
    let body = &rest[3..];
    match body.find("}}}") {
        Some(end) => (Node::text(&body[..end]), 3 + end + 3),
        None => (
            Node::parsing_error(ParsingError::BracketMismatch, "missing `}}}`"),
            rest.len(),
        ),
    }
}

/// Consume `\x` at the start of `rest`.
fn escape(rest: &str, pieces: &mut Pieces) -> usize {
    match rest[1..].chars().next() {
        Some(c) => {
            pieces.push(Node::EscapeSequence(c));
            1 + c.len_utf8()
        }
        None => {
            pieces.buffer.push('\\');
            1
        }
    }
}

pub(super) fn parse_operand(text: &str) -> Node {
    trace!(text, "parse operand");
    let mut pieces = Pieces::default();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with("{{{") {
            let (node, consumed) = raw_text(rest);
            pieces.push(node);
            i += consumed;
            continue;
        }
        let Some(c) = rest.chars().next() else { break };
        let consumed = match c {
            '\\' => escape(rest, &mut pieces),
            '(' | '[' => match find_matching(text, i) {
                Some(close) => {
                    let inner = &text[i + 1..close];
                    if c == '(' {
                        pieces.open_paren(inner);
                    } else {
                        pieces.open_bracket(inner);
                    }
                    close + 1 - i
                }
                None => {
                    pieces.push(unclosed(if c == '(' { ')' } else { ']' }));
                    rest.len()
                }
            },
            '$' | '&' => pieces.variable(rest),
            'f' | 'l' if pieces.at_word_start() => pieces.callable(rest),
            _ => 0,
        };
        if consumed == 0 {
            pieces.buffer.push(c);
            i += c.len_utf8();
        } else {
            i += consumed;
        }
    }
    pieces.into_node()
}

/// Text without operators or variables: raw blocks, escapes and plain
/// characters. Used for translation values.
pub(crate) fn parse_plain_text(text: &str) -> Node {
    let mut pieces = Pieces::default();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with("{{{") {
            let (node, consumed) = raw_text(rest);
            pieces.push(node);
            i += consumed;
            continue;
        }
        let Some(c) = rest.chars().next() else { break };
        if c == '\\' {
            i += escape(rest, &mut pieces);
        } else {
            pieces.buffer.push(c);
            i += c.len_utf8();
        }
    }
    pieces.into_node()
}
