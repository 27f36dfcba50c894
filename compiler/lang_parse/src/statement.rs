//! Statements and block boundaries.
//!
//! One statement per logical line. Block constructs (`if`, loops, `try`,
//! function bodies) read lines until a *boundary* line such as `endif`,
//! `} else {` or `}`; the boundary is handed back to the construct that
//! owns it.

use lang_ir::{Node, ParsingError};
use lang_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::expr::parse_expression;
use crate::lines::LogicalLine;
use crate::scan::find_matching;
use crate::Parser;

/// Keywords accepted after `end` (`endif`, `endwhile`, …).
const END_KEYWORDS: &[&str] = &[
    "if", "loop", "while", "until", "repeat", "foreach", "try", "softtry", "nontry",
];

/// A line that closes or splits the enclosing block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BoundaryKind {
    /// `}`
    Close,
    /// `endif`, `endloop`, `endtry`, … with the keyword after `end`.
    End(&'static str),
    Elif(String),
    Else,
    Catch(Option<String>),
    Finally,
}

#[derive(Clone, Debug)]
pub(crate) struct Boundary {
    pub kind: BoundaryKind,
    pub line: usize,
    pub text: String,
}

impl Boundary {
    /// The error node for a boundary the enclosing construct does not accept.
    pub(crate) fn misplaced(&self) -> Node {
        Node::parsing_error(
            ParsingError::InvalidConPart,
            format!("line {}: unexpected `{}`", self.line, self.text),
        )
    }
}

/// Block construct headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Header {
    If(Option<String>),
    Loop,
    While(Option<String>),
    Until(Option<String>),
    Repeat(Option<String>),
    ForEach(Option<String>),
    Try,
    SoftTry,
    NonTry,
}

/// `keyword(inner)` spanning all of `text`. `Some(None)` for a bare
/// `keyword` with no argument list.
fn keyword_with_arguments(text: &str, keyword: &str) -> Option<Option<String>> {
    let rest = text.strip_prefix(keyword)?;
    if rest.is_empty() {
        return Some(None);
    }
    if !rest.starts_with('(') {
        return None;
    }
    let open = keyword.len();
    let close = find_matching(text, open)?;
    if close + 1 != text.len() {
        return None;
    }
    Some(Some(text[open + 1..close].to_string()))
}

/// Strip an optional `con.` prefix.
fn strip_con(text: &str) -> &str {
    text.strip_prefix("con.").unwrap_or(text)
}

pub(crate) fn classify_boundary(text: &str) -> Option<BoundaryKind> {
    let (closes_brace, rest) = match text.strip_prefix('}') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    if closes_brace && rest.is_empty() {
        return Some(BoundaryKind::Close);
    }
    let mut body = strip_con(rest);
    if closes_brace {
        body = body.strip_suffix('{').map_or(body, str::trim_end);
    } else if let Some(keyword) = body.strip_prefix("end") {
        if let Some(&keyword) = END_KEYWORDS.iter().find(|&&k| k == keyword) {
            return Some(BoundaryKind::End(keyword));
        }
    }
    match body {
        "else" => return Some(BoundaryKind::Else),
        "finally" => return Some(BoundaryKind::Finally),
        _ => {}
    }
    if let Some(condition) = keyword_with_arguments(body, "elif") {
        return Some(BoundaryKind::Elif(condition.unwrap_or_default()));
    }
    if let Some(errors) = keyword_with_arguments(body, "catch") {
        return Some(BoundaryKind::Catch(errors));
    }
    None
}

pub(crate) fn classify_header(text: &str) -> Option<Header> {
    let text = strip_con(text);
    let body = text.strip_suffix('{').map_or(text, str::trim_end);
    match body {
        "loop" => return Some(Header::Loop),
        "try" => return Some(Header::Try),
        "softtry" => return Some(Header::SoftTry),
        "nontry" => return Some(Header::NonTry),
        _ => {}
    }
    let with_arguments: [(&str, fn(Option<String>) -> Header); 5] = [
        ("if", Header::If),
        ("while", Header::While),
        ("until", Header::Until),
        ("repeat", Header::Repeat),
        ("foreach", Header::ForEach),
    ];
    with_arguments.into_iter().find_map(|(keyword, header)| {
        keyword_with_arguments(body, keyword).map(header)
    })
}

/// The argument of `keyword` when `text` is `keyword` or `keyword <arg>`.
fn keyword_argument<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    if rest.is_empty() {
        Some("")
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn optional_expression(argument: &str) -> Option<Box<Node>> {
    (!argument.is_empty()).then(|| Box::new(parse_expression(argument)))
}

impl Parser {
    /// Parse statements until a boundary line or the end of input.
    pub(crate) fn parse_body(&mut self) -> (Vec<Node>, Option<Boundary>) {
        let mut nodes = Vec::new();
        while let Some(line) = self.next_line() {
            let text = line.text.trim();
            if let Some(kind) = classify_boundary(text) {
                trace!(line = line.number, ?kind, "block boundary");
                let boundary = Boundary {
                    kind,
                    line: line.number,
                    text: text.to_string(),
                };
                return (nodes, Some(boundary));
            }
            let node = ensure_sufficient_stack(|| self.parse_statement(&line));
            nodes.push(node);
        }
        (nodes, None)
    }

    fn parse_statement(&mut self, line: &LogicalLine) -> Node {
        let text = line.text.trim();
        trace!(line = line.number, text, "parse statement");

        if let Some(header) = classify_header(text) {
            return self.parse_block(header, line.number);
        }
        if let Some(argument) = keyword_argument(text, "return") {
            return Node::Return(optional_expression(argument));
        }
        if let Some(argument) = keyword_argument(text, "throw") {
            if argument.is_empty() {
                return Node::parsing_error(
                    ParsingError::ContFlowArgMissing,
                    format!("line {}: `throw` needs a value", line.number),
                );
            }
            return Node::Throw(Box::new(parse_expression(argument)));
        }
        if let Some(argument) = keyword_argument(text, "break") {
            return Node::Break(optional_expression(argument));
        }
        if let Some(argument) = keyword_argument(text, "continue") {
            return Node::Continue(optional_expression(argument));
        }
        if let Some(rest) = text.strip_prefix("function ") {
            return self.parse_named_function(rest.trim(), line.number);
        }
        if let Some(node) = self.parse_assignment(text, line.number) {
            return node;
        }
        parse_expression(text)
    }
}
