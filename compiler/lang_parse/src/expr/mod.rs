//! Expression parsing.
//!
//! Precedence climbing over a substring. There is no token stream: the
//! parser walks byte offsets of the expression text and recognises binary
//! operators only where they are surrounded by top-level whitespace, so
//! `$a + $b` is an addition while `a+b` is plain text.
//!
//! Operands (the text between operators) are split into pieces by
//! [`operand::parse_operand`].

mod literal;
mod operand;

use lang_ir::{Node, Operator, ParsingError};
use lang_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::scan::{split_top_level_commas, top_level_chars};

pub(crate) use operand::parse_plain_text;

/// Loosest binding level: a whole expression.
const LOWEST: u8 = 15;

/// Binary operator lexemes, longest first. `?` is the conditional operator
/// and is only recognised when a ` : ` follows.
const BINARY_OPERATORS: &[(&str, Operator)] = &[
    (">>>", Operator::Rzshift),
    ("|||", Operator::Concat),
    ("===", Operator::StrictEquals),
    ("!==", Operator::StrictNotEquals),
    ("**", Operator::Pow),
    ("//", Operator::FloorDiv),
    ("<<", Operator::Lshift),
    (">>", Operator::Rshift),
    ("<=", Operator::LessEquals),
    (">=", Operator::GreaterEquals),
    ("==", Operator::Equals),
    ("!=", Operator::NotEquals),
    ("&&", Operator::And),
    ("||", Operator::Or),
    ("??", Operator::NullCoalescing),
    ("?:", Operator::Elvis),
    ("*", Operator::Mul),
    ("/", Operator::Div),
    ("%", Operator::Mod),
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("<", Operator::Less),
    (">", Operator::Greater),
    ("&", Operator::BitwiseAnd),
    ("^", Operator::BitwiseXor),
    ("|", Operator::BitwiseOr),
    ("?", Operator::Conditional),
];

/// Prefix operator lexemes, longest first. A prefix applies only when it is
/// directly followed by a non-whitespace character.
const PREFIX_OPERATORS: &[(&str, Operator)] = &[
    ("+|", Operator::Inc),
    ("-|", Operator::Dec),
    ("-", Operator::Inv),
    ("+", Operator::Pos),
    ("!", Operator::Not),
    ("~", Operator::BitwiseNot),
    ("^", Operator::DeepCopy),
    ("@", Operator::Len),
];

/// Parse one expression. Empty input yields an empty Text node.
pub fn parse_expression(text: &str) -> Node {
    let text = text.trim();
    if text.is_empty() {
        return Node::text("");
    }
    ensure_sufficient_stack(|| ExprParser::new(text).parse())
}

/// Parse call arguments, keeping each top-level `,` (with the whitespace
/// around it) as an [`Node::ArgumentSeparator`].
pub(crate) fn parse_arguments(text: &str) -> Vec<Node> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut nodes = Vec::new();
    let mut separator = String::new();
    for (i, part) in split_top_level_commas(text).into_iter().enumerate() {
        let start_trimmed = part.trim_start();
        let leading = &part[..part.len() - start_trimmed.len()];
        let value = start_trimmed.trim_end();
        if i > 0 {
            separator.push_str(leading);
            nodes.push(Node::ArgumentSeparator(std::mem::take(&mut separator)));
        }
        nodes.push(parse_expression(value));
        separator.push_str(&start_trimmed[value.len()..]);
        separator.push(',');
    }
    nodes
}

/// Parse comma separated values without keeping separators (array literals,
/// catch lists).
pub(crate) fn parse_values(text: &str) -> Vec<Node> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_top_level_commas(text)
        .into_iter()
        .map(parse_expression)
        .collect()
}

struct ExprParser<'a> {
    text: &'a str,
    /// Sorted byte offsets of top-level whitespace.
    breaks: Vec<usize>,
    pos: usize,
    /// Number of open `?` whose `:` has not been consumed yet.
    ternary_depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(text: &'a str) -> Self {
        let breaks = top_level_chars(text)
            .into_iter()
            .filter(|&(_, c)| c.is_whitespace())
            .map(|(i, _)| i)
            .collect();
        ExprParser {
            text,
            breaks,
            pos: 0,
            ternary_depth: 0,
        }
    }

    fn parse(mut self) -> Node {
        let node = self.parse_binary(LOWEST);
        if self.pos < self.text.len() {
            // Only reachable through a stray ` : `; keep it as text.
            let rest = &self.text[self.pos..];
            trace!(rest, "unparsed expression tail");
            return Node::list(vec![node, operand::parse_operand(rest)]);
        }
        node
    }

    fn is_break(&self, offset: usize) -> bool {
        self.breaks.binary_search(&offset).is_ok()
    }

    /// Skip a run of top-level whitespace starting at `offset`.
    fn skip_breaks(&self, mut offset: usize) -> usize {
        while self.is_break(offset) {
            offset += self.text[offset..].chars().next().map_or(1, char::len_utf8);
        }
        offset
    }

    /// A binary operator surrounded by whitespace at `offset`. Returns the
    /// operator and the offset of its right operand.
    fn peek_binary(&self, offset: usize) -> Option<(Operator, usize)> {
        if !self.is_break(offset) {
            return None;
        }
        let start = self.skip_breaks(offset);
        let rest = &self.text[start..];
        for &(lexeme, operator) in BINARY_OPERATORS {
            if !rest.starts_with(lexeme) {
                continue;
            }
            let end = start + lexeme.len();
            if !self.is_break(end) {
                continue;
            }
            if operator == Operator::Conditional && !self.has_colon_after(end) {
                continue;
            }
            return Some((operator, self.skip_breaks(end)));
        }
        None
    }

    /// A ` : ` at `offset`; returns the offset after it.
    fn peek_colon(&self, offset: usize) -> Option<usize> {
        if !self.is_break(offset) {
            return None;
        }
        let start = self.skip_breaks(offset);
        if !self.text[start..].starts_with(':') || !self.is_break(start + 1) {
            return None;
        }
        Some(self.skip_breaks(start + 1))
    }

    fn has_colon_after(&self, offset: usize) -> bool {
        self.breaks
            .iter()
            .filter(|&&b| b >= offset)
            .any(|&b| self.peek_colon(b).is_some())
    }

    /// End of the operand starting at `from`: the next top-level whitespace
    /// that begins an operator, or the end of the text.
    fn operand_end(&self, from: usize) -> usize {
        self.breaks
            .iter()
            .copied()
            .filter(|&b| b > from)
            .find(|&b| {
                self.peek_binary(b).is_some()
                    || (self.ternary_depth > 0 && self.peek_colon(b).is_some())
            })
            .unwrap_or(self.text.len())
    }

    fn parse_binary(&mut self, max_level: u8) -> Node {
        let mut left = self.parse_unary();
        while let Some((operator, after)) = self.peek_binary(self.pos) {
            let level = operator.precedence();
            if level > max_level {
                break;
            }
            self.pos = after;

            if operator == Operator::Conditional {
                self.ternary_depth += 1;
                let if_true = ensure_sufficient_stack(|| self.parse_binary(LOWEST));
                self.ternary_depth -= 1;
                let Some(after_colon) = self.peek_colon(self.pos) else {
                    return Node::parsing_error(
                        ParsingError::Eof,
                        "conditional operator is missing ` : `",
                    );
                };
                self.pos = after_colon;
                let if_false = ensure_sufficient_stack(|| self.parse_binary(LOWEST));
                left = Node::ternary(left, if_true, if_false);
                continue;
            }

            let next_level = if operator.is_right_associative() {
                level
            } else {
                level - 1
            };
            let right = ensure_sufficient_stack(|| self.parse_binary(next_level));
            left = Node::binary(operator, left, right);
        }
        left
    }

    fn parse_unary(&mut self) -> Node {
        let end = self.operand_end(self.pos);
        let extent = &self.text[self.pos..end];
        if let Some(node) = literal::parse_literal(extent) {
            self.pos = end;
            return node;
        }
        for &(lexeme, operator) in PREFIX_OPERATORS {
            let Some(rest) = extent.strip_prefix(lexeme) else {
                continue;
            };
            if rest.starts_with(|c: char| !c.is_whitespace()) {
                self.pos += lexeme.len();
                let operand =
                    ensure_sufficient_stack(|| self.parse_binary(Operator::Pow.precedence()));
                return Node::unary(operator, operand);
            }
        }
        self.pos = end;
        operand::parse_operand(extent)
    }
}
