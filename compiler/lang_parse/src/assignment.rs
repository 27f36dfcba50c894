//! Assignments, compound assignments and translation entries.

use lang_ir::{Node, Operator, ParsingError};

use crate::expr::{parse_expression, parse_plain_text};
use crate::function::split_function_header;
use crate::scan::{find_matching, is_variable_name, top_level_words};
use crate::Parser;

/// Split at the first top-level `=` or `op=` word that is not the first
/// word of the line.
pub(crate) fn split_assignment(text: &str) -> Option<(&str, &str, &str)> {
    top_level_words(text)
        .into_iter()
        .skip(1)
        .find(|&(start, end)| {
            let word = &text[start..end];
            word == "=" || Operator::from_compound_assignment(word).is_some()
        })
        .map(|(start, end)| (text[..start].trim(), &text[start..end], text[end..].trim()))
}

/// An assignable target: a variable name, optionally indexed
/// (`&list[0]`, `$grid[1][2]`).
pub(crate) fn parse_lvalue(text: &str) -> Option<Node> {
    if is_variable_name(text) {
        return Some(Node::variable(text));
    }
    let open = text.find('[')?;
    let base = &text[..open];
    if !is_variable_name(base) {
        return None;
    }
    let mut target = Node::variable(base);
    let mut rest_start = open;
    while rest_start < text.len() {
        if !text[rest_start..].starts_with('[') {
            return None;
        }
        let close = find_matching(text, rest_start)?;
        let index = parse_expression(&text[rest_start + 1..close]);
        target = Node::binary(Operator::GetItem, target, index);
        rest_start = close + 1;
    }
    Some(target)
}

/// Translation keys are single words that do not look like variables or
/// native references.
fn is_translation_key(text: &str) -> bool {
    !text.is_empty()
        && !text.contains(char::is_whitespace)
        && !["$", "&", "fp.", "func.", "linker."]
            .iter()
            .any(|prefix| text.starts_with(prefix))
}

fn invalid_assignment(text: &str, line: usize) -> Node {
    Node::parsing_error(
        ParsingError::InvalidAssignment,
        format!("line {line}: invalid assignment `{text}`"),
    )
}

impl Parser {
    /// Parse `text` as an assignment, or return `None` if it has no
    /// top-level assignment operator.
    pub(crate) fn parse_assignment(&mut self, text: &str, line: usize) -> Option<Node> {
        let (lvalue, operator, rvalue) = split_assignment(text)?;

        if operator == "=" {
            if let Some((parameters, form)) = split_function_header(rvalue) {
                let definition = self.parse_function_definition(parameters, form, line);
                if matches!(definition, Node::ParsingError(_)) {
                    return Some(definition);
                }
                return Some(match parse_lvalue(lvalue) {
                    Some(target) => Node::assignment(target, definition),
                    None => invalid_assignment(text, line),
                });
            }
        }

        let node = match (parse_lvalue(lvalue), Operator::from_compound_assignment(operator)) {
            (Some(target), None) => {
                let value = if rvalue.is_empty() {
                    Node::Void
                } else {
                    parse_expression(rvalue)
                };
                Node::assignment(target, value)
            }
            (Some(target), Some(operator)) => {
                let value = Node::binary(operator, target.clone(), parse_expression(rvalue));
                Node::assignment(target, value)
            }
            (None, None) if is_translation_key(lvalue) => {
                Node::assignment(Node::text(lvalue), parse_plain_text(rvalue))
            }
            (None, _) => invalid_assignment(text, line),
        };
        Some(node)
    }
}
