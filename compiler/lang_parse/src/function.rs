//! Function definitions.
//!
//! ```text
//! fp.name = ($a, &b, $[c], $rest...) -> {     # or `:` instead of `->`
//!     …
//! }
//! fp.name = ($a) -> $a * 2                     # one line body
//! function name($a) {
//!     …
//! }
//! ```

use lang_ir::{Node, Parameter, ParameterKind, ParsingError};
use tracing::debug;

use crate::expr::parse_expression;
use crate::scan::{find_matching, identifier_len, is_variable_name, split_top_level_commas};
use crate::statement::BoundaryKind;
use crate::Parser;

/// Where the body of a definition is.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BodyForm<'a> {
    /// `{` on the header line, body on the following lines.
    Block,
    /// `-> expr` on the header line.
    Line(&'a str),
}

/// Split `(params) -> …` into the parameter text and the body form.
pub(crate) fn split_function_header(text: &str) -> Option<(&str, BodyForm<'_>)> {
    if !text.starts_with('(') {
        return None;
    }
    let close = find_matching(text, 0)?;
    let parameters = &text[1..close];
    let rest = text[close + 1..].trim_start();
    if let Some(body) = rest.strip_prefix("->") {
        let body = body.trim();
        return Some(if body == "{" {
            (parameters, BodyForm::Block)
        } else {
            (parameters, BodyForm::Line(body))
        });
    }
    let body = rest.strip_prefix(':')?;
    (body.trim() == "{").then_some((parameters, BodyForm::Block))
}

fn parse_parameter(text: &str) -> Option<Parameter> {
    if let Some(name) = text.strip_suffix("...") {
        let valid = (name.starts_with('$') || name.starts_with('&'))
            && is_variable_name(name)
            && !name.contains('*');
        return valid.then(|| Parameter::new(name, ParameterKind::VarArgs));
    }
    if let Some(inner) = text.strip_prefix("$[").and_then(|t| t.strip_suffix(']')) {
        let name = inner.strip_prefix('$').unwrap_or(inner);
        let valid = !name.is_empty() && identifier_len(name) == name.len();
        return valid.then(|| Parameter::new(format!("${name}"), ParameterKind::CallByPointer));
    }
    (is_variable_name(text) && !text.contains('*'))
        .then(|| Parameter::new(text, ParameterKind::Normal))
}

/// Parse a parameter list. A variadic parameter is only valid last.
pub(crate) fn parse_parameters(text: &str) -> Result<Vec<Parameter>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<&str> = split_top_level_commas(text)
        .into_iter()
        .map(str::trim)
        .collect();
    let mut parameters = Vec::with_capacity(raw.len());
    for (i, text) in raw.iter().enumerate() {
        let parameter = parse_parameter(text).ok_or_else(|| format!("invalid parameter `{text}`"))?;
        if parameter.kind == ParameterKind::VarArgs && i + 1 != raw.len() {
            return Err(format!("variadic parameter `{text}` must be last"));
        }
        parameters.push(parameter);
    }
    Ok(parameters)
}

impl Parser {
    /// Read a `{ … }` function body up to its closing `}`.
    fn parse_function_body(&mut self, line: usize) -> Result<Vec<Node>, Node> {
        let mut body = Vec::new();
        loop {
            let (nodes, boundary) = self.parse_body();
            body.extend(nodes);
            match boundary {
                None => {
                    return Err(Node::parsing_error(
                        ParsingError::Eof,
                        format!("line {line}: function body is not closed"),
                    ))
                }
                Some(boundary) if boundary.kind == BoundaryKind::Close => return Ok(body),
                Some(boundary) => body.push(boundary.misplaced()),
            }
        }
    }

    /// Build a function definition node from its header parts.
    pub(crate) fn parse_function_definition(
        &mut self,
        parameters: &str,
        form: BodyForm<'_>,
        line: usize,
    ) -> Node {
        let parameters = parse_parameters(parameters);
        let body = match form {
            BodyForm::Block => match self.parse_function_body(line) {
                Ok(body) => body,
                Err(error) => return error,
            },
            BodyForm::Line(expression) => {
                vec![Node::Return(Some(Box::new(parse_expression(expression))))]
            }
        };
        match parameters {
            Ok(parameters) => {
                debug!(line, parameters = parameters.len(), "function definition");
                Node::function_definition(parameters, body)
            }
            Err(message) => Node::parsing_error(
                ParsingError::InvalidParameter,
                format!("line {line}: {message}"),
            ),
        }
    }

    /// `function name(params) {`, with the text after `function `.
    pub(crate) fn parse_named_function(&mut self, text: &str, line: usize) -> Node {
        let name = text.strip_prefix("fp.").unwrap_or(text);
        let name_len = identifier_len(name);
        let header = name[name_len..].trim_start();
        let parameters = (name_len > 0 && header.starts_with('('))
            .then(|| find_matching(header, 0))
            .flatten()
            .filter(|&close| header[close + 1..].trim() == "{")
            .map(|close| &header[1..close]);
        let Some(parameters) = parameters else {
            return Node::parsing_error(
                ParsingError::InvalidParameter,
                format!("line {line}: malformed function header `function {text}`"),
            );
        };
        let definition = self.parse_function_definition(parameters, BodyForm::Block, line);
        if matches!(definition, Node::ParsingError(_)) {
            return definition;
        }
        Node::assignment(Node::variable(format!("fp.{}", &name[..name_len])), definition)
    }
}

#[cfg(test)]
mod tests;
