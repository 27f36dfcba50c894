//! Statement sequencing and the node dispatch.

use std::sync::Arc;

use lang_ir::Node;
use lang_stack::ensure_sufficient_stack;
use lang_value::{DataObject, FunctionPointer, InterpretingError, ScopeId};
use smallvec::SmallVec;

use crate::interpreter::Interpreter;
use crate::{ControlAction, EvalResult};

impl Interpreter {
    /// Run statements in order; the value of the last one is the block's.
    /// The stop flag is checked before every statement.
    pub(crate) fn execute_block(&mut self, nodes: &[Node], scope: ScopeId) -> EvalResult {
        let mut last = None;
        for node in nodes {
            if self.stop_requested() {
                return Err(ControlAction::Stop);
            }
            last = self.eval_node(node, scope)?;
        }
        Ok(last)
    }

    pub(crate) fn eval_node(&mut self, node: &Node, scope: ScopeId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_node_inner(node, scope))
    }

    /// Evaluate and turn Void into a Void value.
    pub(crate) fn eval_value(
        &mut self,
        node: &Node,
        scope: ScopeId,
    ) -> Result<DataObject, ControlAction> {
        Ok(self.eval_node(node, scope)?.unwrap_or_else(DataObject::void))
    }

    fn eval_node_inner(&mut self, node: &Node, scope: ScopeId) -> EvalResult {
        match node {
            Node::List(nodes) => self.eval_list(nodes, scope),
            Node::Assignment(assignment) => self.eval_assignment(assignment, scope),
            Node::EscapeSequence(c) => Ok(Some(self.eval_escape(*c, scope))),
            Node::UnprocessedVariableName(name) => Ok(Some(self.resolve_unprocessed(name, scope))),
            Node::VariableName(name) => Ok(Some(self.resolve_variable(name, scope))),
            Node::ArgumentSeparator(text) => {
                Ok(Some(DataObject::argument_separator(text.as_str())))
            }
            Node::FunctionCall(call) => self.eval_function_call(call, scope),
            Node::FunctionCallPreviousNodeValue(arguments) => {
                self.eval_previous_value_call(None, arguments, scope)
            }
            Node::FunctionDefinition(definition) => Ok(Some(DataObject::function_pointer(
                FunctionPointer::User(Arc::clone(definition)),
            ))),
            Node::Operation(operation) => self.eval_operation(operation, scope),
            Node::If(statement) => self.eval_if(statement, scope),
            Node::Loop(statement) => self.eval_loop(statement, scope),
            Node::Try(statement) => self.eval_try(statement, scope),
            Node::Break(level) => Err(ControlAction::Break(
                self.eval_level(level.as_deref(), scope)?,
            )),
            Node::Continue(level) => Err(ControlAction::Continue(
                self.eval_level(level.as_deref(), scope)?,
            )),
            Node::Return(value) => {
                let value = match value {
                    Some(node) => self.eval_node(node, scope)?.map(|value| value.copy_value()),
                    None => None,
                };
                Err(ControlAction::Return(value))
            }
            Node::Throw(payload) => {
                let value = self.eval_value(payload, scope)?;
                if value.as_error().is_some() {
                    Err(ControlAction::Throw(value.copy_value()))
                } else {
                    Err(ControlAction::Throw(self.raise_error(
                        InterpretingError::IncompatibleDataType,
                        Some("throw needs an error value"),
                        scope,
                    )))
                }
            }
            Node::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    let value = self.eval_node(element, scope)?;
                    values.push(value.map_or_else(DataObject::null, |value| value.copy_value()));
                }
                Ok(Some(DataObject::array(values)))
            }
            Node::Int(v) => Ok(Some(DataObject::int(*v))),
            Node::Long(v) => Ok(Some(DataObject::long(*v))),
            Node::Float(v) => Ok(Some(DataObject::float(*v))),
            Node::Double(v) => Ok(Some(DataObject::double(*v))),
            Node::Char(c) => Ok(Some(DataObject::char(*c))),
            Node::Text(text) => Ok(Some(DataObject::text(text.as_str()))),
            Node::Null => Ok(Some(DataObject::null())),
            Node::Void => Ok(None),
            Node::ParsingError(error) => Ok(Some(self.raise_error(
                error.error.into(),
                error.message.as_deref(),
                scope,
            ))),
        }
    }

    /// Adjacent pieces of one expression. A single value keeps its type;
    /// several are concatenated as text. A call on the previous value takes
    /// the piece before it as the callee.
    fn eval_list(&mut self, nodes: &[Node], scope: ScopeId) -> EvalResult {
        let mut values: SmallVec<[DataObject; 4]> = SmallVec::new();
        for node in nodes {
            let value = match node {
                Node::FunctionCallPreviousNodeValue(arguments) => {
                    let previous = values.pop();
                    self.eval_previous_value_call(previous, arguments, scope)?
                }
                _ => self.eval_node(node, scope)?,
            };
            if let Some(value) = value.filter(|value| !value.is_void()) {
                values.push(value);
            }
        }
        Ok(match values.len() {
            0 => None,
            1 => values.pop(),
            _ => Some(DataObject::text(
                values.iter().map(DataObject::to_text).collect::<String>(),
            )),
        })
    }

    /// `\x` escapes. Unknown ones warn and stand for the character itself.
    fn eval_escape(&mut self, c: char, scope: ScopeId) -> DataObject {
        let mapped = match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\u{c}',
            'b' => '\u{8}',
            '0' => '\0',
            's' => ' ',
            // Empty pieces, used to split tokens.
            'e' | '!' => return DataObject::text(""),
            c if c.is_ascii_punctuation() => c,
            other => {
                self.stamp_errno(InterpretingError::UndefEscapeSequence, scope);
                other
            }
        };
        DataObject::char(mapped)
    }

    /// Level of `break n` / `continue n`; missing or invalid means 1.
    fn eval_level(&mut self, level: Option<&Node>, scope: ScopeId) -> Result<usize, ControlAction> {
        let Some(node) = level else {
            return Ok(1);
        };
        let value = self.eval_value(node, scope)?;
        match value.to_long().and_then(|n| usize::try_from(n).ok()) {
            Some(n) if n >= 1 => Ok(n),
            _ => {
                self.raise_error(
                    InterpretingError::InvalidArguments,
                    Some("loop level must be a positive number"),
                    scope,
                );
                Ok(1)
            }
        }
    }
}
