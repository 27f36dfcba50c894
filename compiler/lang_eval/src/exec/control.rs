//! `if`, loops and `try`.

use lang_ir::{IfStatement, LoopKind, LoopStatement, Node, TryKind, TryStatement};
use lang_value::{DataObject, ErrorObject, InterpretingError, ScopeId};

use crate::interpreter::{Interpreter, TryFrame, TryMode};
use crate::{ControlAction, EvalResult};

/// What a loop does after one run of its body.
enum LoopStep {
    Next,
    Exit,
}

impl Interpreter {
    /// Run the first part whose condition holds (`else` has none).
    pub(crate) fn eval_if(&mut self, statement: &IfStatement, scope: ScopeId) -> EvalResult {
        for part in &statement.parts {
            let taken = match &part.condition {
                Some(condition) => self.eval_value(condition, scope)?.to_boolean(),
                None => true,
            };
            if taken {
                self.execute_block(&part.body, scope)?;
                return Ok(None);
            }
        }
        Ok(None)
    }

    /// One run of a loop body, consuming the signals addressed to this loop.
    fn run_iteration(&mut self, body: &[Node], scope: ScopeId) -> Result<LoopStep, ControlAction> {
        if self.stop_requested() {
            return Err(ControlAction::Stop);
        }
        match self.execute_block(body, scope) {
            Ok(_) => Ok(LoopStep::Next),
            Err(ControlAction::Break(level)) if level <= 1 => Ok(LoopStep::Exit),
            Err(ControlAction::Break(level)) => Err(ControlAction::Break(level - 1)),
            Err(ControlAction::Continue(level)) if level <= 1 => Ok(LoopStep::Next),
            Err(ControlAction::Continue(level)) => Err(ControlAction::Continue(level - 1)),
            Err(signal) => Err(signal),
        }
    }

    pub(crate) fn eval_loop(&mut self, statement: &LoopStatement, scope: ScopeId) -> EvalResult {
        let Some((main, rest)) = statement.parts.split_first() else {
            return Ok(None);
        };
        let else_body = rest
            .iter()
            .find(|part| matches!(part.kind, LoopKind::Else))
            .map(|part| part.body.as_slice());
        let body = main.body.as_slice();

        let ran = match &main.kind {
            LoopKind::Loop => {
                while let LoopStep::Next = self.run_iteration(body, scope)? {}
                true
            }
            LoopKind::While(condition) | LoopKind::Until(condition) => {
                let until = matches!(main.kind, LoopKind::Until(_));
                let mut ran = false;
                while self.eval_value(condition, scope)?.to_boolean() != until {
                    ran = true;
                    if let LoopStep::Exit = self.run_iteration(body, scope)? {
                        break;
                    }
                }
                ran
            }
            LoopKind::Repeat { variable, count } => {
                let count_value = self.eval_value(count, scope)?;
                let Some(count) = count_value.to_long() else {
                    return Ok(Some(self.raise_error(
                        InterpretingError::NoNum,
                        Some("repeat count is not a number"),
                        scope,
                    )));
                };
                if count < 0 {
                    return Ok(Some(self.raise_error(
                        InterpretingError::NegativeRepeatCount,
                        None,
                        scope,
                    )));
                }
                for i in 0..count {
                    if let Some(variable) = variable {
                        let value = i32::try_from(i).map_or_else(|_| DataObject::long(i), DataObject::int);
                        self.assign_loop_variable(variable, value, scope);
                    }
                    if let LoopStep::Exit = self.run_iteration(body, scope)? {
                        break;
                    }
                }
                count > 0
            }
            LoopKind::ForEach {
                variable,
                collection,
            } => {
                let collection = self.eval_value(collection, scope)?;
                let items: Vec<DataObject> = if let Some(array) = collection.as_array() {
                    array.snapshot()
                } else if let Some(text) = collection.as_text() {
                    text.chars().map(DataObject::char).collect()
                } else {
                    let message = format!("can not iterate over {}", collection.data_type());
                    return Ok(Some(self.raise_error(
                        InterpretingError::IncompatibleDataType,
                        Some(&message),
                        scope,
                    )));
                };
                for item in &items {
                    self.assign_loop_variable(variable, item.copy_value(), scope);
                    if let LoopStep::Exit = self.run_iteration(body, scope)? {
                        break;
                    }
                }
                !items.is_empty()
            }
            LoopKind::Else => false,
        };

        if !ran {
            if let Some(else_body) = else_body {
                self.execute_block(else_body, scope)?;
            }
        }
        Ok(None)
    }

    fn assign_loop_variable(&mut self, variable: &Node, value: DataObject, scope: ScopeId) {
        match variable {
            Node::VariableName(name) | Node::UnprocessedVariableName(name) => {
                self.assign_variable(name, value, scope);
            }
            _ => {
                self.raise_error(
                    InterpretingError::InvalidAstNode,
                    Some("loop variable must be a variable name"),
                    scope,
                );
            }
        }
    }

    /// `try` / `softtry` / `nontry` with their `catch`, `else` and `finally`
    /// parts.
    pub(crate) fn eval_try(&mut self, statement: &TryStatement, scope: ScopeId) -> EvalResult {
        let Some((main, rest)) = statement.parts.split_first() else {
            return Ok(None);
        };
        let mode = match main.kind {
            TryKind::Try => TryMode::Hard,
            TryKind::SoftTry => TryMode::Soft,
            TryKind::NonTry => TryMode::Suspend,
            TryKind::Catch(_) | TryKind::Else | TryKind::Finally => {
                return Ok(Some(self.raise_error(
                    InterpretingError::InvalidAstNode,
                    Some("try statement without a try part"),
                    scope,
                )));
            }
        };

        self.try_frames.push(TryFrame { mode, scope });
        let result = self.execute_block(&main.body, scope);
        self.try_frames.pop();

        let mut outcome = match result {
            Err(ControlAction::Throw(error)) => self.catch(rest, error, scope),
            Ok(_) => match rest.iter().find(|part| part.kind == TryKind::Else) {
                Some(part) => self.execute_block(&part.body, scope).map(|_| None),
                None => Ok(None),
            },
            Err(signal) => Err(signal),
        };

        if let Some(finally) = rest.iter().find(|part| part.kind == TryKind::Finally) {
            if let Err(signal) = self.execute_block(&finally.body, scope) {
                outcome = Err(signal);
            }
        }
        outcome
    }

    /// Run the first matching `catch`; rethrow if none matches.
    fn catch(
        &mut self,
        parts: &[lang_ir::TryPart],
        error: DataObject,
        scope: ScopeId,
    ) -> EvalResult {
        for part in parts {
            let TryKind::Catch(filter) = &part.kind else {
                continue;
            };
            if self.catch_matches(filter.as_deref(), &error, scope)? {
                return self.execute_block(&part.body, scope).map(|_| None);
            }
        }
        Err(ControlAction::Throw(error))
    }

    /// An empty filter catches everything; otherwise an entry matches by
    /// Error value or numeric code.
    fn catch_matches(
        &mut self,
        filter: Option<&[Node]>,
        error: &DataObject,
        scope: ScopeId,
    ) -> Result<bool, ControlAction> {
        let Some(entries) = filter else {
            return Ok(true);
        };
        let thrown = error.as_error().map(ErrorObject::kind);
        for entry in entries {
            if matches!(entry, Node::ArgumentSeparator(_)) {
                continue;
            }
            let candidate = self.eval_value(entry, scope)?;
            let kind = match candidate.as_error() {
                Some(error) => Some(error.kind()),
                None => candidate.to_int().and_then(InterpretingError::from_code),
            };
            if kind.is_some() && kind == thrown {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
