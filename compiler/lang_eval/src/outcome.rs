//! Control flow signals and the result of running a script.

use lang_value::DataObject;

/// A non-local exit travelling up the evaluator.
///
/// Evaluators return `Err(ControlAction)` instead of a value; each construct
/// consumes the signals it owns (loops take `Break`/`Continue`, calls take
/// `Return`, `try` takes `Throw`) and passes the rest on.
#[derive(Clone, Debug)]
pub enum ControlAction {
    /// `return [value]`.
    Return(Option<DataObject>),
    /// `throw error`; the payload is always an Error value.
    Throw(DataObject),
    /// `break n`, `n >= 1` loops up.
    Break(usize),
    /// `continue n`, `n >= 1` loops up.
    Continue(usize),
    /// The host raised the stop flag.
    Stop,
}

/// Result of evaluating one node: a value, Void (`None`) or a signal.
pub type EvalResult = Result<Option<DataObject>, ControlAction>;

/// How a script run ended.
#[derive(Clone, Debug)]
pub enum ExecutionOutcome {
    /// The last statement ran.
    Completed,
    /// A top-level `return`.
    Returned(Option<DataObject>),
    /// A `throw` that no `try` caught.
    Thrown(DataObject),
    /// The stop flag was raised.
    Stopped,
}

impl ExecutionOutcome {
    /// Value of a top-level `return`, if any.
    pub fn returned_value(&self) -> Option<&DataObject> {
        match self {
            ExecutionOutcome::Returned(value) => value.as_ref(),
            _ => None,
        }
    }

    pub fn is_thrown(&self) -> bool {
        matches!(self, ExecutionOutcome::Thrown(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, ExecutionOutcome::Stopped)
    }
}
