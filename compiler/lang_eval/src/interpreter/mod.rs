//! The `Interpreter`: scope table, registered functions and host services.
//!
//! Node evaluation lives in [`crate::exec`]; this module owns the state it
//! works on and the host-facing API (running scripts, errno, variables,
//! registration).

mod builder;
mod context;
mod link;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lang_ir::Node;
use lang_value::{DataObject, InterpretingError, NativeFunction, ScopeId};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::diagnostics::CallStack;
use crate::environment::{Scope, ERRNO_VARIABLE};
use crate::print_handler::SharedPrintHandler;
use crate::random::SharedRandom;
use crate::registry::FunctionRegistry;
use crate::source::SourceLoader;
use crate::{ControlAction, EvalResult, ExecutionOutcome};

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use link::MAX_LINK_DEPTH;

/// Which kind of `try` block is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TryMode {
    /// Catches throws from any depth of calls made in its body.
    Hard,
    /// Catches throws from functions called directly in its body.
    Soft,
    /// Calls made in its body never propagate throws.
    Suspend,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TryFrame {
    pub mode: TryMode,
    pub scope: ScopeId,
}

/// Tree-walking interpreter for Lang scripts.
///
/// Not `Sync`: one interpreter runs one script at a time. Hosts share the
/// print handler, random generator and stop flag between interpreters
/// through [`InterpreterBuilder`].
pub struct Interpreter {
    /// Flat scope table; index = [`ScopeId`].
    pub(crate) scopes: Vec<Scope>,
    pub(crate) registry: FunctionRegistry,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) loader: Arc<dyn SourceLoader>,
    pub(crate) random: SharedRandom,
    pub(crate) stop: Arc<AtomicBool>,
    pub(crate) call_stack: CallStack,
    pub(crate) try_frames: SmallVec<[TryFrame; 4]>,
    /// Signal raised inside a native callback (`func.call`, links), handed
    /// back to the evaluator when the native returns.
    pub(crate) pending: Option<ControlAction>,
    pub(crate) link_depth: usize,
}

impl Interpreter {
    /// Interpreter with default configuration.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Parse and run `source` in the root scope.
    pub fn run(&mut self, source: &str) -> ExecutionOutcome {
        let nodes = lang_parse::parse(source);
        self.execute(&nodes)
    }

    /// Run parsed statements in the root scope. State (variables,
    /// translations, errno) persists across runs.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = nodes.len()))]
    pub fn execute(&mut self, nodes: &[Node]) -> ExecutionOutcome {
        self.pending = None;
        self.try_frames.clear();
        let result = self.execute_block(nodes, ScopeId::ROOT);
        self.scopes.truncate(1);
        self.into_outcome(result)
    }

    fn into_outcome(&mut self, result: EvalResult) -> ExecutionOutcome {
        match result {
            Ok(_) | Err(ControlAction::Break(_) | ControlAction::Continue(_)) => {
                ExecutionOutcome::Completed
            }
            Err(ControlAction::Return(value)) => ExecutionOutcome::Returned(value),
            Err(ControlAction::Throw(error)) => {
                if let Some(kind) = error.as_error().map(lang_value::ErrorObject::kind) {
                    self.stamp_errno(kind, ScopeId::ROOT);
                }
                warn!(error = %error.to_text(), "uncaught throw ended the script");
                ExecutionOutcome::Thrown(error)
            }
            Err(ControlAction::Stop) => ExecutionOutcome::Stopped,
        }
    }

    /// Errno of the root scope, left in place.
    pub fn errno(&self) -> InterpretingError {
        self.scopes
            .first()
            .map_or(InterpretingError::NoError, Scope::errno)
    }

    /// Errno of the root scope, cleared.
    pub fn take_errno(&mut self) -> InterpretingError {
        self.scopes
            .first_mut()
            .map_or(InterpretingError::NoError, Scope::take_errno)
    }

    /// Current value of a root scope variable.
    pub fn variable(&self, name: &str) -> Option<DataObject> {
        self.peek_variable(name, ScopeId::ROOT)
    }

    /// Depth of the user function call stack; zero between runs.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Root scope translation.
    pub fn translation(&self, key: &str) -> Option<&str> {
        self.scopes.first().and_then(|scope| scope.translation(key))
    }

    pub fn register_builtin(&mut self, function: NativeFunction) {
        self.registry.register_builtin(function);
    }

    pub fn register_linker(&mut self, function: NativeFunction) {
        self.registry.register_linker(function);
    }

    pub fn register_external(&mut self, function: NativeFunction) {
        self.registry.register_external(function);
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Raising this flag stops the script at the next statement boundary.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub(crate) fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Variable lookup without auto-vivification; `$LANG_ERRNO` is not
    /// cleared.
    pub(crate) fn peek_variable(&self, name: &str, scope: ScopeId) -> Option<DataObject> {
        let scope = self.scopes.get(scope.index())?;
        if name == ERRNO_VARIABLE {
            return Some(DataObject::int(scope.errno().code()).with_variable_name(name));
        }
        scope.slot(name).map(lang_value::Slot::get)
    }

    /// Stamp the errno cell of `scope`.
    pub(crate) fn stamp_errno(&mut self, error: InterpretingError, scope: ScopeId) {
        if error.is_warning() {
            warn!(code = error.code(), %error, %scope, "warning raised");
        } else {
            debug!(code = error.code(), %error, %scope, "errno stamped");
        }
        if let Some(scope) = self.scopes.get_mut(scope.index()) {
            scope.set_errno(error);
        }
    }

    /// Stamp errno and build the matching Error value.
    pub(crate) fn raise_error(
        &mut self,
        error: InterpretingError,
        message: Option<&str>,
        scope: ScopeId,
    ) -> DataObject {
        self.stamp_errno(error, scope);
        match message {
            Some(message) => DataObject::error_with_message(
                error,
                format!("{}: {message}", error.description()),
            ),
            None => DataObject::error(error),
        }
    }

    /// Whether a throw leaving a function called from `caller` is caught by
    /// an active `try` instead of becoming the call's value.
    pub(crate) fn throw_propagates(&self, caller: ScopeId) -> bool {
        for frame in self.try_frames.iter().rev() {
            match frame.mode {
                TryMode::Suspend => return false,
                TryMode::Hard => return true,
                TryMode::Soft if frame.scope == caller => return true,
                TryMode::Soft => {}
            }
        }
        false
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
