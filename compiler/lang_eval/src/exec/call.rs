//! The call protocol.
//!
//! User functions run in `caller.child()` on a copy-down snapshot of the
//! caller's bindings. On return the callee's translations are merged back,
//! `func.copyAfterFP` write-backs are applied and the callee scope is
//! discarded. Natives get the flattened argument list (or one joined Text)
//! and the caller's scope id.

use std::sync::Arc;

use lang_ir::{FunctionCallNode, FunctionDefinition, Node, Parameter, ParameterKind};
use lang_value::{
    Arity, DataObject, DataType, ErrorObject, FunctionPointer, InterpretingError, NativeFunction,
    ScopeId, Slot,
};
use tracing::{trace, warn};

use crate::diagnostics::CallFrame;
use crate::interpreter::Interpreter;
use crate::{ControlAction, EvalResult};

/// Arguments joined back into text with their original separators.
pub(crate) fn join_arguments(arguments: &[DataObject]) -> String {
    arguments.iter().map(DataObject::to_text).collect()
}

/// Display name of a callee, for call frames.
fn function_name(function: &FunctionPointer) -> String {
    match function {
        FunctionPointer::Native(native) => native.qualified_name(),
        FunctionPointer::User(_) => "<anonymous>".to_string(),
    }
}

impl Interpreter {
    pub(crate) fn eval_function_call(&mut self, call: &FunctionCallNode, scope: ScopeId) -> EvalResult {
        let function = match self.resolve_callee(&call.name, scope) {
            Ok(function) => function,
            Err(error) => return Ok(Some(error)),
        };
        let arguments = self.eval_arguments(&call.arguments, scope)?;
        self.call_function_pointer(&function, &call.name, arguments, scope)
    }

    /// `value(args)`: call the previous value if it is a function pointer,
    /// otherwise it is text followed by a parenthesized argument list.
    pub(crate) fn eval_previous_value_call(
        &mut self,
        previous: Option<DataObject>,
        arguments: &[Node],
        scope: ScopeId,
    ) -> EvalResult {
        let values = self.eval_arguments(arguments, scope)?;
        match previous {
            Some(previous) if previous.data_type() == DataType::FunctionPointer => {
                let name = previous.variable_name().unwrap_or("<anonymous>").to_string();
                match previous.as_function_pointer() {
                    Some(function) => self.call_function_pointer(function, &name, values, scope),
                    None => Ok(None),
                }
            }
            previous => {
                let mut text = previous.map(|value| value.to_text()).unwrap_or_default();
                text.push('(');
                text.push_str(&join_arguments(&values));
                text.push(')');
                Ok(Some(DataObject::text(text)))
            }
        }
    }

    /// `func.x` / `linker.x` from the registry; `fp.x`, `$x` and bare `x`
    /// from variables, bare names falling back to the registry.
    fn resolve_callee(&mut self, name: &str, scope: ScopeId) -> Result<FunctionPointer, DataObject> {
        let native = |interpreter: &Self, name: &str| {
            interpreter
                .registry
                .resolve(name)
                .map(|native| FunctionPointer::Native(Arc::clone(native)))
        };
        if name.starts_with("func.") || name.starts_with("linker.") {
            return native(self, name).ok_or_else(|| {
                self.raise_error(InterpretingError::FunctionNotFound, Some(name), scope)
            });
        }

        let bare = !(name.starts_with("fp.") || name.starts_with(['$', '&']));
        let variable = if bare {
            format!("fp.{name}")
        } else {
            name.to_string()
        };
        if let Some(value) = self.peek_variable(&variable, scope) {
            return match value.as_function_pointer() {
                Some(function) => Ok(function.clone()),
                None => Err(self.raise_error(InterpretingError::InvalidFuncPtr, Some(name), scope)),
            };
        }
        if bare {
            let found = native(self, &format!("func.{name}"))
                .or_else(|| native(self, &format!("linker.{name}")));
            if let Some(function) = found {
                return Ok(function);
            }
        }
        Err(self.raise_error(InterpretingError::FunctionNotFound, Some(name), scope))
    }

    /// Evaluate argument nodes, keeping separators for joined-text callees.
    fn eval_arguments(&mut self, nodes: &[Node], scope: ScopeId) -> Result<Vec<DataObject>, ControlAction> {
        let mut arguments = Vec::with_capacity(nodes.len());
        for node in nodes {
            arguments.push(self.eval_value(node, scope)?);
        }
        Ok(arguments)
    }

    /// Call any function pointer. `arguments` may contain separators.
    pub(crate) fn call_function_pointer(
        &mut self,
        function: &FunctionPointer,
        name: &str,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> EvalResult {
        match function {
            FunctionPointer::Native(native) => self.call_native(native, arguments, scope),
            FunctionPointer::User(definition) => self.call_user(definition, name, arguments, scope),
        }
    }

    /// Call from native code: arguments come without separators.
    pub(crate) fn call_from_native(
        &mut self,
        function: &FunctionPointer,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> EvalResult {
        let mut with_separators = Vec::with_capacity(arguments.len() * 2);
        for (i, argument) in arguments.into_iter().enumerate() {
            if i > 0 {
                with_separators.push(DataObject::argument_separator(", "));
            }
            with_separators.push(argument);
        }
        self.call_function_pointer(function, &function_name(function), with_separators, scope)
    }

    #[tracing::instrument(level = "trace", skip(self, native, arguments), fields(name = native.name()))]
    fn call_native(
        &mut self,
        native: &Arc<NativeFunction>,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> EvalResult {
        let arguments = match native.arity() {
            Arity::JoinedText => vec![DataObject::text(join_arguments(&arguments))],
            arity => {
                let flattened: Vec<DataObject> = arguments
                    .into_iter()
                    .filter(|argument| !argument.is_argument_separator())
                    .collect();
                if !arity.accepts(flattened.len()) {
                    let message = format!(
                        "{} does not take {} argument(s)",
                        native.qualified_name(),
                        flattened.len()
                    );
                    return Ok(Some(self.raise_error(
                        InterpretingError::InvalidArgCount,
                        Some(&message),
                        scope,
                    )));
                }
                flattened
            }
        };
        if let Some(replacement) = native.deprecation() {
            warn!(
                function = %native.qualified_name(),
                replacement,
                "call to deprecated function"
            );
            self.stamp_errno(InterpretingError::DeprecatedFuncCall, scope);
        }

        let native = Arc::clone(native);
        let result = native.call(self, arguments, scope);
        match self.pending.take() {
            Some(signal) => Err(signal),
            None => Ok(result),
        }
    }

    #[tracing::instrument(level = "debug", skip(self, definition, arguments), fields(depth = self.call_stack.depth()))]
    fn call_user(
        &mut self,
        definition: &Arc<FunctionDefinition>,
        name: &str,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> EvalResult {
        if let Err(exceeded) = self.call_stack.push(CallFrame {
            name: Arc::from(name),
        }) {
            let message = format!("{name}: call depth limit {} reached", exceeded.max_depth);
            return Ok(Some(self.raise_error(
                InterpretingError::StackOverflow,
                Some(&message),
                scope,
            )));
        }

        let callee = scope.child();
        let frame = self.scope(scope).copy_down();
        self.scopes.truncate(callee.index());
        self.scopes.push(frame);

        let result = match self.bind_parameters(&definition.parameters, &arguments, scope, callee) {
            Err(error) => Ok(Some(error)),
            Ok(()) => match self.execute_block(&definition.body, callee) {
                Ok(_) | Err(ControlAction::Break(_) | ControlAction::Continue(_)) => Ok(None),
                Err(ControlAction::Return(value)) => Ok(value),
                Err(ControlAction::Throw(error)) => {
                    if self.throw_propagates(scope) {
                        Err(ControlAction::Throw(error))
                    } else {
                        trace!(error = %error.to_text(), "throw became the call's value");
                        if let Some(kind) = error.as_error().map(ErrorObject::kind) {
                            self.stamp_errno(kind, scope);
                        }
                        Ok(Some(error))
                    }
                }
                Err(ControlAction::Stop) => Err(ControlAction::Stop),
            },
        };

        self.finish_call(scope, callee);
        self.call_stack.pop();
        result
    }

    /// Bind parameters left to right in the callee scope. Errors are raised
    /// in the caller.
    fn bind_parameters(
        &mut self,
        parameters: &[Parameter],
        arguments: &[DataObject],
        caller: ScopeId,
        callee: ScopeId,
    ) -> Result<(), DataObject> {
        // Positions of the real arguments among the separators.
        let positions: Vec<usize> = arguments
            .iter()
            .enumerate()
            .filter(|(_, argument)| !argument.is_argument_separator())
            .map(|(i, _)| i)
            .collect();

        let mut next = 0;
        for parameter in parameters {
            let name = parameter.name.as_str();
            let bound = match parameter.kind {
                ParameterKind::VarArgs => {
                    let start = positions.get(next).copied().unwrap_or(arguments.len());
                    let rest = &arguments[start..];
                    next = positions.len();
                    if name.starts_with('&') {
                        DataObject::array(
                            rest.iter()
                                .filter(|argument| !argument.is_argument_separator())
                                .map(DataObject::copy_value)
                                .collect(),
                        )
                    } else {
                        DataObject::text(join_arguments(rest))
                    }
                }
                ParameterKind::Normal | ParameterKind::CallByPointer => {
                    let Some(argument) = positions.get(next).map(|&i| &arguments[i]) else {
                        let message = format!("missing argument for {name}");
                        return Err(self.raise_error(
                            InterpretingError::InvalidArgCount,
                            Some(&message),
                            caller,
                        ));
                    };
                    next += 1;
                    if parameter.kind == ParameterKind::CallByPointer {
                        DataObject::var_pointer(self.argument_slot(argument, caller))
                    } else {
                        self.check_parameter_type(name, argument, caller)?;
                        argument.copy_value()
                    }
                }
            };
            self.scope_mut(callee).define(name, bound);
        }

        if next < positions.len() {
            let message = format!(
                "{} argument(s) given, {} expected",
                positions.len(),
                parameters.len()
            );
            return Err(self.raise_error(
                InterpretingError::InvalidArgCount,
                Some(&message),
                caller,
            ));
        }
        Ok(())
    }

    fn check_parameter_type(
        &mut self,
        name: &str,
        argument: &DataObject,
        caller: ScopeId,
    ) -> Result<(), DataObject> {
        let data_type = argument.data_type();
        let fits = if name.starts_with('&') {
            matches!(data_type, DataType::Array | DataType::Null)
        } else if name.starts_with("fp.") {
            data_type == DataType::FunctionPointer
        } else {
            true
        };
        if fits {
            Ok(())
        } else {
            let message = format!("{name} can not take {data_type}");
            Err(self.raise_error(
                InterpretingError::IncompatibleDataType,
                Some(&message),
                caller,
            ))
        }
    }

    /// Slot for a call-by-pointer argument: the caller's binding if the
    /// argument is a variable, otherwise a fresh slot.
    fn argument_slot(&self, argument: &DataObject, caller: ScopeId) -> Slot {
        argument
            .variable_name()
            .and_then(|name| self.scope(caller).slot(name))
            .cloned()
            .unwrap_or_else(|| Slot::new(argument.copy_value()))
    }

    /// Merge translations, apply write-backs and drop the callee scope.
    fn finish_call(&mut self, caller: ScopeId, callee: ScopeId) {
        self.scopes.truncate(callee.index() + 1);
        let Some(mut frame) = self.scopes.pop() else {
            return;
        };
        let target = self.scope_mut(caller);
        for (key, value) in frame.translations() {
            target.set_translation(key, value);
        }
        for write_back in frame.take_write_backs() {
            if let Some(value) = frame.slot(&write_back.from).map(Slot::get) {
                self.assign_variable(&write_back.to, value, caller);
            }
        }
    }
}
