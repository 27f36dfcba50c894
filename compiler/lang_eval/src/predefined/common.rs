//! Conversions, finality, errors, translations, randomness and `func.call`.

use lang_value::{Arity, DataObject, InterpretingError, NativeFunction};

use super::{argument, target_name};
use crate::registry::FunctionRegistry;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_builtin(NativeFunction::builtin(
        "text",
        Arity::Exact(1),
        |_, arguments, _| Some(DataObject::text(argument(&arguments, 0).to_text())),
    ));

    registry.register_builtin(NativeFunction::builtin(
        "number",
        Arity::Exact(1),
        |context, arguments, scope| {
            let value = argument(&arguments, 0);
            Some(match value.to_number() {
                Some(number) => DataObject::from_number(number),
                None => context.raise(InterpretingError::NoNum, None, scope),
            })
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "typeOf",
        Arity::Exact(1),
        |_, arguments, _| Some(DataObject::text(argument(&arguments, 0).data_type().name())),
    ));

    registry.register_builtin(NativeFunction::builtin(
        "len",
        Arity::Exact(1),
        |context, arguments, scope| {
            let value = argument(&arguments, 0);
            Some(value.op_len().unwrap_or_else(|| {
                let message = format!("{} has no length", value.data_type());
                context.raise(InterpretingError::InvalidArguments, Some(&message), scope)
            }))
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "deepCopy",
        Arity::Exact(1),
        |_, arguments, _| Some(argument(&arguments, 0).deep_copy()),
    ));

    registry.register_builtin(NativeFunction::builtin(
        "makeFinal",
        Arity::Exact(1),
        |context, arguments, scope| {
            let name = target_name(&argument(&arguments, 0));
            if context.make_variable_final(&name, scope) {
                None
            } else {
                let message = format!("{name} is not a variable");
                Some(context.raise(InterpretingError::InvalidArguments, Some(&message), scope))
            }
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "isFinal",
        Arity::Exact(1),
        |context, arguments, scope| {
            let value = argument(&arguments, 0);
            let is_final = match value.variable_name() {
                Some(name) => context
                    .variable(name, scope)
                    .is_some_and(|current| current.is_final()),
                None => value.is_final(),
            };
            Some(DataObject::bool(is_final))
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "copyAfterFP",
        Arity::Exact(2),
        |context, arguments, scope| {
            let to = target_name(&argument(&arguments, 0));
            let from = target_name(&argument(&arguments, 1));
            match context.copy_after_call(&to, &from, scope) {
                Ok(()) => None,
                Err(error) => {
                    let message = format!("can not copy {from} to {to}");
                    Some(context.raise(error, Some(&message), scope))
                }
            }
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "getErrorText",
        Arity::Exact(1),
        |context, arguments, scope| {
            let value = argument(&arguments, 0);
            let text = match value.as_error() {
                Some(error) => Some(error.message().to_string()),
                None => value
                    .to_int()
                    .and_then(InterpretingError::from_code)
                    .map(|error| error.description().to_string()),
            };
            Some(text.map_or_else(
                || context.raise(InterpretingError::InvalidArguments, None, scope),
                DataObject::text,
            ))
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "getTranslationValue",
        Arity::Exact(1),
        |context, arguments, scope| {
            let key = argument(&arguments, 0).to_text();
            Some(match context.translation(&key, scope) {
                Some(value) => DataObject::text(value),
                None => context.raise(InterpretingError::TransKeyNotFound, Some(&key), scope),
            })
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "rand",
        Arity::Exact(0),
        |context, _, _| Some(DataObject::int(context.random())),
    ));

    registry.register_builtin(NativeFunction::builtin(
        "call",
        Arity::AtLeast(1),
        |context, arguments, scope| {
            let mut arguments = arguments.into_iter();
            let callee = arguments.next().unwrap_or_else(DataObject::void);
            let Some(function) = callee.as_function_pointer() else {
                let message = format!("{} is not callable", callee.data_type());
                return Some(context.raise(InterpretingError::InvalidFuncPtr, Some(&message), scope));
            };
            context.call_function(function, arguments.collect(), scope)
        },
    ));
}
