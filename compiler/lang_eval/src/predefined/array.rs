//! Array construction and element access.

use lang_value::{
    resolve_index, Array, Arity, DataObject, InterpretingError, NativeContext, NativeFunction,
    ScopeId, MAX_ALLOCATION_LEN,
};

use super::argument;
use crate::registry::FunctionRegistry;

/// The array argument at `index` plus a resolved element position.
fn element_position(
    context: &mut dyn NativeContext,
    arguments: &[DataObject],
    scope: ScopeId,
) -> Result<(Array, usize), DataObject> {
    let target = argument(arguments, 0);
    let Some(array) = target.as_array().cloned() else {
        let message = format!("{} is not an array", target.data_type());
        return Err(context.raise(InterpretingError::InvalidArrPtr, Some(&message), scope));
    };
    let Some(index) = argument(arguments, 1).to_long() else {
        return Err(context.raise(InterpretingError::NoNum, None, scope));
    };
    match resolve_index(index, array.len()) {
        Some(position) => Ok((array, position)),
        None => {
            let message = format!("index {index} for length {}", array.len());
            Err(context.raise(InterpretingError::IndexOutOfBounds, Some(&message), scope))
        }
    }
}

fn array_length(
    context: &mut dyn NativeContext,
    arguments: Vec<DataObject>,
    scope: ScopeId,
) -> Option<DataObject> {
    let target = argument(&arguments, 0);
    Some(match target.as_array() {
        Some(array) => DataObject::int(array.len() as i32),
        None => context.raise(InterpretingError::InvalidArrPtr, None, scope),
    })
}

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_builtin(NativeFunction::builtin(
        "arrayOf",
        Arity::Any,
        |_, arguments, _| {
            Some(DataObject::array(
                arguments.iter().map(DataObject::copy_value).collect(),
            ))
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "arrayMake",
        Arity::Exact(1),
        |context, arguments, scope| {
            let Some(length) = argument(&arguments, 0).to_long() else {
                return Some(context.raise(InterpretingError::NoNum, None, scope));
            };
            let Ok(length) = usize::try_from(length) else {
                return Some(context.raise(InterpretingError::NegativeArrayLen, None, scope));
            };
            let mut elements = Vec::new();
            if length > MAX_ALLOCATION_LEN || elements.try_reserve_exact(length).is_err() {
                let message = format!("cannot allocate {length} elements");
                return Some(context.raise(InterpretingError::InvalidArguments, Some(&message), scope));
            }
            elements.resize_with(length, DataObject::null);
            Some(DataObject::array(elements))
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "arrayGet",
        Arity::Exact(2),
        |context, arguments, scope| {
            Some(match element_position(context, &arguments, scope) {
                Ok((array, position)) => array
                    .get(position)
                    .map_or_else(DataObject::null, |element| element.copy_value()),
                Err(error) => error,
            })
        },
    ));

    registry.register_builtin(NativeFunction::builtin(
        "arraySet",
        Arity::Exact(3),
        |context, arguments, scope| match element_position(context, &arguments, scope) {
            Ok((array, position)) => {
                let value = argument(&arguments, 2).copy_value();
                if array.set(position, value) {
                    None
                } else {
                    Some(context.raise(InterpretingError::FinalVarChange, None, scope))
                }
            }
            Err(error) => Some(error),
        },
    ));

    registry.register_builtin(
        NativeFunction::builtin("arrayLength", Arity::Exact(1), array_length)
            .deprecated("func.len"),
    );
}
