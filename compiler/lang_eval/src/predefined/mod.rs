//! The predefined `func.` and `linker.` functions.
//!
//! Each submodule registers one group. Natives only see the interpreter
//! through [`NativeContext`](lang_value::NativeContext); arity has been
//! checked before they run, so argument access falls back to Void instead
//! of failing.

mod array;
mod common;
mod io;
mod linker;

use lang_value::DataObject;

use crate::registry::FunctionRegistry;

/// Register every predefined function.
pub fn register(registry: &mut FunctionRegistry) {
    io::register(registry);
    common::register(registry);
    array::register(registry);
    linker::register(registry);
}

/// Argument `index`, Void if missing.
fn argument(arguments: &[DataObject], index: usize) -> DataObject {
    arguments.get(index).cloned().unwrap_or_else(DataObject::void)
}

/// Name of the variable an argument was read from, else its text. Lets
/// `func.makeFinal($a)` and `func.makeFinal(\$a)` both name `$a`.
fn target_name(value: &DataObject) -> String {
    value
        .variable_name()
        .map_or_else(|| value.to_text(), str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn target_name_prefers_binding() {
        let bound = DataObject::int(1).with_variable_name("$a");
        assert_eq!(target_name(&bound), "$a");
        assert_eq!(target_name(&DataObject::text("$b")), "$b");
    }

    #[test]
    fn missing_argument_is_void() {
        assert!(argument(&[], 0).is_void());
    }
}
