//! Output through the host's print handler.

use lang_value::{Arity, NativeFunction};

use super::argument;
use crate::registry::FunctionRegistry;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_builtin(NativeFunction::builtin(
        "print",
        Arity::JoinedText,
        |context, arguments, _| {
            context.print(&argument(&arguments, 0).to_text());
            None
        },
    ));
    registry.register_builtin(NativeFunction::builtin(
        "println",
        Arity::JoinedText,
        |context, arguments, _| {
            let mut line = argument(&arguments, 0).to_text();
            line.push('\n');
            context.print(&line);
            None
        },
    ));
    registry.register_builtin(NativeFunction::builtin(
        "printError",
        Arity::JoinedText,
        |context, arguments, _| {
            let mut line = argument(&arguments, 0).to_text();
            line.push('\n');
            context.print_error(&line);
            None
        },
    ));
}
