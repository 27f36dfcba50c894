//! `linker.link`, `linker.bindLibrary` and `linker.include`.

use lang_value::{Arity, LinkMode, NativeFunction};

use super::argument;
use crate::registry::FunctionRegistry;

pub(super) fn register(registry: &mut FunctionRegistry) {
    for (name, mode) in [
        ("link", LinkMode::Link),
        ("bindLibrary", LinkMode::BindLibrary),
        ("include", LinkMode::Include),
    ] {
        registry.register_linker(NativeFunction::linker(
            name,
            Arity::Exact(1),
            move |context, arguments, scope| {
                let path = argument(&arguments, 0).to_text();
                context.link(&path, mode, scope)
            },
        ));
    }
}
