//! Registration table for native functions.
//!
//! Three partitions: predefined `func.` functions, `linker.` functions and
//! host supplied externals. `func.name` looks at the predefined partition
//! first, so a host can not shadow a library function by accident.
//!
//! The partition is always the one named by [`NativeFunction::kind`]; the
//! `register_*` entry point only states what the caller expects.

use std::sync::Arc;

use lang_value::{NativeFunction, NativeKind};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    builtins: FxHashMap<Arc<str>, Arc<NativeFunction>>,
    linkers: FxHashMap<Arc<str>, Arc<NativeFunction>>,
    externals: FxHashMap<Arc<str>, Arc<NativeFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_builtin(&mut self, function: NativeFunction) {
        self.insert(NativeKind::Builtin, function);
    }

    pub fn register_linker(&mut self, function: NativeFunction) {
        self.insert(NativeKind::Linker, function);
    }

    pub fn register_external(&mut self, function: NativeFunction) {
        self.insert(NativeKind::External, function);
    }

    /// Register into the partition of the function's own kind, replacing a
    /// previous function of the same name there.
    fn insert(&mut self, expected: NativeKind, function: NativeFunction) {
        let name: Arc<str> = Arc::from(function.name());
        let kind = function.kind();
        if kind != expected {
            warn!(name = %name, ?kind, ?expected, "native function registered through the wrong entry point");
        }
        debug!(name = %name, ?kind, "registering native function");
        let table = match kind {
            NativeKind::Builtin => &mut self.builtins,
            NativeKind::Linker => &mut self.linkers,
            NativeKind::External => &mut self.externals,
        };
        table.insert(name, Arc::new(function));
    }

    /// `func.name`: predefined functions, then externals.
    pub fn function(&self, name: &str) -> Option<&Arc<NativeFunction>> {
        self.builtins
            .get(name)
            .or_else(|| self.externals.get(name))
    }

    /// `linker.name`.
    pub fn linker(&self, name: &str) -> Option<&Arc<NativeFunction>> {
        self.linkers.get(name)
    }

    /// Resolve a prefixed name (`func.x` or `linker.x`).
    pub fn resolve(&self, qualified: &str) -> Option<&Arc<NativeFunction>> {
        if let Some(name) = qualified.strip_prefix("func.") {
            self.function(name)
        } else if let Some(name) = qualified.strip_prefix("linker.") {
            self.linker(name)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.builtins.len() + self.linkers.len() + self.externals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use lang_value::{Arity, DataObject};

    use super::*;

    fn constant(name: &str, kind: NativeKind, value: i32) -> NativeFunction {
        NativeFunction::new(name, kind, Arity::Exact(0), move |_, _, _| {
            Some(DataObject::int(value))
        })
    }

    #[test]
    fn partitions_are_separate() {
        let mut registry = FunctionRegistry::new();
        registry.register_builtin(constant("len", NativeKind::Builtin, 1));
        registry.register_linker(constant("link", NativeKind::Linker, 2));
        assert!(registry.resolve("func.len").is_some());
        assert!(registry.resolve("linker.len").is_none());
        assert!(registry.resolve("linker.link").is_some());
        assert!(registry.resolve("func.link").is_none());
        assert!(registry.resolve("len").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn builtins_win_over_externals() {
        let mut registry = FunctionRegistry::new();
        registry.register_external(constant("len", NativeKind::External, 2));
        registry.register_builtin(constant("len", NativeKind::Builtin, 1));
        registry.register_external(constant("host", NativeKind::External, 3));
        let len = registry.function("len").map(|f| f.kind());
        assert_eq!(len, Some(NativeKind::Builtin));
        let host = registry.function("host").map(|f| f.kind());
        assert_eq!(host, Some(NativeKind::External));
    }

    #[test]
    fn kind_decides_the_namespace() {
        let mut registry = FunctionRegistry::new();
        registry.register_builtin(constant("link", NativeKind::Linker, 1));
        registry.register_linker(constant("host", NativeKind::External, 2));
        assert!(registry.resolve("func.link").is_none());
        assert_eq!(
            registry.resolve("linker.link").map(|f| f.kind()),
            Some(NativeKind::Linker)
        );
        assert!(registry.resolve("linker.host").is_none());
        assert_eq!(
            registry.resolve("func.host").map(|f| f.kind()),
            Some(NativeKind::External)
        );
    }
}
