//! Function pointers and the native function registration types.

use std::fmt;
use std::sync::Arc;

use lang_ir::FunctionDefinition;

use crate::{DataObject, NativeContext, ScopeId};

/// Signature of a native callable: context, flattened arguments (argument
/// separators removed, except for [`Arity::JoinedText`]) and the caller's
/// scope id. `None` means Void.
pub type NativeFn =
    Arc<dyn Fn(&mut dyn NativeContext, Vec<DataObject>, ScopeId) -> Option<DataObject> + Send + Sync>;

/// Which namespace partition a native function lives in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NativeKind {
    /// Predefined library function, `func.name`.
    Builtin,
    /// Script composition function, `linker.name`.
    Linker,
    /// Host supplied function, `func.name` after the builtins.
    External,
}

/// Accepted argument shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
    /// All arguments, separators included, joined into one Text argument.
    JoinedText,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any | Arity::JoinedText => true,
        }
    }
}

/// A native callable with its registration metadata.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    kind: NativeKind,
    arity: Arity,
    deprecation: Option<Arc<str>>,
    callable: NativeFn,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<Arc<str>>, kind: NativeKind, arity: Arity, callable: F) -> Self
    where
        F: Fn(&mut dyn NativeContext, Vec<DataObject>, ScopeId) -> Option<DataObject>
            + Send
            + Sync
            + 'static,
    {
        NativeFunction {
            name: name.into(),
            kind,
            arity,
            deprecation: None,
            callable: Arc::new(callable),
        }
    }

    pub fn builtin<F>(name: impl Into<Arc<str>>, arity: Arity, callable: F) -> Self
    where
        F: Fn(&mut dyn NativeContext, Vec<DataObject>, ScopeId) -> Option<DataObject>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, NativeKind::Builtin, arity, callable)
    }

    pub fn linker<F>(name: impl Into<Arc<str>>, arity: Arity, callable: F) -> Self
    where
        F: Fn(&mut dyn NativeContext, Vec<DataObject>, ScopeId) -> Option<DataObject>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, NativeKind::Linker, arity, callable)
    }

    pub fn external<F>(name: impl Into<Arc<str>>, arity: Arity, callable: F) -> Self
    where
        F: Fn(&mut dyn NativeContext, Vec<DataObject>, ScopeId) -> Option<DataObject>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, NativeKind::External, arity, callable)
    }

    /// Mark deprecated; every call then raises a warning naming `replacement`.
    #[must_use]
    pub fn deprecated(mut self, replacement: impl Into<Arc<str>>) -> Self {
        self.deprecation = Some(replacement.into());
        self
    }

    /// Name without namespace prefix (`println`, not `func.println`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NativeKind {
        self.kind
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Replacement hint if deprecated.
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn is_external(&self) -> bool {
        self.kind == NativeKind::External
    }

    /// Prefixed name as written in scripts.
    pub fn qualified_name(&self) -> String {
        match self.kind {
            NativeKind::Linker => format!("linker.{}", self.name),
            NativeKind::Builtin | NativeKind::External => format!("func.{}", self.name),
        }
    }

    pub fn call(
        &self,
        context: &mut dyn NativeContext,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> Option<DataObject> {
        (self.callable)(context, arguments, scope)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .field("deprecation", &self.deprecation)
            .finish_non_exhaustive()
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

/// A callable value.
#[derive(Clone, Debug)]
pub enum FunctionPointer {
    /// Defined in script: parameters and body.
    User(Arc<FunctionDefinition>),
    Native(Arc<NativeFunction>),
}

impl FunctionPointer {
    pub fn native(function: NativeFunction) -> Self {
        FunctionPointer::Native(Arc::new(function))
    }
}

impl PartialEq for FunctionPointer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionPointer::User(a), FunctionPointer::User(b)) => Arc::ptr_eq(a, b) || a == b,
            (FunctionPointer::Native(a), FunctionPointer::Native(b)) => {
                Arc::ptr_eq(a, b) || a == b
            }
            _ => false,
        }
    }
}
