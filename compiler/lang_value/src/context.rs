//! The interface native functions use to reach back into the interpreter.

use std::fmt;

use crate::{DataObject, FunctionPointer, InterpretingError};

/// Index of a scope in the interpreter's flat scope table.
///
/// Scope 0 is the script scope; a user function call runs in
/// `caller.child()`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub const fn new(index: usize) -> Self {
        ScopeId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn child(self) -> Self {
        ScopeId(self.0 + 1)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a linked script shares state with its caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LinkMode {
    /// Run in a fresh scope, copy translations back.
    Link,
    /// Run in a fresh scope, copy translations and variables back.
    BindLibrary,
    /// Run directly in the caller's scope.
    Include,
}

/// Interpreter services available to native callables.
///
/// Implemented by the interpreter; natives receive it as `&mut dyn
/// NativeContext` together with the caller's scope id.
pub trait NativeContext {
    /// Stamp `$LANG_ERRNO` of `scope`.
    fn set_errno(&mut self, error: InterpretingError, scope: ScopeId);

    /// Stamp errno and build the matching Error value.
    fn raise(
        &mut self,
        error: InterpretingError,
        message: Option<&str>,
        scope: ScopeId,
    ) -> DataObject {
        self.set_errno(error, scope);
        match message {
            Some(message) => DataObject::error_with_message(error, message),
            None => DataObject::error(error),
        }
    }

    /// Current value of a variable, without auto-vivification.
    fn variable(&self, name: &str, scope: ScopeId) -> Option<DataObject>;

    /// Mark a variable final. Returns `false` if it does not exist.
    fn make_variable_final(&mut self, name: &str, scope: ScopeId) -> bool;

    fn translation(&self, key: &str, scope: ScopeId) -> Option<String>;

    fn set_translation(&mut self, key: &str, value: &str, scope: ScopeId);

    /// Write to standard output through the host's print handler.
    fn print(&mut self, text: &str);

    /// Write to standard error through the host's print handler.
    fn print_error(&mut self, text: &str);

    /// Request that `from` (callee binding) is copied to `to` (caller
    /// binding) when the user function running in `scope` returns.
    fn copy_after_call(
        &mut self,
        to: &str,
        from: &str,
        scope: ScopeId,
    ) -> Result<(), InterpretingError>;

    /// Call a function pointer as if from script code in `scope`.
    fn call_function(
        &mut self,
        function: &FunctionPointer,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> Option<DataObject>;

    /// Next value of the shared generator, in `0..=LANG_RAND_MAX`.
    fn random(&mut self) -> i32;

    /// Load and run another script relative to `$LANG_PATH`.
    fn link(&mut self, path: &str, mode: LinkMode, scope: ScopeId) -> Option<DataObject>;
}
