//! `NativeContext` for the interpreter: what native functions may do.

use lang_value::{
    DataObject, FunctionPointer, InterpretingError, LinkMode, NativeContext, ScopeId,
};

use super::Interpreter;
use crate::environment::WriteBack;

/// Sigil of a variable name, `None` if it is not one.
fn sigil(name: &str) -> Option<&'static str> {
    ["$", "&", "fp."]
        .into_iter()
        .find(|sigil| name.len() > sigil.len() && name.starts_with(sigil))
}

impl NativeContext for Interpreter {
    fn set_errno(&mut self, error: InterpretingError, scope: ScopeId) {
        self.stamp_errno(error, scope);
    }

    fn variable(&self, name: &str, scope: ScopeId) -> Option<DataObject> {
        self.peek_variable(name, scope)
    }

    fn make_variable_final(&mut self, name: &str, scope: ScopeId) -> bool {
        match self.scopes.get(scope.index()).and_then(|s| s.slot(name)) {
            Some(slot) => {
                slot.update(|value| {
                    value.make_final();
                });
                true
            }
            None => false,
        }
    }

    fn translation(&self, key: &str, scope: ScopeId) -> Option<String> {
        self.scopes
            .get(scope.index())
            .and_then(|s| s.translation(key))
            .map(str::to_string)
    }

    fn set_translation(&mut self, key: &str, value: &str, scope: ScopeId) {
        if let Some(scope) = self.scopes.get_mut(scope.index()) {
            scope.set_translation(key, value);
        }
    }

    fn print(&mut self, text: &str) {
        self.print_handler.print(text);
    }

    fn print_error(&mut self, text: &str) {
        self.print_handler.print_error(text);
    }

    fn copy_after_call(
        &mut self,
        to: &str,
        from: &str,
        scope: ScopeId,
    ) -> Result<(), InterpretingError> {
        // Only a user function has a caller to copy into.
        if scope == ScopeId::ROOT {
            return Err(InterpretingError::InvalidArguments);
        }
        match (sigil(to), sigil(from)) {
            (Some(a), Some(b)) if a == b => {}
            _ => return Err(InterpretingError::InvalidArguments),
        }
        let scope = self
            .scopes
            .get_mut(scope.index())
            .ok_or(InterpretingError::InvalidArguments)?;
        scope.push_write_back(WriteBack {
            to: to.to_string(),
            from: from.to_string(),
        });
        Ok(())
    }

    fn call_function(
        &mut self,
        function: &FunctionPointer,
        arguments: Vec<DataObject>,
        scope: ScopeId,
    ) -> Option<DataObject> {
        match self.call_from_native(function, arguments, scope) {
            Ok(value) => value,
            Err(signal) => {
                self.pending = Some(signal);
                None
            }
        }
    }

    fn random(&mut self) -> i32 {
        self.random.lock().next_int()
    }

    fn link(&mut self, path: &str, mode: LinkMode, scope: ScopeId) -> Option<DataObject> {
        self.link_script(path, mode, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::sigil;

    #[test]
    fn sigils() {
        assert_eq!(sigil("$a"), Some("$"));
        assert_eq!(sigil("&a"), Some("&"));
        assert_eq!(sigil("fp.a"), Some("fp."));
        assert_eq!(sigil("$"), None);
        assert_eq!(sigil("a"), None);
    }
}
