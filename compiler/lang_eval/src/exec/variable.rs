//! Variable resolution and assignment.
//!
//! Name forms:
//! - `$x`, `&x`, `fp.x`: plain lookup, auto-vivified as Null
//! - `$[x]`: a VarPointer to the slot of `$x`
//! - `$*p`, `$**p`: one dereference per star
//! - `func.x`, `linker.x`: a pointer to a registered native
//!
//! Unprocessed names come from free text (`Hello $name!`) and fall back to
//! the longest existing variable prefix.

use std::sync::Arc;

use lang_ir::{AssignmentNode, Node, OperationNode, Operator};
use lang_value::{
    resolve_index, DataObject, DataType, FunctionPointer, InterpretingError, ScopeId, Slot,
};

use crate::environment::{is_reserved_name, ERRNO_VARIABLE};
use crate::interpreter::Interpreter;
use crate::EvalResult;

/// `$**p` → `(2, "$p")`.
fn split_dereference(name: &str) -> Option<(usize, String)> {
    let rest = name.strip_prefix('$')?;
    let stars = rest.chars().take_while(|&c| c == '*').count();
    if stars == 0 {
        return None;
    }
    Some((stars, format!("${}", &rest[stars..])))
}

/// `$[$x]` or `$[x]` → `$x`.
fn reference_target(name: &str) -> Option<String> {
    let inner = name.strip_prefix("$[")?.strip_suffix(']')?.trim();
    if inner.starts_with(['$', '&']) || inner.starts_with("fp.") {
        Some(inner.to_string())
    } else {
        Some(format!("${inner}"))
    }
}

/// Whether `value` may be stored under `name`'s sigil.
fn fits_sigil(name: &str, value: &DataObject) -> bool {
    let data_type = value.data_type();
    if name.starts_with('&') {
        matches!(data_type, DataType::Array | DataType::Null)
    } else if name.starts_with("fp.") {
        matches!(data_type, DataType::FunctionPointer | DataType::Null)
    } else {
        true
    }
}

impl Interpreter {
    /// Value of a `VariableName` node.
    pub(crate) fn resolve_variable(&mut self, name: &str, scope: ScopeId) -> DataObject {
        if let Some(target) = reference_target(name) {
            return match self.slot_or_vivify(&target, scope) {
                Ok(slot) => DataObject::var_pointer(slot),
                Err(error) => error,
            };
        }
        if let Some((stars, base)) = split_dereference(name) {
            return match self.dereference(&base, stars, scope) {
                Ok(slot) => slot.get(),
                Err(error) => error,
            };
        }
        if name.starts_with("func.") || name.starts_with("linker.") {
            let native = self.registry.resolve(name).map(Arc::clone);
            return match native {
                Some(native) => DataObject::function_pointer(FunctionPointer::Native(native)),
                None => self.raise_error(InterpretingError::FunctionNotFound, Some(name), scope),
            };
        }
        self.read_or_vivify(name, scope)
    }

    /// Value of an `UnprocessedVariableName` node.
    pub(crate) fn resolve_unprocessed(&mut self, name: &str, scope: ScopeId) -> DataObject {
        if self.scope(scope).contains(name) {
            return self.read_or_vivify(name, scope);
        }
        let longest_prefix = (2..name.len())
            .rev()
            .filter(|&end| name.is_char_boundary(end))
            .find(|&end| self.scope(scope).contains(&name[..end]));
        if let Some(end) = longest_prefix {
            let value = self.read_or_vivify(&name[..end], scope);
            return DataObject::text(format!("{}{}", value.to_text(), &name[end..]));
        }
        self.read_or_vivify(name, scope)
    }

    /// Read a variable; reading `$LANG_ERRNO` clears it.
    fn read_variable(&mut self, name: &str, scope: ScopeId) -> Option<DataObject> {
        if name == ERRNO_VARIABLE {
            let code = self.scope_mut(scope).take_errno().code();
            return Some(DataObject::int(code).with_variable_name(name));
        }
        self.scope(scope).slot(name).map(Slot::get)
    }

    fn read_or_vivify(&mut self, name: &str, scope: ScopeId) -> DataObject {
        if let Some(value) = self.read_variable(name, scope) {
            return value;
        }
        match self.slot_or_vivify(name, scope) {
            Ok(slot) => slot.get(),
            Err(error) => error,
        }
    }

    /// Slot of `name`, created as Null if missing. Reserved names can not
    /// be created.
    pub(crate) fn slot_or_vivify(&mut self, name: &str, scope: ScopeId) -> Result<Slot, DataObject> {
        if let Some(slot) = self.scope(scope).slot(name) {
            return Ok(slot.clone());
        }
        if name == ERRNO_VARIABLE || is_reserved_name(name) {
            return Err(self.raise_error(InterpretingError::FinalVarChange, Some(name), scope));
        }
        Ok(self.scope_mut(scope).define(name, DataObject::null()))
    }

    /// Follow `stars` pointers starting at the slot of `base`.
    fn dereference(&mut self, base: &str, stars: usize, scope: ScopeId) -> Result<Slot, DataObject> {
        let mut slot = self.slot_or_vivify(base, scope)?;
        for _ in 0..stars {
            let value = slot.get();
            match value.as_var_pointer() {
                Some(target) => slot = target.clone(),
                None => {
                    return Err(self.raise_error(
                        InterpretingError::InvalidPtr,
                        Some(&format!("{base} is not a pointer")),
                        scope,
                    ))
                }
            }
        }
        Ok(slot)
    }

    pub(crate) fn eval_assignment(&mut self, node: &AssignmentNode, scope: ScopeId) -> EvalResult {
        let value = self.eval_value(&node.rvalue, scope)?;
        match node.lvalue.as_ref() {
            Node::VariableName(name) | Node::UnprocessedVariableName(name) => {
                Ok(Some(self.assign_variable(name, value, scope)))
            }
            Node::Operation(operation) if operation.operator == Operator::GetItem => {
                self.assign_item(operation, value, scope)
            }
            Node::Text(key) => {
                let text = value.to_text();
                self.scope_mut(scope).set_translation(key.as_str(), text.as_str());
                Ok(Some(DataObject::text(text)))
            }
            Node::ParsingError(error) => Ok(Some(self.raise_error(
                error.error.into(),
                error.message.as_deref(),
                scope,
            ))),
            _ => Ok(Some(self.raise_error(
                InterpretingError::InvalidAstNode,
                Some("invalid assignment target"),
                scope,
            ))),
        }
    }

    /// Store `value` under `name`, creating the binding if needed. Returns
    /// the value, or the Error value if the store was rejected.
    pub(crate) fn assign_variable(
        &mut self,
        name: &str,
        value: DataObject,
        scope: ScopeId,
    ) -> DataObject {
        if let Some((stars, base)) = split_dereference(name) {
            return match self.dereference(&base, stars, scope) {
                Ok(slot) => self.store(&slot, value, name, scope),
                Err(error) => error,
            };
        }
        if name.starts_with("$[") || name.starts_with("func.") || name.starts_with("linker.") {
            return self.raise_error(InterpretingError::InvalidAssignment, Some(name), scope);
        }
        if name == ERRNO_VARIABLE || is_reserved_name(name) {
            return self.raise_error(InterpretingError::FinalVarChange, Some(name), scope);
        }
        if !fits_sigil(name, &value) {
            let message = format!("{name} can not hold {}", value.data_type());
            return self.raise_error(InterpretingError::IncompatibleDataType, Some(&message), scope);
        }
        if let Some(slot) = self.scope(scope).slot(name).cloned() {
            return self.store(&slot, value, name, scope);
        }
        self.scope_mut(scope).define(name, value.copy_value());
        value
    }

    fn store(&mut self, slot: &Slot, value: DataObject, name: &str, scope: ScopeId) -> DataObject {
        match slot.assign(value.copy_value()) {
            Ok(()) => value,
            Err(_) => self.raise_error(InterpretingError::FinalVarChange, Some(name), scope),
        }
    }

    /// `&list[i] = value`.
    fn assign_item(
        &mut self,
        operation: &OperationNode,
        value: DataObject,
        scope: ScopeId,
    ) -> EvalResult {
        let Some(index_node) = operation.right.as_deref() else {
            return Ok(Some(self.raise_error(InterpretingError::InvalidAstNode, None, scope)));
        };
        let target = self.eval_value(&operation.left, scope)?;
        let index = self.eval_value(index_node, scope)?;
        let Some(array) = target.as_array() else {
            return Ok(Some(self.raise_error(InterpretingError::InvalidArrPtr, None, scope)));
        };
        let Some(index) = index.to_long() else {
            return Ok(Some(self.raise_error(InterpretingError::NoNum, None, scope)));
        };
        let Some(position) = resolve_index(index, array.len()) else {
            return Ok(Some(self.raise_error(
                InterpretingError::IndexOutOfBounds,
                Some(&format!("index {index} for length {}", array.len())),
                scope,
            )));
        };
        if array.set(position, value.copy_value()) {
            Ok(Some(value))
        } else {
            Ok(Some(self.raise_error(InterpretingError::FinalVarChange, None, scope)))
        }
    }
}
