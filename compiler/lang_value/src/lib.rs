//! Lang Value - the runtime value model of the Lang interpreter.
//!
//! This crate provides:
//! - [`DataObject`]: a tagged value ([`DataValue`]) with owner name and
//!   final flag, plus conversions, comparisons and operators
//! - [`InterpretingError`]: the closed set of runtime error/warning kinds
//! - [`FunctionPointer`] and [`NativeFunction`]: callable values and the
//!   native registration types
//! - [`NativeContext`]: the seam through which native functions reach the
//!   interpreter (implemented by `lang_eval`)
//!
//! # Errors Are Values
//!
//! Nothing in this crate fails with a Rust error for language-level
//! conditions: operators return `Option<DataObject>` (`None` = undefined for
//! the operand variants) and arithmetic failures are Error values.

mod context;
mod function;
mod interpreting_error;
mod value;

#[cfg(test)]
mod tests;

pub use context::{LinkMode, NativeContext, ScopeId};
pub use function::{Arity, FunctionPointer, NativeFn, NativeFunction, NativeKind};
pub use interpreting_error::InterpretingError;
pub use value::{
    format_double, format_float, parse_number, resolve_index, Array, DataObject, DataType,
    DataValue, ErrorObject, FinalValue, Number, Slot, CYCLIC_VALUE_TEXT, MAX_ALLOCATION_LEN,
};
