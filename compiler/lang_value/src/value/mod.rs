//! Runtime values for the Lang interpreter.
//!
//! A [`DataObject`] is a [`DataValue`] (the closed set of variants) plus the
//! binding metadata every value carries: the name of the variable it is bound
//! to and a final flag. Once final, every setter is a no-op.
//!
//! # Sharing
//!
//! Scalars and text are copied by value. Arrays ([`Array`]) and variable
//! slots ([`Slot`]) are `Arc` handles, so copying a value that holds one
//! aliases the same storage. [`DataObject::deep_copy`] is the only way to
//! obtain an independent array.
//!
//! # Locking
//!
//! Array and slot contents sit behind `parking_lot::RwLock`. Accessors clone
//! what they need and release the lock before recursing, so nested or
//! self-referential structures never take the same lock twice.

mod compare;
mod convert;
mod format;
mod number;
mod operators;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{FunctionPointer, InterpretingError};

pub use format::{format_double, format_float, CYCLIC_VALUE_TEXT};
pub use number::{parse_number, Number};
pub use operators::resolve_index;

/// Largest text (in bytes) or array (in elements) a single operation may
/// build. Larger requests yield an `INVALID_ARGUMENTS` error value.
pub const MAX_ALLOCATION_LEN: usize = 1 << 28;

/// Variant tag of a [`DataValue`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DataType {
    Text,
    Char,
    Int,
    Long,
    Float,
    Double,
    Array,
    VarPointer,
    FunctionPointer,
    Error,
    Null,
    Void,
    ArgumentSeparator,
}

impl DataType {
    pub const ALL: [DataType; 13] = [
        DataType::Text,
        DataType::Char,
        DataType::Int,
        DataType::Long,
        DataType::Float,
        DataType::Double,
        DataType::Array,
        DataType::VarPointer,
        DataType::FunctionPointer,
        DataType::Error,
        DataType::Null,
        DataType::Void,
        DataType::ArgumentSeparator,
    ];

    /// Name as reported by `func.typeOf`.
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::Char => "CHAR",
            DataType::Int => "INT",
            DataType::Long => "LONG",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Array => "ARRAY",
            DataType::VarPointer => "VAR_POINTER",
            DataType::FunctionPointer => "FUNCTION_POINTER",
            DataType::Error => "ERROR",
            DataType::Null => "NULL",
            DataType::Void => "VOID",
            DataType::ArgumentSeparator => "ARGUMENT_SEPARATOR",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The active variant of a value.
#[derive(Clone, Debug)]
pub enum DataValue {
    Text(Arc<str>),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Array(Array),
    VarPointer(Slot),
    FunctionPointer(FunctionPointer),
    Error(ErrorObject),
    Null,
    Void,
    /// Original separator text (`", "`), kept so joined-text parameters can
    /// reproduce the source spacing.
    ArgumentSeparator(Arc<str>),
}

impl DataValue {
    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::Text(_) => DataType::Text,
            DataValue::Char(_) => DataType::Char,
            DataValue::Int(_) => DataType::Int,
            DataValue::Long(_) => DataType::Long,
            DataValue::Float(_) => DataType::Float,
            DataValue::Double(_) => DataType::Double,
            DataValue::Array(_) => DataType::Array,
            DataValue::VarPointer(_) => DataType::VarPointer,
            DataValue::FunctionPointer(_) => DataType::FunctionPointer,
            DataValue::Error(_) => DataType::Error,
            DataValue::Null => DataType::Null,
            DataValue::Void => DataType::Void,
            DataValue::ArgumentSeparator(_) => DataType::ArgumentSeparator,
        }
    }
}

/// An error value: kind plus message (the kind's description unless a
/// custom message was given).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorObject {
    kind: InterpretingError,
    message: Arc<str>,
}

impl ErrorObject {
    pub fn new(kind: InterpretingError) -> Self {
        ErrorObject {
            kind,
            message: Arc::from(kind.description()),
        }
    }

    pub fn with_message(kind: InterpretingError, message: impl Into<Arc<str>>) -> Self {
        ErrorObject {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> InterpretingError {
        self.kind
    }

    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Shared, mutable, fixed-length array storage.
///
/// Cloning the handle aliases the storage; equality of handles is identity
/// ([`Array::ptr_eq`]).
#[derive(Clone)]
pub struct Array(Arc<RwLock<Vec<DataObject>>>);

impl Array {
    pub fn new(elements: Vec<DataObject>) -> Self {
        Array(Arc::new(RwLock::new(elements)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DataObject> {
        self.0.read().get(index).cloned()
    }

    /// Replace the element at `index`. Returns `false` if out of bounds or
    /// the element is final.
    pub fn set(&self, index: usize, value: DataObject) -> bool {
        let mut elements = self.0.write();
        match elements.get_mut(index) {
            Some(slot) if !slot.is_final() => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    /// Clone of the current elements; the lock is released on return.
    pub fn snapshot(&self) -> Vec<DataObject> {
        self.0.read().clone()
    }

    pub(crate) fn replace_elements(&self, elements: Vec<DataObject>) {
        *self.0.write() = elements;
    }

    /// Mark every element final (`func.makeFinal` on an array).
    pub fn make_elements_final(&self) {
        for element in self.0.write().iter_mut() {
            element.make_final();
        }
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array@{:#x}(len {})", self.addr(), self.len())
    }
}

/// A variable binding cell. Scopes map names to slots; a VarPointer holds a
/// slot so writes through the pointer reach the bound variable.
#[derive(Clone)]
pub struct Slot(Arc<RwLock<DataObject>>);

impl Slot {
    pub fn new(value: DataObject) -> Self {
        Slot(Arc::new(RwLock::new(value)))
    }

    /// Clone of the stored value.
    pub fn get(&self) -> DataObject {
        self.0.read().clone()
    }

    pub fn data_type(&self) -> DataType {
        self.0.read().data_type()
    }

    pub fn is_final(&self) -> bool {
        self.0.read().is_final()
    }

    /// Replace the stored value, keeping the slot's variable name.
    /// Fails without writing if the stored value is final.
    pub fn assign(&self, value: DataObject) -> Result<(), FinalValue> {
        let mut current = self.0.write();
        if current.is_final {
            return Err(FinalValue {
                variable_name: current.variable_name.clone(),
            });
        }
        let name = current.variable_name.take();
        *current = value;
        current.variable_name = name;
        Ok(())
    }

    /// Run `f` with mutable access to the stored value. Setters on a final
    /// value stay no-ops.
    pub fn update<R>(&self, f: impl FnOnce(&mut DataObject) -> R) -> R {
        f(&mut self.0.write())
    }

    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot@{:#x}", self.addr())
    }
}

/// A write was rejected because the target value is final.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("final value{} can not be changed", name_suffix(.variable_name.as_deref()))]
pub struct FinalValue {
    pub variable_name: Option<Arc<str>>,
}

fn name_suffix(name: Option<&str>) -> String {
    name.map(|name| format!(" `{name}`")).unwrap_or_default()
}

/// A runtime value with its binding metadata.
///
/// Equality (`==` in Rust) is the language's strict equality (`===`) on the
/// value; the variable name and final flag do not take part.
#[derive(Clone, Debug)]
pub struct DataObject {
    value: DataValue,
    variable_name: Option<Arc<str>>,
    is_final: bool,
}

impl PartialEq for DataObject {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl Default for DataObject {
    fn default() -> Self {
        DataObject::null()
    }
}

impl From<DataValue> for DataObject {
    fn from(value: DataValue) -> Self {
        DataObject::new(value)
    }
}

// Constructors

impl DataObject {
    pub fn new(value: DataValue) -> Self {
        DataObject {
            value,
            variable_name: None,
            is_final: false,
        }
    }

    pub fn text(text: impl Into<Arc<str>>) -> Self {
        DataObject::new(DataValue::Text(text.into()))
    }

    pub fn char(c: char) -> Self {
        DataObject::new(DataValue::Char(c))
    }

    pub fn int(v: i32) -> Self {
        DataObject::new(DataValue::Int(v))
    }

    pub fn long(v: i64) -> Self {
        DataObject::new(DataValue::Long(v))
    }

    pub fn float(v: f32) -> Self {
        DataObject::new(DataValue::Float(v))
    }

    pub fn double(v: f64) -> Self {
        DataObject::new(DataValue::Double(v))
    }

    /// Language booleans are the Ints `1` and `0`.
    pub fn bool(b: bool) -> Self {
        DataObject::int(i32::from(b))
    }

    pub fn array(elements: Vec<DataObject>) -> Self {
        DataObject::new(DataValue::Array(Array::new(elements)))
    }

    pub fn array_ref(array: Array) -> Self {
        DataObject::new(DataValue::Array(array))
    }

    pub fn var_pointer(slot: Slot) -> Self {
        DataObject::new(DataValue::VarPointer(slot))
    }

    pub fn function_pointer(function: FunctionPointer) -> Self {
        DataObject::new(DataValue::FunctionPointer(function))
    }

    pub fn error(kind: InterpretingError) -> Self {
        DataObject::new(DataValue::Error(ErrorObject::new(kind)))
    }

    pub fn error_with_message(kind: InterpretingError, message: impl Into<Arc<str>>) -> Self {
        DataObject::new(DataValue::Error(ErrorObject::with_message(kind, message)))
    }

    pub fn null() -> Self {
        DataObject::new(DataValue::Null)
    }

    pub fn void() -> Self {
        DataObject::new(DataValue::Void)
    }

    pub fn argument_separator(text: impl Into<Arc<str>>) -> Self {
        DataObject::new(DataValue::ArgumentSeparator(text.into()))
    }

    pub fn from_number(number: Number) -> Self {
        match number {
            Number::Int(v) => DataObject::int(v),
            Number::Long(v) => DataObject::long(v),
            Number::Float(v) => DataObject::float(v),
            Number::Double(v) => DataObject::double(v),
        }
    }

    /// Builder: bind to `name`.
    #[must_use]
    pub fn with_variable_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.variable_name = Some(name.into());
        self
    }

    /// Builder: mark final.
    #[must_use]
    pub fn into_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Same value in a fresh, unbound, non-final wrapper. Arrays and
    /// pointers stay shared.
    #[must_use]
    pub fn copy_value(&self) -> Self {
        DataObject::new(self.value.clone())
    }
}

// Getters

impl DataObject {
    pub fn value(&self) -> &DataValue {
        &self.value
    }

    pub fn into_value(self) -> DataValue {
        self.value
    }

    pub fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    pub fn variable_name(&self) -> Option<&str> {
        self.variable_name.as_deref()
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            DataValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self.value {
            DataValue::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            DataValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self.value {
            DataValue::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            DataValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            DataValue::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match &self.value {
            DataValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_var_pointer(&self) -> Option<&Slot> {
        match &self.value {
            DataValue::VarPointer(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn as_function_pointer(&self) -> Option<&FunctionPointer> {
        match &self.value {
            DataValue::FunctionPointer(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorObject> {
        match &self.value {
            DataValue::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, DataValue::Null)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.value, DataValue::Void)
    }

    pub fn is_argument_separator(&self) -> bool {
        matches!(self.value, DataValue::ArgumentSeparator(_))
    }
}

// Setters
//
// Host-facing API for embedders that keep `DataObject`s of their own (the
// interpreter itself replaces whole values through `Slot`). Every setter is a
// no-op on a final value. `try_set_value` reports the rejection instead.

impl DataObject {
    pub fn set_value(&mut self, value: DataValue) -> &mut Self {
        if !self.is_final {
            self.value = value;
        }
        self
    }

    pub fn try_set_value(&mut self, value: DataValue) -> Result<&mut Self, FinalValue> {
        if self.is_final {
            return Err(FinalValue {
                variable_name: self.variable_name.clone(),
            });
        }
        self.value = value;
        Ok(self)
    }

    /// Take over the value of `other` (arrays and pointers by reference).
    pub fn set_data(&mut self, other: &DataObject) -> &mut Self {
        self.set_value(other.value.clone())
    }

    pub fn set_text(&mut self, text: impl Into<Arc<str>>) -> &mut Self {
        self.set_value(DataValue::Text(text.into()))
    }

    pub fn set_char(&mut self, c: char) -> &mut Self {
        self.set_value(DataValue::Char(c))
    }

    pub fn set_int(&mut self, v: i32) -> &mut Self {
        self.set_value(DataValue::Int(v))
    }

    pub fn set_long(&mut self, v: i64) -> &mut Self {
        self.set_value(DataValue::Long(v))
    }

    pub fn set_float(&mut self, v: f32) -> &mut Self {
        self.set_value(DataValue::Float(v))
    }

    pub fn set_double(&mut self, v: f64) -> &mut Self {
        self.set_value(DataValue::Double(v))
    }

    pub fn set_array(&mut self, array: Array) -> &mut Self {
        self.set_value(DataValue::Array(array))
    }

    pub fn set_var_pointer(&mut self, slot: Slot) -> &mut Self {
        self.set_value(DataValue::VarPointer(slot))
    }

    pub fn set_function_pointer(&mut self, function: FunctionPointer) -> &mut Self {
        self.set_value(DataValue::FunctionPointer(function))
    }

    pub fn set_error(&mut self, error: ErrorObject) -> &mut Self {
        self.set_value(DataValue::Error(error))
    }

    pub fn set_null(&mut self) -> &mut Self {
        self.set_value(DataValue::Null)
    }

    pub fn set_void(&mut self) -> &mut Self {
        self.set_value(DataValue::Void)
    }

    /// Binding metadata; allowed on final values.
    pub fn set_variable_name(&mut self, name: Option<Arc<str>>) -> &mut Self {
        self.variable_name = name;
        self
    }

    pub fn make_final(&mut self) -> &mut Self {
        self.is_final = true;
        self
    }
}

#[cfg(test)]
mod tests;
