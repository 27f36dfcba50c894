//! Best-effort conversions between variants.

use super::{parse_number, DataObject, DataValue, Number};

impl DataObject {
    /// Numeric view used by conversions, comparisons and arithmetic
    /// coercion. Text is parsed, Char yields its code point, Array its
    /// length, Error its code and a VarPointer its referent's number.
    pub fn to_number(&self) -> Option<Number> {
        self.to_number_at_depth(0)
    }

    fn to_number_at_depth(&self, depth: usize) -> Option<Number> {
        match &self.value {
            DataValue::Text(text) => parse_number(text),
            DataValue::Char(c) => Some(Number::Int(*c as i32)),
            DataValue::Int(v) => Some(Number::Int(*v)),
            DataValue::Long(v) => Some(Number::Long(*v)),
            DataValue::Float(v) => Some(Number::Float(*v)),
            DataValue::Double(v) => Some(Number::Double(*v)),
            DataValue::Array(array) => Some(Number::Int(array.len() as i32)),
            DataValue::Error(error) => Some(Number::Int(error.code())),
            DataValue::VarPointer(slot) if depth < super::compare::MAX_DEPTH => {
                slot.get().to_number_at_depth(depth + 1)
            }
            _ => None,
        }
    }

    /// Numeric view restricted to the four numeric variants.
    pub fn as_number(&self) -> Option<Number> {
        match self.value {
            DataValue::Int(v) => Some(Number::Int(v)),
            DataValue::Long(v) => Some(Number::Long(v)),
            DataValue::Float(v) => Some(Number::Float(v)),
            DataValue::Double(v) => Some(Number::Double(v)),
            _ => None,
        }
    }

    pub fn to_int(&self) -> Option<i32> {
        self.to_number().map(|n| match n {
            Number::Int(v) => v,
            other => other.to_i64() as i32,
        })
    }

    pub fn to_long(&self) -> Option<i64> {
        self.to_number().map(Number::to_i64)
    }

    pub fn to_float(&self) -> Option<f32> {
        self.to_number().map(Number::to_f32)
    }

    pub fn to_double(&self) -> Option<f64> {
        self.to_number().map(Number::to_f64)
    }

    /// Numbers convert through their code point; text only if it is a
    /// single character.
    pub fn to_char(&self) -> Option<char> {
        match &self.value {
            DataValue::Char(c) => Some(*c),
            DataValue::Text(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            DataValue::Int(_) | DataValue::Long(_) | DataValue::Float(_) | DataValue::Double(_) => {
                let code = u32::try_from(self.to_long()?).ok()?;
                char::from_u32(code)
            }
            _ => None,
        }
    }

    /// Truthiness. False for Null, Void, argument separators, empty text,
    /// empty arrays, zero numbers, `'\0'` and errors with code 0; pointers
    /// are always true.
    pub fn to_boolean(&self) -> bool {
        match &self.value {
            DataValue::Text(text) => !text.is_empty(),
            DataValue::Char(c) => *c != '\0',
            DataValue::Int(v) => *v != 0,
            DataValue::Long(v) => *v != 0,
            DataValue::Float(v) => *v != 0.0,
            DataValue::Double(v) => *v != 0.0,
            DataValue::Array(array) => !array.is_empty(),
            DataValue::Error(error) => error.code() != 0,
            DataValue::VarPointer(_) | DataValue::FunctionPointer(_) => true,
            DataValue::Null | DataValue::Void | DataValue::ArgumentSeparator(_) => false,
        }
    }
}
