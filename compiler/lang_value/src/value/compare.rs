//! Loose equality, strict equality and ordering.
//!
//! Comparisons never fail: pairs without a meaningful relation compare as
//! unequal and unordered (every ordering test yields `false`).

use super::{DataObject, DataValue};

/// Nesting limit for element-wise comparison of arrays; deeper (cyclic)
/// structures compare unequal.
pub(crate) const MAX_DEPTH: usize = 256;

impl DataObject {
    /// `==`: same variants compare directly, other pairs through numeric
    /// coercion. Symmetric.
    pub fn loose_equals(&self, other: &DataObject) -> bool {
        loose_equals(self, other, 0)
    }

    /// `===`: same variant and same stored representation, no coercion.
    pub fn strict_equals(&self, other: &DataObject) -> bool {
        strict_equals(self, other, 0)
    }

    /// `<`
    pub fn less_than(&self, other: &DataObject) -> bool {
        less_than(self, other)
    }

    /// `>`
    pub fn greater_than(&self, other: &DataObject) -> bool {
        less_than(other, self)
    }

    /// `<=`
    pub fn less_than_or_equals(&self, other: &DataObject) -> bool {
        self.less_than(other) || self.loose_equals(other)
    }

    /// `>=`
    pub fn greater_than_or_equals(&self, other: &DataObject) -> bool {
        self.greater_than(other) || self.loose_equals(other)
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn is_marker(value: &DataValue) -> bool {
    matches!(
        value,
        DataValue::Null | DataValue::Void | DataValue::ArgumentSeparator(_)
    )
}

fn loose_equals(a: &DataObject, b: &DataObject, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match (&a.value, &b.value) {
        (DataValue::Null, DataValue::Null)
        | (DataValue::Void, DataValue::Void)
        | (DataValue::ArgumentSeparator(_), DataValue::ArgumentSeparator(_)) => true,
        (x, y) if is_marker(x) || is_marker(y) => false,

        (DataValue::Text(x), DataValue::Text(y)) => x == y,
        (DataValue::Char(x), DataValue::Char(y)) => x == y,
        (DataValue::Char(c), DataValue::Text(text)) | (DataValue::Text(text), DataValue::Char(c)) => {
            single_char(text) == Some(*c) || numeric_equals(a, b)
        }

        (DataValue::Error(x), DataValue::Error(y)) => x.kind() == y.kind(),
        (DataValue::Error(error), DataValue::Text(text))
        | (DataValue::Text(text), DataValue::Error(error)) => error.message() == &**text,

        (DataValue::Array(x), DataValue::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(&ys)
                    .all(|(l, r)| loose_equals(l, r, depth + 1))
        }

        (DataValue::VarPointer(x), DataValue::VarPointer(y)) => x.ptr_eq(y),
        (DataValue::VarPointer(_), _) | (_, DataValue::VarPointer(_)) => false,
        (DataValue::FunctionPointer(x), DataValue::FunctionPointer(y)) => x == y,
        (DataValue::FunctionPointer(_), _) | (_, DataValue::FunctionPointer(_)) => false,

        _ => numeric_equals(a, b),
    }
}

fn numeric_equals(a: &DataObject, b: &DataObject) -> bool {
    match (a.to_number(), b.to_number()) {
        (Some(x), Some(y)) => x.equals(y),
        _ => false,
    }
}

fn strict_equals(a: &DataObject, b: &DataObject, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match (&a.value, &b.value) {
        (DataValue::Text(x), DataValue::Text(y)) => x == y,
        (DataValue::Char(x), DataValue::Char(y)) => x == y,
        (DataValue::Int(x), DataValue::Int(y)) => x == y,
        (DataValue::Long(x), DataValue::Long(y)) => x == y,
        (DataValue::Float(x), DataValue::Float(y)) => x == y,
        (DataValue::Double(x), DataValue::Double(y)) => x == y,
        (DataValue::Array(x), DataValue::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(&ys)
                    .all(|(l, r)| strict_equals(l, r, depth + 1))
        }
        (DataValue::VarPointer(x), DataValue::VarPointer(y)) => x.ptr_eq(y),
        (DataValue::FunctionPointer(x), DataValue::FunctionPointer(y)) => x == y,
        (DataValue::Error(x), DataValue::Error(y)) => x == y,
        (DataValue::Null, DataValue::Null) | (DataValue::Void, DataValue::Void) => true,
        (DataValue::ArgumentSeparator(x), DataValue::ArgumentSeparator(y)) => x == y,
        _ => false,
    }
}

fn less_than(a: &DataObject, b: &DataObject) -> bool {
    match (&a.value, &b.value) {
        (x, y) if is_marker(x) || is_marker(y) => false,
        (DataValue::VarPointer(_) | DataValue::FunctionPointer(_), _)
        | (_, DataValue::VarPointer(_) | DataValue::FunctionPointer(_)) => false,

        (DataValue::Text(x), DataValue::Text(y)) => x < y,
        (DataValue::Char(x), DataValue::Char(y)) => x < y,
        (DataValue::Char(c), DataValue::Text(text)) => match single_char(text) {
            Some(t) => *c < t,
            None => numeric_less_than(a, b),
        },
        (DataValue::Text(text), DataValue::Char(c)) => match single_char(text) {
            Some(t) => t < *c,
            None => numeric_less_than(a, b),
        },
        _ => numeric_less_than(a, b),
    }
}

fn numeric_less_than(a: &DataObject, b: &DataObject) -> bool {
    match (a.to_number(), b.to_number()) {
        (Some(x), Some(y)) => x.less_than(y),
        _ => false,
    }
}
