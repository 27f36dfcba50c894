//! Operator semantics.
//!
//! Every operator is a total function from operands to `Option<DataObject>`:
//! `None` means the operator is not defined for these variants (the
//! interpreter reports `INVALID_ARGUMENTS`), and arithmetic failures such as
//! integral division by zero are `Some(Error value)`. Nothing here panics.
//!
//! Numeric operands are promoted Int → Long → Float → Double; integral
//! arithmetic wraps.

use rustc_hash::FxHashMap;

use super::number::NumberPair;
use super::{parse_number, Array, DataObject, DataValue, Number, MAX_ALLOCATION_LEN};
use crate::InterpretingError;

fn shift_char(c: char, delta: i64) -> Option<DataObject> {
    let code = i64::from(u32::from(c)).checked_add(delta)?;
    let code = u32::try_from(code).ok()?;
    char::from_u32(code).map(DataObject::char)
}

fn integral(value: &DataObject) -> Option<i64> {
    match value.value {
        DataValue::Int(v) => Some(i64::from(v)),
        DataValue::Long(v) => Some(v),
        _ => None,
    }
}

fn numbers(a: &DataObject, b: &DataObject) -> Option<NumberPair> {
    Some(a.as_number()?.pair(b.as_number()?))
}

fn floor_div_i32(a: i32, b: i32) -> i32 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

fn floor_div_i64(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

fn copies(elements: &[DataObject]) -> impl DoubleEndedIterator<Item = DataObject> + '_ {
    elements.iter().map(DataObject::copy_value)
}

// Unary operators

impl DataObject {
    /// `+x`: numeric identity; text is parsed as a number.
    pub fn op_pos(&self) -> Option<DataObject> {
        match &self.value {
            DataValue::Int(_) | DataValue::Long(_) | DataValue::Float(_) | DataValue::Double(_) => {
                Some(self.copy_value())
            }
            DataValue::Text(text) => parse_number(text).map(DataObject::from_number),
            DataValue::Char(c) => Some(DataObject::int(*c as i32)),
            _ => None,
        }
    }

    /// `-x`: negation; reverses text and arrays.
    pub fn op_inv(&self) -> Option<DataObject> {
        match &self.value {
            DataValue::Int(v) => Some(DataObject::int(v.wrapping_neg())),
            DataValue::Long(v) => Some(DataObject::long(v.wrapping_neg())),
            DataValue::Float(v) => Some(DataObject::float(-v)),
            DataValue::Double(v) => Some(DataObject::double(-v)),
            DataValue::Text(text) => Some(DataObject::text(text.chars().rev().collect::<String>())),
            DataValue::Array(array) => {
                let elements = array.snapshot();
                Some(DataObject::array(copies(&elements).rev().collect()))
            }
            _ => None,
        }
    }

    /// `!x`: logical negation of the truth value.
    pub fn op_not(&self) -> Option<DataObject> {
        Some(DataObject::bool(!self.to_boolean()))
    }

    /// `~x`
    pub fn op_bitwise_not(&self) -> Option<DataObject> {
        match self.value {
            DataValue::Int(v) => Some(DataObject::int(!v)),
            DataValue::Long(v) => Some(DataObject::long(!v)),
            _ => None,
        }
    }

    /// `+|x`
    pub fn op_inc(&self) -> Option<DataObject> {
        match self.value {
            DataValue::Int(v) => Some(DataObject::int(v.wrapping_add(1))),
            DataValue::Long(v) => Some(DataObject::long(v.wrapping_add(1))),
            DataValue::Float(v) => Some(DataObject::float(v + 1.0)),
            DataValue::Double(v) => Some(DataObject::double(v + 1.0)),
            DataValue::Char(c) => shift_char(c, 1),
            _ => None,
        }
    }

    /// `-|x`
    pub fn op_dec(&self) -> Option<DataObject> {
        match self.value {
            DataValue::Int(v) => Some(DataObject::int(v.wrapping_sub(1))),
            DataValue::Long(v) => Some(DataObject::long(v.wrapping_sub(1))),
            DataValue::Float(v) => Some(DataObject::float(v - 1.0)),
            DataValue::Double(v) => Some(DataObject::double(v - 1.0)),
            DataValue::Char(c) => shift_char(c, -1),
            _ => None,
        }
    }

    /// `@x`: character count of text, element count of arrays.
    pub fn op_len(&self) -> Option<DataObject> {
        match &self.value {
            DataValue::Text(text) => Some(DataObject::int(text.chars().count() as i32)),
            DataValue::Array(array) => Some(DataObject::int(array.len() as i32)),
            DataValue::Char(_) => Some(DataObject::int(1)),
            _ => None,
        }
    }

    /// `^x`: arrays are copied recursively (shared sub-arrays stay shared
    /// within the copy, so cyclic arrays copy to cyclic arrays); every other
    /// variant gets a fresh wrapper.
    pub fn deep_copy(&self) -> DataObject {
        let mut copied = FxHashMap::default();
        deep_copy_value(self, &mut copied)
    }
}

fn deep_copy_value(value: &DataObject, copied: &mut FxHashMap<usize, Array>) -> DataObject {
    let DataValue::Array(array) = &value.value else {
        return value.copy_value();
    };
    if let Some(copy) = copied.get(&array.addr()) {
        return DataObject::array_ref(copy.clone());
    }
    let copy = Array::new(Vec::new());
    copied.insert(array.addr(), copy.clone());
    let elements = array
        .snapshot()
        .iter()
        .map(|element| deep_copy_value(element, copied))
        .collect();
    copy.replace_elements(elements);
    DataObject::array_ref(copy)
}

// Binary operators

impl DataObject {
    /// `a + b`: numeric sum, text concatenation (text on the left), array
    /// concatenation, Char + integer shifts the code point.
    pub fn op_add(&self, other: &DataObject) -> Option<DataObject> {
        match (&self.value, &other.value) {
            (DataValue::Text(text), _) => {
                let mut out = String::from(&**text);
                out.push_str(&other.to_text());
                Some(DataObject::text(out))
            }
            (DataValue::Array(left), DataValue::Array(right)) => {
                let (left, right) = (left.snapshot(), right.snapshot());
                Some(DataObject::array(copies(&left).chain(copies(&right)).collect()))
            }
            (DataValue::Char(c), _) => shift_char(*c, integral(other)?),
            _ => Some(match numbers(self, other)? {
                NumberPair::Int(a, b) => DataObject::int(a.wrapping_add(b)),
                NumberPair::Long(a, b) => DataObject::long(a.wrapping_add(b)),
                NumberPair::Float(a, b) => DataObject::float(a + b),
                NumberPair::Double(a, b) => DataObject::double(a + b),
            }),
        }
    }

    /// `a - b`
    pub fn op_sub(&self, other: &DataObject) -> Option<DataObject> {
        if let DataValue::Char(c) = self.value {
            return shift_char(c, integral(other)?.checked_neg()?);
        }
        Some(match numbers(self, other)? {
            NumberPair::Int(a, b) => DataObject::int(a.wrapping_sub(b)),
            NumberPair::Long(a, b) => DataObject::long(a.wrapping_sub(b)),
            NumberPair::Float(a, b) => DataObject::float(a - b),
            NumberPair::Double(a, b) => DataObject::double(a - b),
        })
    }

    /// `a * b`; text times an integer repeats the text.
    pub fn op_mul(&self, other: &DataObject) -> Option<DataObject> {
        if let DataValue::Text(text) = &self.value {
            let count = integral(other)?;
            let Ok(count) = usize::try_from(count) else {
                return Some(DataObject::error(InterpretingError::NegativeRepeatCount));
            };
            return Some(match text.len().checked_mul(count) {
                Some(len) if len <= MAX_ALLOCATION_LEN => DataObject::text(text.repeat(count)),
                _ => DataObject::error(InterpretingError::InvalidArguments),
            });
        }
        Some(match numbers(self, other)? {
            NumberPair::Int(a, b) => DataObject::int(a.wrapping_mul(b)),
            NumberPair::Long(a, b) => DataObject::long(a.wrapping_mul(b)),
            NumberPair::Float(a, b) => DataObject::float(a * b),
            NumberPair::Double(a, b) => DataObject::double(a * b),
        })
    }

    /// `a / b`: exact integral quotients stay integral; inexact ones and
    /// division by zero produce a Float (Int operands) or Double (Long
    /// involved).
    pub fn op_div(&self, other: &DataObject) -> Option<DataObject> {
        Some(match numbers(self, other)? {
            NumberPair::Int(a, b) => {
                if b != 0 && a.wrapping_rem(b) == 0 {
                    DataObject::int(a.wrapping_div(b))
                } else {
                    DataObject::float(a as f32 / b as f32)
                }
            }
            NumberPair::Long(a, b) => {
                if b != 0 && a.wrapping_rem(b) == 0 {
                    DataObject::long(a.wrapping_div(b))
                } else {
                    DataObject::double(a as f64 / b as f64)
                }
            }
            NumberPair::Float(a, b) => DataObject::float(a / b),
            NumberPair::Double(a, b) => DataObject::double(a / b),
        })
    }

    /// `a // b`: quotient rounded towards negative infinity.
    pub fn op_floor_div(&self, other: &DataObject) -> Option<DataObject> {
        Some(match numbers(self, other)? {
            NumberPair::Int(_, 0) | NumberPair::Long(_, 0) => {
                DataObject::error(InterpretingError::DivByZero)
            }
            NumberPair::Int(a, b) => DataObject::int(floor_div_i32(a, b)),
            NumberPair::Long(a, b) => DataObject::long(floor_div_i64(a, b)),
            NumberPair::Float(a, b) => DataObject::float((a / b).floor()),
            NumberPair::Double(a, b) => DataObject::double((a / b).floor()),
        })
    }

    /// `a % b`: truncating remainder.
    pub fn op_mod(&self, other: &DataObject) -> Option<DataObject> {
        Some(match numbers(self, other)? {
            NumberPair::Int(_, 0) | NumberPair::Long(_, 0) => {
                DataObject::error(InterpretingError::DivByZero)
            }
            NumberPair::Int(a, b) => DataObject::int(a.wrapping_rem(b)),
            NumberPair::Long(a, b) => DataObject::long(a.wrapping_rem(b)),
            NumberPair::Float(a, b) => DataObject::float(a % b),
            NumberPair::Double(a, b) => DataObject::double(a % b),
        })
    }

    /// `a ** b`: exact for integral operands and a non-negative exponent
    /// (Int if it fits, else Long, else Double).
    pub fn op_pow(&self, other: &DataObject) -> Option<DataObject> {
        Some(match numbers(self, other)? {
            NumberPair::Int(a, b) => match u32::try_from(b) {
                Ok(exp) => a
                    .checked_pow(exp)
                    .map(DataObject::int)
                    .or_else(|| i64::from(a).checked_pow(exp).map(DataObject::long))
                    .unwrap_or_else(|| DataObject::double(f64::from(a).powf(f64::from(b)))),
                Err(_) => DataObject::double(f64::from(a).powf(f64::from(b))),
            },
            NumberPair::Long(a, b) => u32::try_from(b)
                .ok()
                .and_then(|exp| a.checked_pow(exp))
                .map_or_else(
                    || DataObject::double((a as f64).powf(b as f64)),
                    DataObject::long,
                ),
            NumberPair::Float(a, b) => DataObject::float(a.powf(b)),
            NumberPair::Double(a, b) => DataObject::double(a.powf(b)),
        })
    }

    /// `a & b`
    pub fn op_and(&self, other: &DataObject) -> Option<DataObject> {
        match numbers(self, other)? {
            NumberPair::Int(a, b) => Some(DataObject::int(a & b)),
            NumberPair::Long(a, b) => Some(DataObject::long(a & b)),
            _ => None,
        }
    }

    /// `a | b`
    pub fn op_or(&self, other: &DataObject) -> Option<DataObject> {
        match numbers(self, other)? {
            NumberPair::Int(a, b) => Some(DataObject::int(a | b)),
            NumberPair::Long(a, b) => Some(DataObject::long(a | b)),
            _ => None,
        }
    }

    /// `a ^ b`
    pub fn op_xor(&self, other: &DataObject) -> Option<DataObject> {
        match numbers(self, other)? {
            NumberPair::Int(a, b) => Some(DataObject::int(a ^ b)),
            NumberPair::Long(a, b) => Some(DataObject::long(a ^ b)),
            _ => None,
        }
    }

    /// `a << b`; the result keeps the left operand's width and the count is
    /// masked to it.
    pub fn op_lshift(&self, other: &DataObject) -> Option<DataObject> {
        let count = integral(other)? as u32;
        match self.value {
            DataValue::Int(a) => Some(DataObject::int(a.wrapping_shl(count))),
            DataValue::Long(a) => Some(DataObject::long(a.wrapping_shl(count))),
            _ => None,
        }
    }

    /// `a >> b` (arithmetic)
    pub fn op_rshift(&self, other: &DataObject) -> Option<DataObject> {
        let count = integral(other)? as u32;
        match self.value {
            DataValue::Int(a) => Some(DataObject::int(a.wrapping_shr(count))),
            DataValue::Long(a) => Some(DataObject::long(a.wrapping_shr(count))),
            _ => None,
        }
    }

    /// `a >>> b` (logical)
    pub fn op_rzshift(&self, other: &DataObject) -> Option<DataObject> {
        let count = integral(other)? as u32;
        match self.value {
            DataValue::Int(a) => Some(DataObject::int((a as u32).wrapping_shr(count) as i32)),
            DataValue::Long(a) => Some(DataObject::long((a as u64).wrapping_shr(count) as i64)),
            _ => None,
        }
    }

    /// `a ||| b`: textual concatenation of any two values.
    pub fn op_concat(&self, other: &DataObject) -> Option<DataObject> {
        let mut out = self.to_text();
        out.push_str(&other.to_text());
        Some(DataObject::text(out))
    }

    /// `a[i]`: element of an array or character of a text. Negative indices
    /// count from the end.
    pub fn op_get_item(&self, index: &DataObject) -> Option<DataObject> {
        let index = integral(index)?;
        match &self.value {
            DataValue::Array(array) => Some(
                resolve_index(index, array.len())
                    .and_then(|i| array.get(i))
                    .map_or_else(
                        || DataObject::error(InterpretingError::IndexOutOfBounds),
                        |element| element.copy_value(),
                    ),
            ),
            DataValue::Text(text) => {
                let chars: Vec<char> = text.chars().collect();
                Some(
                    resolve_index(index, chars.len())
                        .and_then(|i| chars.get(i).copied())
                        .map_or_else(
                            || DataObject::error(InterpretingError::IndexOutOfBounds),
                            DataObject::char,
                        ),
                )
            }
            _ => None,
        }
    }
}

/// Resolve a possibly negative index against `len`.
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}
