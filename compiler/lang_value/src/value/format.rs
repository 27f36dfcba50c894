//! Text rendering of values.

use std::fmt::{self, Write};

use super::{DataObject, DataValue};
use crate::function::FunctionPointer;

/// Rendering of a value that contains itself.
pub const CYCLIC_VALUE_TEXT: &str = "Error";

/// Raised when rendering revisits an array or slot already on the path.
struct Cycle;

impl DataObject {
    /// Textual representation used for printing, concatenation and text
    /// conversion.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut path = Vec::new();
        match self.write_text(&mut out, &mut path) {
            Ok(()) => out,
            Err(Cycle) => CYCLIC_VALUE_TEXT.to_string(),
        }
    }

    fn write_text(&self, out: &mut String, path: &mut Vec<usize>) -> Result<(), Cycle> {
        match &self.value {
            DataValue::Text(text) => out.push_str(text),
            DataValue::Char(c) => out.push(*c),
            DataValue::Int(v) => push_display(out, v),
            DataValue::Long(v) => push_display(out, v),
            DataValue::Float(v) => out.push_str(&format_float(*v)),
            DataValue::Double(v) => out.push_str(&format_double(*v)),
            DataValue::Array(array) => {
                let addr = array.addr();
                if path.contains(&addr) {
                    return Err(Cycle);
                }
                path.push(addr);
                out.push('[');
                for (i, element) in array.snapshot().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    element.write_text(out, path)?;
                }
                out.push(']');
                path.pop();
            }
            DataValue::VarPointer(slot) => {
                let addr = slot.addr();
                if path.contains(&addr) {
                    return Err(Cycle);
                }
                path.push(addr);
                out.push_str("-->{");
                slot.get().write_text(out, path)?;
                out.push('}');
                path.pop();
            }
            DataValue::FunctionPointer(function) => out.push_str(function_text(function)),
            DataValue::Error(error) => out.push_str(error.message()),
            DataValue::Null => out.push_str("null"),
            DataValue::Void => {}
            DataValue::ArgumentSeparator(text) => out.push_str(text),
        }
        Ok(())
    }
}

fn push_display(out: &mut String, value: impl fmt::Display) {
    // Writing into a String can not fail.
    let _ = write!(out, "{value}");
}

fn function_text(function: &FunctionPointer) -> &'static str {
    match function {
        FunctionPointer::User(_) => "<Function>",
        FunctionPointer::Native(native) if native.is_external() => "<External function>",
        FunctionPointer::Native(_) => "<Predefined function>",
    }
}

/// `2.5`, `3.0`, `NaN`, `Infinity`, `-Infinity`.
pub fn format_double(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    with_fraction(v.to_string())
}

pub fn format_float(v: f32) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    with_fraction(v.to_string())
}

fn with_fraction(mut text: String) -> String {
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

impl fmt::Display for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
