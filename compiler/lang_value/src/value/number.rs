//! Numeric view of a value and text to number parsing.

/// A numeric value, ordered by promotion rank Int < Long < Float < Double.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

/// Both operands promoted to the wider of their two representations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum NumberPair {
    Int(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

impl Number {
    const fn rank(self) -> u8 {
        match self {
            Number::Int(_) => 0,
            Number::Long(_) => 1,
            Number::Float(_) => 2,
            Number::Double(_) => 3,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Number::Int(_) | Number::Long(_))
    }

    pub fn to_i64(self) -> i64 {
        match self {
            Number::Int(v) => i64::from(v),
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Number::Int(v) => v as f32,
            Number::Long(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(v) => f64::from(v),
            Number::Long(v) => v as f64,
            Number::Float(v) => f64::from(v),
            Number::Double(v) => v,
        }
    }

    pub(crate) fn pair(self, other: Number) -> NumberPair {
        match self.rank().max(other.rank()) {
            0 => NumberPair::Int(self.to_i64() as i32, other.to_i64() as i32),
            1 => NumberPair::Long(self.to_i64(), other.to_i64()),
            2 => NumberPair::Float(self.to_f32(), other.to_f32()),
            _ => NumberPair::Double(self.to_f64(), other.to_f64()),
        }
    }

    /// Numeric equality after promotion.
    pub(crate) fn equals(self, other: Number) -> bool {
        match self.pair(other) {
            NumberPair::Int(a, b) => a == b,
            NumberPair::Long(a, b) => a == b,
            NumberPair::Float(a, b) => a == b,
            NumberPair::Double(a, b) => a == b,
        }
    }

    pub(crate) fn less_than(self, other: Number) -> bool {
        match self.pair(other) {
            NumberPair::Int(a, b) => a < b,
            NumberPair::Long(a, b) => a < b,
            NumberPair::Float(a, b) => a < b,
            NumberPair::Double(a, b) => a < b,
        }
    }
}

/// Parse text as a number: Int if it fits, else Long, else Float (with an
/// `f`/`F` suffix) or Double.
///
/// Leading or trailing whitespace rejects the text. Besides decimal and
/// scientific notation only `NaN`, `Infinity` and `-Infinity` are accepted.
pub fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() || text.trim() != text {
        return None;
    }
    if let Ok(v) = text.parse::<i32>() {
        return Some(Number::Int(v));
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(Number::Long(v));
    }

    let (body, is_float) = match text.strip_suffix(['f', 'F']) {
        Some(body) => (body, true),
        None => (text, false),
    };
    match body {
        "NaN" => return Some(float_or_double(f64::NAN, is_float)),
        "Infinity" | "+Infinity" => return Some(float_or_double(f64::INFINITY, is_float)),
        "-Infinity" => return Some(float_or_double(f64::NEG_INFINITY, is_float)),
        _ => {}
    }
    let valid = body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if !valid {
        return None;
    }
    if is_float {
        body.parse::<f32>().ok().map(Number::Float)
    } else {
        body.parse::<f64>().ok().map(Number::Double)
    }
}

fn float_or_double(v: f64, is_float: bool) -> Number {
    if is_float {
        Number::Float(v as f32)
    } else {
        Number::Double(v)
    }
}
