//! Whole-operand literals: numbers and `null`.

use lang_ir::Node;

/// `5` Int, `5000000000` or `5L` Long, `2.5` or `1e3` Double, `2.5f` Float,
/// `null` Null. Anything else is not a literal.
pub(super) fn parse_literal(text: &str) -> Option<Node> {
    if text == "null" {
        return Some(Node::Null);
    }
    if let Some(digits) = text.strip_suffix(&['l', 'L'][..]) {
        return is_integer(digits)
            .then(|| digits.parse().ok().map(Node::Long))
            .flatten();
    }
    if let Some(body) = text.strip_suffix(&['f', 'F'][..]) {
        return (is_integer(body) || is_decimal(body))
            .then(|| body.parse().ok().map(Node::Float))
            .flatten();
    }
    if is_integer(text) {
        if let Ok(value) = text.parse::<i32>() {
            return Some(Node::Int(value));
        }
        return text.parse::<i64>().ok().map(Node::Long);
    }
    if is_decimal(text) {
        return text.parse().ok().map(Node::Double);
    }
    None
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix('-').unwrap_or(text)
}

fn digit_run(text: &str) -> usize {
    text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len())
}

/// `-?[0-9]+`
fn is_integer(text: &str) -> bool {
    let digits = strip_sign(text);
    !digits.is_empty() && digit_run(digits) == digits.len()
}

/// `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?` with a fraction or an exponent.
fn is_decimal(text: &str) -> bool {
    let rest = strip_sign(text);
    let whole = digit_run(rest);
    if whole == 0 {
        return false;
    }
    let mut rest = &rest[whole..];
    let mut has_fraction = false;
    if let Some(fraction) = rest.strip_prefix('.') {
        let digits = digit_run(fraction);
        if digits == 0 {
            return false;
        }
        rest = &fraction[digits..];
        has_fraction = true;
    }
    if let Some(exponent) = rest.strip_prefix(&['e', 'E'][..]) {
        let exponent = exponent.strip_prefix(&['+', '-'][..]).unwrap_or(exponent);
        let digits = digit_run(exponent);
        return digits > 0 && digits == exponent.len();
    }
    has_fraction && rest.is_empty()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_integer_literals() {
        assert_eq!(parse_literal("5"), Some(Node::Int(5)));
        assert_eq!(parse_literal("-12"), Some(Node::Int(-12)));
        assert_eq!(parse_literal("5000000000"), Some(Node::Long(5_000_000_000)));
        assert_eq!(parse_literal("5L"), Some(Node::Long(5)));
        assert_eq!(parse_literal("99999999999999999999"), None);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(parse_literal("2.5"), Some(Node::Double(2.5)));
        assert_eq!(parse_literal("-0.5"), Some(Node::Double(-0.5)));
        assert_eq!(parse_literal("1e3"), Some(Node::Double(1000.0)));
        assert_eq!(parse_literal("2.5f"), Some(Node::Float(2.5)));
        assert_eq!(parse_literal("3F"), Some(Node::Float(3.0)));
    }

    #[test]
    fn test_non_literals() {
        assert_eq!(parse_literal("null"), Some(Node::Null));
        for text in ["", "-", "1.", ".5", "5px", "1e", "1.2.3", "NULL", "0x10", "+5", "f"] {
            assert_eq!(parse_literal(text), None, "{text}");
        }
    }
}
