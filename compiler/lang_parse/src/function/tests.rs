#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_split_function_header() {
    assert_eq!(
        split_function_header("($a, $b) -> {"),
        Some(("$a, $b", BodyForm::Block))
    );
    assert_eq!(split_function_header("() : {"), Some(("", BodyForm::Block)));
    assert_eq!(
        split_function_header("($a) -> $a * 2"),
        Some(("$a", BodyForm::Line("$a * 2")))
    );
    assert_eq!(split_function_header("($a) text"), None);
    assert_eq!(split_function_header("(1 + 2) * 3"), None);
    assert_eq!(split_function_header("($a) : $a"), None);
}

#[test]
fn test_parameters() {
    let parameters = parse_parameters("$a, &b, fp.c, $[d], $rest...").unwrap();
    assert_eq!(
        parameters,
        vec![
            Parameter::new("$a", ParameterKind::Normal),
            Parameter::new("&b", ParameterKind::Normal),
            Parameter::new("fp.c", ParameterKind::Normal),
            Parameter::new("$d", ParameterKind::CallByPointer),
            Parameter::new("$rest", ParameterKind::VarArgs),
        ]
    );
    assert_eq!(parse_parameters("  ").unwrap(), vec![]);
    assert_eq!(
        parse_parameters("$[$p]").unwrap(),
        vec![Parameter::new("$p", ParameterKind::CallByPointer)]
    );
}

#[test]
fn test_invalid_parameters() {
    assert!(parse_parameters("$a..., $b").is_err());
    assert!(parse_parameters("abc").is_err());
    assert!(parse_parameters("$a,").is_err());
    assert!(parse_parameters("$*p").is_err());
    assert!(parse_parameters("fp.f...").is_err());
}
