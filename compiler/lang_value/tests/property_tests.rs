//! Property-based tests for the value model.
//!
//! Generated values cover every scalar variant, short texts (numeric and
//! non-numeric), markers, errors and small nested arrays, and check:
//! 1. Truthiness: `to_boolean` is false exactly for the "empty" values
//! 2. Loose equality is symmetric
//! 3. Strict equality implies loose equality
//! 4. Deep copies are equal but independent

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lang_value::{DataObject, DataValue, InterpretingError};
use proptest::prelude::*;

// -- Value Generation Strategies --

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        any::<i32>().prop_map(|v| v.to_string()),
        any::<i64>().prop_map(|v| v.to_string()),
        (-1000.0f64..1000.0).prop_map(|v| v.to_string()),
        prop::string::string_regex("[a-z ]{0,6}").expect("valid regex"),
    ]
}

fn error_strategy() -> impl Strategy<Value = DataObject> {
    prop::sample::select(InterpretingError::ALL.to_vec()).prop_map(DataObject::error)
}

fn scalar_strategy() -> impl Strategy<Value = DataObject> {
    prop_oneof![
        text_strategy().prop_map(DataObject::text),
        any::<char>().prop_map(DataObject::char),
        any::<i32>().prop_map(DataObject::int),
        (-3i32..3).prop_map(DataObject::int),
        any::<i64>().prop_map(DataObject::long),
        any::<f32>().prop_map(DataObject::float),
        any::<f64>().prop_map(DataObject::double),
        (-3i32..3).prop_map(|v| DataObject::double(f64::from(v))),
        error_strategy(),
        Just(DataObject::null()),
        Just(DataObject::void()),
        Just(DataObject::argument_separator(", ")),
    ]
}

fn value_strategy() -> impl Strategy<Value = DataObject> {
    scalar_strategy().prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(DataObject::array)
    })
}

fn expected_truthiness(value: &DataObject) -> bool {
    match value.value() {
        DataValue::Null | DataValue::Void | DataValue::ArgumentSeparator(_) => false,
        DataValue::Text(text) => !text.is_empty(),
        DataValue::Array(array) => !array.is_empty(),
        DataValue::Int(v) => *v != 0,
        DataValue::Long(v) => *v != 0,
        DataValue::Float(v) => *v != 0.0,
        DataValue::Double(v) => *v != 0.0,
        DataValue::Char(c) => *c != '\0',
        DataValue::Error(error) => error.code() != 0,
        DataValue::VarPointer(_) | DataValue::FunctionPointer(_) => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn truthiness_matches_emptiness(value in value_strategy()) {
        prop_assert_eq!(value.to_boolean(), expected_truthiness(&value));
    }

    #[test]
    fn loose_equality_is_symmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(a.loose_equals(&b), b.loose_equals(&a));
    }

    #[test]
    fn strict_equality_implies_loose(a in value_strategy(), b in value_strategy()) {
        if a.strict_equals(&b) {
            prop_assert!(a.loose_equals(&b));
        }
    }

    #[test]
    fn value_is_strictly_equal_to_its_copy(value in value_strategy()) {
        let is_nan = matches!(value.value(), DataValue::Float(v) if v.is_nan())
            || matches!(value.value(), DataValue::Double(v) if v.is_nan());
        prop_assume!(!is_nan && !value.to_text().contains("NaN"));
        prop_assert!(value.strict_equals(&value.copy_value()));
    }

    #[test]
    fn deep_copy_is_independent(elements in prop::collection::vec(scalar_strategy(), 1..6)) {
        let original = DataObject::array(elements);
        let before = original.to_text();
        let copy = original.deep_copy();
        prop_assert!(!copy.as_array().unwrap().ptr_eq(original.as_array().unwrap()));

        copy.as_array().unwrap().set(0, DataObject::text("mutated"));
        prop_assert_eq!(original.to_text(), before);
        let first = copy.as_array().unwrap().get(0).unwrap();
        prop_assert_eq!(first.as_text(), Some("mutated"));
    }

    #[test]
    fn ordering_never_holds_both_ways(a in scalar_strategy(), b in scalar_strategy()) {
        prop_assert!(!(a.less_than(&b) && b.less_than(&a)));
    }
}
