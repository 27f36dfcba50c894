#![allow(clippy::unwrap_used, clippy::float_cmp)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_final_values_ignore_setters() {
    let mut value = DataObject::int(5).into_final();
    value.set_text("changed").set_int(7).set_null();
    assert_eq!(value.as_int(), Some(5));
    assert_eq!(value.data_type(), DataType::Int);
}

#[test]
fn test_try_set_reports_final_value() {
    let mut value = DataObject::int(5).with_variable_name("$a").into_final();
    let err = value.try_set_value(DataValue::Null).unwrap_err();
    assert_eq!(err.variable_name.as_deref(), Some("$a"));
    assert_eq!(err.to_string(), "final value `$a` can not be changed");

    let mut open = DataObject::int(5);
    open.try_set_value(DataValue::Long(9)).unwrap();
    assert_eq!(open.as_long(), Some(9));
}

#[test]
fn test_setter_replaces_variant() {
    let mut value = DataObject::text("abc");
    value.set_double(1.5);
    assert_eq!(value.as_text(), None);
    assert_eq!(value.as_double(), Some(1.5));
}

#[test]
fn test_typed_setters() {
    let mut value = DataObject::null();
    assert_eq!(value.set_char('x').as_char(), Some('x'));
    assert_eq!(value.set_long(1 << 40).as_long(), Some(1 << 40));
    assert_eq!(value.set_float(0.5).as_float(), Some(0.5));
    assert_eq!(value.set_void().data_type(), DataType::Void);

    let array = Array::new(vec![DataObject::int(1)]);
    value.set_array(array.clone());
    assert!(value.as_array().unwrap().ptr_eq(&array));

    let slot = Slot::new(DataObject::int(2));
    value.set_var_pointer(slot.clone());
    assert!(value.as_var_pointer().unwrap().ptr_eq(&slot));

    value.set_error(ErrorObject::new(InterpretingError::NoNum));
    assert_eq!(
        value.as_error().map(ErrorObject::kind),
        Some(InterpretingError::NoNum)
    );

    value.set_data(&DataObject::text("abc"));
    assert_eq!(value.to_text(), "abc");
}

#[test]
fn test_final_value_rejects_every_setter() {
    let mut value = DataObject::text("keep").into_final();
    value
        .set_char('x')
        .set_long(1)
        .set_float(0.5)
        .set_double(1.5)
        .set_array(Array::new(vec![]))
        .set_var_pointer(Slot::new(DataObject::null()))
        .set_error(ErrorObject::new(InterpretingError::NoNum))
        .set_void()
        .set_data(&DataObject::int(3))
        .set_value(DataValue::Null);
    assert_eq!(value.to_text(), "keep");
    assert!(value.is_final());

    value.set_variable_name(Some("$kept".into()));
    assert_eq!(value.variable_name(), Some("$kept"));
}

#[test]
fn test_text_repeat_is_capped() {
    let text = DataObject::text("ab");
    assert_eq!(text.op_mul(&DataObject::int(3)).unwrap().to_text(), "ababab");

    let huge = text.op_mul(&DataObject::long(5_000_000_000_000_000_000)).unwrap();
    assert_eq!(
        huge.as_error().map(ErrorObject::kind),
        Some(InterpretingError::InvalidArguments)
    );

    let over_cap = i64::try_from(MAX_ALLOCATION_LEN / 2 + 1).unwrap();
    let refused = text.op_mul(&DataObject::long(over_cap)).unwrap();
    assert!(refused.as_error().is_some());
}

#[test]
fn test_to_text() {
    assert_eq!(DataObject::int(-3).to_text(), "-3");
    assert_eq!(DataObject::long(5_000_000_000).to_text(), "5000000000");
    assert_eq!(DataObject::double(2.5).to_text(), "2.5");
    assert_eq!(DataObject::double(3.0).to_text(), "3.0");
    assert_eq!(DataObject::float(3.5).to_text(), "3.5");
    assert_eq!(DataObject::float(f32::INFINITY).to_text(), "Infinity");
    assert_eq!(DataObject::double(f64::NEG_INFINITY).to_text(), "-Infinity");
    assert_eq!(DataObject::double(f64::NAN).to_text(), "NaN");
    assert_eq!(DataObject::char('x').to_text(), "x");
    assert_eq!(DataObject::null().to_text(), "null");
    assert_eq!(DataObject::void().to_text(), "");
    assert_eq!(
        DataObject::error(InterpretingError::DivByZero).to_text(),
        "Dividing by 0"
    );
    assert_eq!(
        DataObject::array(vec![DataObject::int(1), DataObject::text("a")]).to_text(),
        "[1, a]"
    );
}

#[test]
fn test_var_pointer_text_shows_referent() {
    let slot = Slot::new(DataObject::int(4));
    assert_eq!(DataObject::var_pointer(slot).to_text(), "-->{4}");
}

#[test]
fn test_self_referential_array_renders_as_error() {
    let array = Array::new(vec![DataObject::int(1)]);
    array.set(0, DataObject::array_ref(array.clone()));
    assert_eq!(DataObject::array_ref(array).to_text(), CYCLIC_VALUE_TEXT);
}

#[test]
fn test_shared_array_is_not_a_cycle() {
    let inner = Array::new(vec![DataObject::int(1)]);
    let outer = DataObject::array(vec![
        DataObject::array_ref(inner.clone()),
        DataObject::array_ref(inner),
    ]);
    assert_eq!(outer.to_text(), "[[1], [1]]");
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number("42"), Some(Number::Int(42)));
    assert_eq!(parse_number("-7"), Some(Number::Int(-7)));
    assert_eq!(parse_number("5000000000"), Some(Number::Long(5_000_000_000)));
    assert_eq!(parse_number("2.5"), Some(Number::Double(2.5)));
    assert_eq!(parse_number("2.5f"), Some(Number::Float(2.5)));
    assert_eq!(parse_number("1e3"), Some(Number::Double(1000.0)));
    assert_eq!(parse_number(" 42"), None);
    assert_eq!(parse_number("42 "), None);
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("inf"), None);
    assert!(matches!(parse_number("NaN"), Some(Number::Double(v)) if v.is_nan()));
}

#[test]
fn test_conversions() {
    assert_eq!(DataObject::text("12").to_int(), Some(12));
    assert_eq!(DataObject::text("1.9").to_int(), Some(1));
    assert_eq!(DataObject::char('A').to_int(), Some(65));
    assert_eq!(DataObject::array(vec![DataObject::null(); 3]).to_int(), Some(3));
    assert_eq!(
        DataObject::error(InterpretingError::DivByZero).to_long(),
        Some(14)
    );
    assert_eq!(DataObject::null().to_int(), None);
    assert_eq!(DataObject::int(66).to_char(), Some('B'));
    assert_eq!(DataObject::int(-1).to_char(), None);
    assert_eq!(DataObject::text("z").to_char(), Some('z'));
    assert_eq!(DataObject::int(3).to_double(), Some(3.0));
    let slot = Slot::new(DataObject::text("8"));
    assert_eq!(DataObject::var_pointer(slot).to_int(), Some(8));
}

#[test]
fn test_to_boolean() {
    assert!(!DataObject::null().to_boolean());
    assert!(!DataObject::void().to_boolean());
    assert!(!DataObject::argument_separator(", ").to_boolean());
    assert!(!DataObject::text("").to_boolean());
    assert!(DataObject::text("0").to_boolean());
    assert!(!DataObject::array(vec![]).to_boolean());
    assert!(!DataObject::double(0.0).to_boolean());
    assert!(!DataObject::char('\0').to_boolean());
    assert!(!DataObject::error(InterpretingError::NoError).to_boolean());
    assert!(DataObject::error(InterpretingError::DivByZero).to_boolean());
    assert!(DataObject::var_pointer(Slot::new(DataObject::null())).to_boolean());
}

#[test]
fn test_array_handles_alias() {
    let a = DataObject::array(vec![DataObject::int(1)]);
    let b = a.copy_value();
    assert!(b.as_array().unwrap().set(0, DataObject::int(9)));
    assert_eq!(a.as_array().unwrap().get(0), Some(DataObject::int(9)));
}

#[test]
fn test_final_array_element_can_not_be_set() {
    let array = Array::new(vec![DataObject::int(1)]);
    array.make_elements_final();
    assert!(!array.set(0, DataObject::int(2)));
    assert!(!array.set(5, DataObject::int(2)));
    assert_eq!(array.get(0), Some(DataObject::int(1)));
}

#[test]
fn test_slot_assign_keeps_name_and_respects_final() {
    let slot = Slot::new(DataObject::int(1).with_variable_name("$x"));
    slot.assign(DataObject::text("new")).unwrap();
    let stored = slot.get();
    assert_eq!(stored.as_text(), Some("new"));
    assert_eq!(stored.variable_name(), Some("$x"));

    slot.update(|value| {
        value.make_final();
    });
    assert!(slot.assign(DataObject::int(3)).is_err());
    assert_eq!(slot.get().as_text(), Some("new"));
}

#[test]
fn test_deep_copy_is_independent() {
    let original = DataObject::array(vec![
        DataObject::int(1),
        DataObject::array(vec![DataObject::int(2)]),
    ]);
    let copy = original.deep_copy();
    assert_eq!(copy, original);
    let inner = copy.as_array().unwrap().get(1).unwrap();
    inner.as_array().unwrap().set(0, DataObject::int(99));
    assert_eq!(original.to_text(), "[1, [2]]");
    assert_eq!(copy.to_text(), "[1, [99]]");
}

#[test]
fn test_deep_copy_of_cyclic_array_terminates() {
    let array = Array::new(vec![DataObject::null()]);
    array.set(0, DataObject::array_ref(array.clone()));
    let copy = DataObject::array_ref(array.clone()).deep_copy();
    let copied = copy.as_array().unwrap();
    assert!(!copied.ptr_eq(&array));
    let inner = copied.get(0).unwrap();
    assert!(inner.as_array().unwrap().ptr_eq(copied));
}

#[test]
fn test_type_names() {
    assert_eq!(DataObject::text("").data_type().name(), "TEXT");
    assert_eq!(DataObject::null().data_type().to_string(), "NULL");
    assert_eq!(DataType::ALL.len(), 13);
}
