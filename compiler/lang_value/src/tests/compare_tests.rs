//! Tests for loose equality, strict equality and ordering.

use crate::{DataObject, FunctionPointer, InterpretingError, NativeFunction, Arity, Slot};

#[test]
fn test_loose_equality_coerces_numbers() {
    assert!(DataObject::text("5").loose_equals(&DataObject::int(5)));
    assert!(DataObject::int(5).loose_equals(&DataObject::text("5")));
    assert!(DataObject::int(5).loose_equals(&DataObject::float(5.0)));
    assert!(DataObject::long(5).loose_equals(&DataObject::double(5.0)));
    assert!(DataObject::char('A').loose_equals(&DataObject::int(65)));
    assert!(!DataObject::text("5 ").loose_equals(&DataObject::int(5)));
    assert!(!DataObject::text("abc").loose_equals(&DataObject::int(0)));
}

#[test]
fn test_strict_equality_does_not_coerce() {
    assert!(!DataObject::int(5).strict_equals(&DataObject::float(5.0)));
    assert!(!DataObject::text("5").strict_equals(&DataObject::int(5)));
    assert!(DataObject::int(5).strict_equals(&DataObject::int(5)));
    assert!(!DataObject::double(f64::NAN).strict_equals(&DataObject::double(f64::NAN)));
}

#[test]
fn test_markers_equal_only_their_own_kind() {
    assert!(DataObject::null().loose_equals(&DataObject::null()));
    assert!(!DataObject::null().loose_equals(&DataObject::void()));
    assert!(!DataObject::null().loose_equals(&DataObject::int(0)));
    assert!(!DataObject::int(0).loose_equals(&DataObject::null()));
    assert!(!DataObject::void().loose_equals(&DataObject::text("")));
}

#[test]
fn test_error_equality() {
    let error = DataObject::error(InterpretingError::DivByZero);
    assert!(error.loose_equals(&DataObject::text("Dividing by 0")));
    assert!(DataObject::text("Dividing by 0").loose_equals(&error));
    assert!(error.loose_equals(&DataObject::int(14)));
    assert!(error.loose_equals(&DataObject::error(InterpretingError::DivByZero)));
    assert!(!error.loose_equals(&DataObject::error(InterpretingError::NoNum)));
}

#[test]
fn test_char_and_text() {
    assert!(DataObject::char('a').loose_equals(&DataObject::text("a")));
    assert!(DataObject::text("a").loose_equals(&DataObject::char('a')));
    assert!(!DataObject::char('a').strict_equals(&DataObject::text("a")));
}

#[test]
fn test_arrays_compare_element_wise() {
    let a = DataObject::array(vec![DataObject::int(1), DataObject::text("2")]);
    let b = DataObject::array(vec![DataObject::text("1"), DataObject::int(2)]);
    assert!(a.loose_equals(&b));
    assert!(!a.strict_equals(&b));
    assert!(a.strict_equals(&a.deep_copy()));
}

#[test]
fn test_pointers_compare_by_identity() {
    let slot = Slot::new(DataObject::int(1));
    let p1 = DataObject::var_pointer(slot.clone());
    let p2 = DataObject::var_pointer(slot);
    let other = DataObject::var_pointer(Slot::new(DataObject::int(1)));
    assert!(p1.loose_equals(&p2));
    assert!(p1.strict_equals(&p2));
    assert!(!p1.loose_equals(&other));
    assert!(!p1.loose_equals(&DataObject::int(1)));

    let f = FunctionPointer::native(NativeFunction::builtin("f", Arity::Any, |_, _, _| None));
    assert!(DataObject::function_pointer(f.clone()).strict_equals(&DataObject::function_pointer(f)));
}

#[test]
fn test_ordering() {
    assert!(DataObject::int(1).less_than(&DataObject::double(1.5)));
    assert!(DataObject::text("10").greater_than(&DataObject::text("1")));
    assert!(DataObject::text("a").less_than(&DataObject::text("b")));
    assert!(DataObject::int(2).less_than(&DataObject::text("3")));
    assert!(DataObject::int(2).less_than_or_equals(&DataObject::long(2)));
    assert!(DataObject::int(2).greater_than_or_equals(&DataObject::text("2")));
}

#[test]
fn test_incomparable_pairs_are_never_ordered() {
    let pairs = [
        (DataObject::null(), DataObject::int(1)),
        (DataObject::text("x"), DataObject::int(1)),
        (DataObject::void(), DataObject::void()),
        (DataObject::double(f64::NAN), DataObject::int(1)),
    ];
    for (a, b) in pairs {
        assert!(!a.less_than(&b), "{a:?} < {b:?}");
        assert!(!a.greater_than(&b), "{a:?} > {b:?}");
        assert!(!b.less_than(&a), "{b:?} < {a:?}");
    }
}
