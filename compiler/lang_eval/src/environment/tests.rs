#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::sync::Arc;

use lang_value::{DataObject, DataType, InterpretingError};
use pretty_assertions::assert_eq;

use super::*;

fn scope() -> Scope {
    let info = ScriptInfo {
        directory: "scripts".into(),
        file: "main.lang".to_string(),
        arguments: Arc::from(vec!["one".to_string(), "two".to_string()]),
    };
    Scope::new(Arc::new(ReservedBindings::new(info)))
}

#[test]
fn reserved_names() {
    assert!(is_reserved_name("$LANG_PATH"));
    assert!(is_reserved_name("&LANG_ARGS"));
    assert!(is_reserved_name("$LANG_ANYTHING"));
    assert!(!is_reserved_name("$LANGUAGE"));
    assert!(!is_reserved_name("$my_LANG_x"));
}

#[test]
fn reserved_bindings_are_final_and_named() {
    let scope = scope();
    let path = scope.slot("$LANG_PATH").unwrap().get();
    assert_eq!(path.to_text(), "scripts");
    assert!(path.is_final());
    assert_eq!(path.variable_name(), Some("$LANG_PATH"));
    assert_eq!(scope.slot("$LANG_FILE").unwrap().get().to_text(), "main.lang");
    assert_eq!(
        scope.slot("$LANG_ERRNO_DIV_BY_ZERO").unwrap().get().as_int(),
        Some(InterpretingError::DivByZero.code())
    );
    assert_eq!(
        scope
            .slot("$LANG_ERROR_DIV_BY_ZERO")
            .unwrap()
            .get()
            .as_error()
            .map(lang_value::ErrorObject::kind),
        Some(InterpretingError::DivByZero)
    );
}

#[test]
fn program_arguments_are_a_final_array() {
    let scope = scope();
    let args = scope.slot("&LANG_ARGS").unwrap().get();
    assert_eq!(args.data_type(), DataType::Array);
    let array = args.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert!(array.get(0).unwrap().is_final());
    assert!(!array.set(0, DataObject::int(1)));
}

#[test]
fn errno_warnings_do_not_hide_errors() {
    let mut scope = scope();
    scope.set_errno(InterpretingError::DivByZero);
    scope.set_errno(InterpretingError::DeprecatedFuncCall);
    assert_eq!(scope.errno(), InterpretingError::DivByZero);
    assert_eq!(scope.take_errno(), InterpretingError::DivByZero);
    assert_eq!(scope.errno(), InterpretingError::NoError);

    scope.set_errno(InterpretingError::DeprecatedFuncCall);
    assert_eq!(scope.errno(), InterpretingError::DeprecatedFuncCall);
    scope.set_errno(InterpretingError::IndexOutOfBounds);
    assert_eq!(scope.errno(), InterpretingError::IndexOutOfBounds);
}

#[test]
fn copy_down_snapshots_bindings() {
    let mut caller = scope();
    caller.define("$a", DataObject::int(1));
    caller.define("&list", DataObject::array(vec![DataObject::int(1)]));
    caller.set_translation("greeting", "hi");

    let callee = caller.copy_down();
    callee.slot("$a").unwrap().assign(DataObject::int(2)).unwrap();
    callee
        .slot("&list")
        .unwrap()
        .get()
        .as_array()
        .unwrap()
        .set(0, DataObject::int(9));

    assert_eq!(caller.slot("$a").unwrap().get().as_int(), Some(1));
    assert_eq!(
        caller
            .slot("&list")
            .unwrap()
            .get()
            .as_array()
            .unwrap()
            .get(0)
            .unwrap()
            .as_int(),
        Some(9)
    );
    assert_eq!(callee.translation("greeting"), Some("hi"));
}

#[test]
fn script_info_for_linked_file() {
    let info = ScriptInfo::default().for_file(Path::new("lib/util.lang"));
    assert_eq!(info.directory, Path::new("lib"));
    assert_eq!(info.file, "util.lang");
}
