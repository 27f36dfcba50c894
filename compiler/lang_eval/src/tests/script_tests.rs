//! Tests for variables, assignment, operators and errno.

use lang_value::{DataType, InterpretingError};
use pretty_assertions::assert_eq;

use super::{run, run_with};
use crate::{ExecutionOutcome, Interpreter};

#[test]
fn test_division_of_ints_is_float() {
    let run = run("$a = 5\n$b = 2\n$c = $a / $b");
    let c = run.var("$c");
    assert_eq!(c.data_type(), DataType::Float);
    assert_eq!(c.as_float(), Some(2.5));
}

#[test]
fn test_unknown_function_sets_errno() {
    let run = run("func.doesNotExist()");
    assert_eq!(run.errno(), InterpretingError::FunctionNotFound);
}

#[test]
fn test_reserved_constant_can_not_change() {
    let run = run_with(
        Interpreter::builder().script_path("scripts/main.lang"),
        "$LANG_PATH = elsewhere",
    );
    assert_eq!(run.text("$LANG_PATH"), "scripts");
    assert_eq!(run.text("$LANG_FILE"), "main.lang");
    assert_eq!(run.errno(), InterpretingError::FinalVarChange);
}

#[test]
fn test_reading_errno_clears_it() {
    let run = run("func.doesNotExist()\n$code = $LANG_ERRNO\n$again = $LANG_ERRNO");
    assert_eq!(run.int("$code"), InterpretingError::FunctionNotFound.code());
    assert_eq!(run.int("$again"), 0);
    assert_eq!(run.errno(), InterpretingError::NoError);
}

#[test]
fn test_warning_does_not_hide_error() {
    let run = run("$r = 1 // 0\n$a = \\q");
    assert_eq!(run.errno(), InterpretingError::DivByZero);
    assert_eq!(run.var("$a").as_char(), Some('q'));
}

#[test]
fn test_undefined_escape_is_a_warning() {
    let run = run("$a = \\q");
    assert_eq!(run.errno(), InterpretingError::UndefEscapeSequence);
}

#[test]
fn test_text_interpolation() {
    let run = run("$name = World\nfunc.println(Hello $name!)\nfunc.println($names)");
    assert_eq!(run.output(), "Hello World!\nWorlds\n");
}

#[test]
fn test_escapes_in_text() {
    let run = run("func.println(a\\tb\\sc)");
    assert_eq!(run.output(), "a\tb c\n");
}

#[test]
fn test_println_keeps_separators() {
    let run = run("func.println(a,   b)\nfunc.println()");
    assert_eq!(run.output(), "a,   b\n\n");
}

#[test]
fn test_unresolved_variable_is_null() {
    let run = run("$r = $missing ?? fallback");
    assert_eq!(run.text("$r"), "fallback");
    assert!(run.var("$missing").is_null());
}

#[test]
fn test_huge_text_repeat_is_refused() {
    let run = run("$t = ab\n$r = $t * 5000000000000000000\n$s = $t * 2");
    assert_eq!(run.error("$r"), InterpretingError::InvalidArguments);
    assert_eq!(run.errno(), InterpretingError::InvalidArguments);
    assert_eq!(run.text("$s"), "abab");
}

#[test]
fn test_compound_assignment() {
    let run = run("$a = 5\n$a += 2\n$a *= 3\n$s = ab\n$s |||= cd");
    assert_eq!(run.int("$a"), 21);
    assert_eq!(run.text("$s"), "abcd");
}

#[test]
fn test_short_circuit_skips_right_operand() {
    let run = run("$r = 0 && func.doesNotExist()\n$s = 1 || func.doesNotExist()");
    assert_eq!(run.int("$r"), 0);
    assert_eq!(run.int("$s"), 1);
    assert_eq!(run.errno(), InterpretingError::NoError);
}

#[test]
fn test_conditional_and_elvis() {
    let run = run("$a = 1\n$r = $a ? yes : no\n$e = $empty ?: default");
    assert_eq!(run.text("$r"), "yes");
    assert_eq!(run.text("$e"), "default");
}

#[test]
fn test_array_sigil_needs_array() {
    let run = run("&a = 5");
    assert_eq!(run.errno(), InterpretingError::IncompatibleDataType);
    assert!(!run.is_bound("&a"));
}

#[test]
fn test_indexed_assignment_and_bounds() {
    let run = run("&l = [1, 2, 3]\n&l[-1] = 9\n$last = &l[2]\n$r = &l[5]");
    assert_eq!(run.int("$last"), 9);
    assert_eq!(run.error("$r"), InterpretingError::IndexOutOfBounds);
    assert_eq!(run.errno(), InterpretingError::IndexOutOfBounds);
}

#[test]
fn test_arrays_are_shared_between_bindings() {
    let run = run("&a = [1, 2]\n&b = &a\n&b[0] = 5\n&c = ^&a\n&c[0] = 7\n$first = &a[0]");
    assert_eq!(run.int("$first"), 5);
}

#[test]
fn test_pointers() {
    let run = run("$a = 1\n$p = $[$a]\n$*p = 2\n$v = $*p");
    assert_eq!(run.int("$a"), 2);
    assert_eq!(run.int("$v"), 2);
    assert_eq!(run.var("$p").data_type(), DataType::VarPointer);
}

#[test]
fn test_dereferencing_a_non_pointer() {
    let run = run("$a = 1\n$v = $*a");
    assert_eq!(run.error("$v"), InterpretingError::InvalidPtr);
}

#[test]
fn test_translations() {
    let run = run("greeting = Hello\\sthere\n$t = func.getTranslationValue(greeting)");
    assert_eq!(run.interpreter.translation("greeting"), Some("Hello there"));
    assert_eq!(run.text("$t"), "Hello there");
}

#[test]
fn test_parse_error_becomes_error_value() {
    let run = run("$a = (1 + 2\n$b = 1");
    assert_eq!(run.error("$a"), InterpretingError::BracketMismatch);
    assert_eq!(run.int("$b"), 1);
}

#[test]
fn test_top_level_return() {
    let run = run("return 42\n$after = 1");
    assert_eq!(
        run.outcome.returned_value().and_then(|value| value.as_int()),
        Some(42)
    );
    assert!(!run.is_bound("$after"));
}

#[test]
fn test_uncaught_throw_ends_script() {
    let run = run("throw $LANG_ERROR_DIV_BY_ZERO\n$after = 1");
    let ExecutionOutcome::Thrown(error) = &run.outcome else {
        panic!("expected a throw, got {:?}", run.outcome);
    };
    assert_eq!(
        error.as_error().map(lang_value::ErrorObject::kind),
        Some(InterpretingError::DivByZero)
    );
    assert!(!run.is_bound("$after"));
    assert_eq!(run.errno(), InterpretingError::DivByZero);
}

#[test]
fn test_throw_replaces_non_error_payload() {
    let run = run("throw 5\n$after = 1");
    let ExecutionOutcome::Thrown(error) = &run.outcome else {
        panic!("expected a throw, got {:?}", run.outcome);
    };
    assert_eq!(
        error.as_error().map(lang_value::ErrorObject::kind),
        Some(InterpretingError::IncompatibleDataType)
    );
    assert!(!run.is_bound("$after"));
    assert_eq!(run.errno(), InterpretingError::IncompatibleDataType);
}

#[test]
fn test_non_error_throw_is_catchable() {
    let run = run(
        "try\n\tthrow 5\n\t$after = 1\ncatch($LANG_ERROR_INCOMPATIBLE_DATA_TYPE)\n\t$caught = 1\nendtry",
    );
    assert!(matches!(run.outcome, ExecutionOutcome::Completed));
    assert_eq!(run.int("$caught"), 1);
    assert!(!run.is_bound("$after"));
}
