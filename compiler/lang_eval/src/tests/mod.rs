//! Interpreter tests over whole scripts.

#![allow(clippy::unwrap_used)]

mod script_tests;

use std::sync::Arc;

use lang_value::{DataObject, InterpretingError};

use crate::{buffer_handler, ExecutionOutcome, Interpreter, InterpreterBuilder, SharedPrintHandler};

/// A finished script run.
pub(super) struct Run {
    pub interpreter: Interpreter,
    pub output: SharedPrintHandler,
    pub outcome: ExecutionOutcome,
}

impl Run {
    pub fn var(&self, name: &str) -> DataObject {
        self.interpreter
            .variable(name)
            .unwrap_or_else(|| panic!("{name} is not bound"))
    }

    pub fn int(&self, name: &str) -> i32 {
        self.var(name).as_int().unwrap()
    }

    pub fn text(&self, name: &str) -> String {
        self.var(name).to_text()
    }

    pub fn error(&self, name: &str) -> InterpretingError {
        self.var(name).as_error().unwrap().kind()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.interpreter.variable(name).is_some()
    }

    pub fn errno(&self) -> InterpretingError {
        self.interpreter.errno()
    }

    pub fn output(&self) -> String {
        self.output.get_output()
    }
}

pub(super) fn run(source: &str) -> Run {
    run_with(Interpreter::builder(), source)
}

pub(super) fn run_with(builder: InterpreterBuilder, source: &str) -> Run {
    let output = buffer_handler();
    let mut interpreter = builder.print_handler(Arc::clone(&output)).build();
    let outcome = interpreter.run(source);
    Run {
        interpreter,
        output,
        outcome,
    }
}
