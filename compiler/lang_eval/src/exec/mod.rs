//! Node evaluation.
//!
//! Every evaluator returns [`EvalResult`]: `Ok(Some(value))`, `Ok(None)` for
//! Void, or `Err(ControlAction)` for a signal the caller must pass on or
//! consume. Language errors are values: they stamp errno and flow on as
//! Error objects.
//!
//! - `expr`: dispatch, lists, literals, escapes
//! - `variable`: name resolution, references, assignment
//! - `operation`: operators with short-circuiting
//! - `call`: the call protocol for user and native functions
//! - `control`: `if`, loops and `try`

mod call;
mod control;
mod expr;
mod operation;
mod variable;
