//! Lang Eval - tree-walking interpreter for Lang scripts.
//!
//! # Architecture
//!
//! - [`Interpreter`]: owns the flat scope table, the function registry and
//!   the host services (print handler, source loader, random generator,
//!   stop flag). Built with [`InterpreterBuilder`].
//! - `exec`: evaluation of every node kind. Evaluators return
//!   [`EvalResult`]; non-local exits travel as [`ControlAction`] in the
//!   error position and are consumed by the construct that owns them.
//! - `environment`: scopes, the shared reserved `LANG_*` bindings and the
//!   errno cell.
//! - `predefined`: the `func.` library and the `linker.` functions,
//!   registered as [`NativeFunction`](lang_value::NativeFunction)s.
//!
//! # Scoping
//!
//! A user function called from scope `n` runs in scope `n + 1`, seeded with
//! a copy of every binding of scope `n`. Reassignments stay local; arrays
//! stay shared. Translations flow back to the caller when the call returns.
//!
//! # Example
//!
//! ```text
//! let handler = buffer_handler();
//! let mut interpreter = Interpreter::builder()
//!     .print_handler(handler.clone())
//!     .build();
//! interpreter.run("func.println(Hello, World)");
//! assert_eq!(handler.get_output(), "Hello, World\n");
//! ```

mod diagnostics;
mod environment;
mod exec;
mod interpreter;
mod outcome;
mod predefined;
mod print_handler;
mod random;
mod registry;
mod source;

#[cfg(test)]
mod tests;

pub use diagnostics::{CallFrame, CallStack, DepthExceeded};
pub use environment::{is_reserved_name, ScriptInfo, LANG_VERSION};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH, MAX_LINK_DEPTH};
pub use outcome::{ControlAction, EvalResult, ExecutionOutcome};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use random::{shared_random, RandomGenerator, SharedRandom, LANG_RAND_MAX};
pub use registry::FunctionRegistry;
pub use source::{normalize_path, FilesystemLoader, MemoryLoader, SourceLoader};
