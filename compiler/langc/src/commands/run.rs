//! The `run` command: parse and evaluate a script file.

use std::sync::atomic::Ordering;
use std::thread;

use lang_eval::{ExecutionOutcome, Interpreter, SharedPrintHandler};
use tracing::debug;

use super::read_file;
use crate::{CliError, RunOptions};

/// Run the script named by `options`, printing through `print_handler`.
/// Returns the process exit code.
pub fn run_file(options: &RunOptions, print_handler: SharedPrintHandler) -> Result<i32, CliError> {
    let source = read_file(&options.path)?;

    let mut builder = Interpreter::builder()
        .print_handler(print_handler)
        .script_path(&options.path)
        .arguments(options.arguments.iter().cloned());
    if let Some(depth) = options.max_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interpreter = builder.build();

    if let Some(timeout) = options.timeout {
        let stop = interpreter.stop_flag();
        thread::spawn(move || {
            thread::sleep(timeout);
            stop.store(true, Ordering::Relaxed);
        });
    }

    let outcome = interpreter.run(&source);
    debug!(path = %options.path.display(), ?outcome, errno = %interpreter.errno(), "script finished");
    Ok(exit_code(&outcome, &interpreter))
}

/// Exit code for a finished script: a returned number, 1 for an uncaught
/// throw, 2 when stopped, else 0. Failures are reported on the error stream.
pub fn exit_code(outcome: &ExecutionOutcome, interpreter: &Interpreter) -> i32 {
    match outcome {
        ExecutionOutcome::Completed => 0,
        ExecutionOutcome::Returned(value) => value.as_ref().and_then(|value| value.as_int()).unwrap_or(0),
        ExecutionOutcome::Thrown(error) => {
            interpreter
                .print_handler()
                .print_error(&format!("uncaught error: {}\n", error.to_text()));
            1
        }
        ExecutionOutcome::Stopped => {
            interpreter.print_handler().print_error("script stopped\n");
            2
        }
    }
}
