//! Print handler for configurable output.
//!
//! `func.print`, `func.println` and `func.printError` never touch the process
//! streams directly; they go through the handler the host installed:
//! - CLI: stdout / stderr (default)
//! - Embedding hosts and tests: buffer for capture and assertions
//! - Silent: discard everything
//!
//! # Performance
//! Uses enum dispatch instead of trait objects, so the hot print path is a
//! plain `match`.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Default print handler that writes to the process streams.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    /// Print without newline.
    pub fn print(&self, msg: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not a script error.
        let _ = out.write_all(msg.as_bytes());
        let _ = out.flush();
    }

    /// Print to standard error.
    pub fn print_error(&self, msg: &str) {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(msg.as_bytes());
    }
}

/// Print handler that captures output to buffers.
///
/// Standard output and standard error are kept apart so tests can assert on
/// each stream.
pub struct BufferPrintHandler {
    output: Mutex<String>,
    errors: Mutex<String>,
}

impl BufferPrintHandler {
    /// Create a new buffer print handler.
    pub fn new() -> Self {
        BufferPrintHandler {
            output: Mutex::new(String::new()),
            errors: Mutex::new(String::new()),
        }
    }

    pub fn print(&self, msg: &str) {
        self.output.lock().push_str(msg);
    }

    pub fn print_error(&self, msg: &str) {
        self.errors.lock().push_str(msg);
    }

    /// Get all captured standard output.
    pub fn get_output(&self) -> String {
        self.output.lock().clone()
    }

    /// Get all captured standard error.
    pub fn get_errors(&self) -> String {
        self.errors.lock().clone()
    }

    /// Clear both buffers.
    pub fn clear(&self) {
        self.output.lock().clear();
        self.errors.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout / stderr (default).
    Stdout(StdoutPrintHandler),
    /// Captures to buffers (embedding / testing).
    Buffer(BufferPrintHandler),
    /// Discards all output silently.
    Silent,
}

impl PrintHandlerImpl {
    /// Print without newline.
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        let mut line = String::with_capacity(msg.len() + 1);
        line.push_str(msg);
        line.push('\n');
        self.print(&line);
    }

    /// Print to standard error without newline.
    pub fn print_error(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print_error(msg),
            Self::Buffer(h) => h.print_error(msg),
            Self::Silent => {}
        }
    }

    /// Get all captured standard output.
    ///
    /// Returns empty string for handlers that don't capture (stdout, silent).
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Get all captured standard error.
    pub fn get_errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_errors(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output.
    pub fn clear(&self) {
        match self {
            Self::Buffer(h) => h.clear(),
            Self::Stdout(_) | Self::Silent => {}
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn buffer_handler_println_captures_with_newline() {
        let handler = buffer_handler();
        handler.println("hello");
        assert_eq!(handler.get_output(), "hello\n");
    }

    #[test]
    fn buffer_handler_keeps_streams_apart() {
        let handler = BufferPrintHandler::new();
        handler.print("out");
        handler.print_error("err");
        assert_eq!(handler.get_output(), "out");
        assert_eq!(handler.get_errors(), "err");
    }

    #[test]
    fn buffer_handler_clear_empties_both_buffers() {
        let handler = BufferPrintHandler::new();
        handler.print("hello");
        handler.print_error("oops");
        handler.clear();
        assert!(handler.get_output().is_empty());
        assert!(handler.get_errors().is_empty());
    }

    #[test]
    fn silent_handler_discards_output() {
        let handler = silent_handler();
        handler.println("hello");
        handler.print_error("world");
        assert_eq!(handler.get_output(), "");
        assert_eq!(handler.get_errors(), "");
    }

    #[test]
    fn buffer_handler_is_thread_safe() {
        use std::thread;

        let handler = buffer_handler();
        let handler2 = Arc::clone(&handler);

        let t1 = thread::spawn(move || {
            for _ in 0..100 {
                handler2.println("a");
            }
        });

        for _ in 0..100 {
            handler.println("b");
        }

        t1.join().unwrap();

        assert_eq!(handler.get_output().lines().count(), 200);
    }
}
