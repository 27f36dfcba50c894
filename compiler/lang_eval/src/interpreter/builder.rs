//! Builder for creating Interpreter instances with various configurations.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use smallvec::SmallVec;

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::environment::{ReservedBindings, Scope, ScriptInfo};
use crate::predefined;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::random::{shared_random, SharedRandom};
use crate::registry::FunctionRegistry;
use crate::source::{FilesystemLoader, SourceLoader};

/// Nested user function calls allowed before `STACK_OVERFLOW`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Builder for creating Interpreter instances with various configurations.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    source_loader: Option<Arc<dyn SourceLoader>>,
    script_path: Option<PathBuf>,
    arguments: Vec<String>,
    stop_flag: Option<Arc<AtomicBool>>,
    max_call_depth: usize,
    random: Option<SharedRandom>,
    predefined: bool,
}

impl InterpreterBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            print_handler: None,
            source_loader: None,
            script_path: None,
            arguments: Vec::new(),
            stop_flag: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            random: None,
            predefined: true,
        }
    }

    /// Set the print handler for output (default: stdout).
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set where linked scripts are read from (default: filesystem).
    #[must_use]
    pub fn source_loader(mut self, loader: Arc<dyn SourceLoader>) -> Self {
        self.source_loader = Some(loader);
        self
    }

    /// Path of the main script; sets `$LANG_PATH` and `$LANG_FILE`.
    #[must_use]
    pub fn script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }

    /// Program arguments, exposed as `&LANG_ARGS`.
    #[must_use]
    pub fn arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Share a stop flag with the host (timeouts, Ctrl-C).
    #[must_use]
    pub fn stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Share a random generator between interpreters.
    #[must_use]
    pub fn random(mut self, random: SharedRandom) -> Self {
        self.random = Some(random);
        self
    }

    /// Start with an empty function registry.
    #[must_use]
    pub fn without_predefined(mut self) -> Self {
        self.predefined = false;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let info = ScriptInfo {
            arguments: Arc::from(self.arguments),
            ..ScriptInfo::default()
        };
        let info = match &self.script_path {
            Some(path) => info.for_file(path),
            None => info,
        };
        let root = Scope::new(Arc::new(ReservedBindings::new(info)));

        let mut registry = FunctionRegistry::new();
        if self.predefined {
            predefined::register(&mut registry);
        }

        Interpreter {
            scopes: vec![root],
            registry,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            loader: self
                .source_loader
                .unwrap_or_else(|| Arc::new(FilesystemLoader)),
            random: self.random.unwrap_or_else(|| shared_random(None)),
            stop: self.stop_flag.unwrap_or_default(),
            call_stack: CallStack::new(self.max_call_depth),
            try_frames: SmallVec::new(),
            pending: None,
            link_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
