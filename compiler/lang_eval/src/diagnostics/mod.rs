//! Call frame tracking for the evaluator.
//!
//! `CallStack` records one frame per active user function call and enforces
//! the configured maximum depth. Native calls do not push frames; they cannot
//! recurse without going through a user function or a link.

use std::sync::Arc;

/// A single frame in the live call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Name the function was called through (`fp.f`, `$g`, `<anonymous>`).
    pub name: Arc<str>,
}

/// Pushing would exceed the configured depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub max_depth: usize,
}

/// Live call stack for the interpreter.
///
/// The depth check is integrated into `push()`: on overflow the frame is not
/// pushed and the caller reports `STACK_OVERFLOW`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), DepthExceeded> {
        if self.frames.len() >= self.max_depth {
            return Err(DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The current (most recent) call frame, if any.
    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Frame names, innermost first, for diagnostics.
    pub fn backtrace(&self) -> Vec<Arc<str>> {
        self.frames
            .iter()
            .rev()
            .map(|frame| Arc::clone(&frame.name))
            .collect()
    }
}
