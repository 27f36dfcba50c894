//! Stack safety for the recursive parts of Lang.
//!
//! Nested brackets in the parser, nested blocks and user function calls in
//! the interpreter, and rendering of nested arrays all recurse on the native
//! stack. Scripts control the depth, so every recursive entry point goes
//! through [`ensure_sufficient_stack`], which grows the stack on demand
//! instead of aborting the host process.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
///
/// One interpreted user function call costs a few kilobytes of native stack
/// (statement loop, expression dispatch, call protocol), so a segment holds
/// several hundred nested calls.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the native stack first if less than the red zone remains.
///
/// ```text
/// fn eval_node(&mut self, node: &Node, scope: ScopeId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_node_inner(node, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting_depth(text: &str) -> usize {
        ensure_sufficient_stack(|| match text.strip_prefix('(') {
            Some(rest) => 1 + nesting_depth(rest),
            None => 0,
        })
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nesting_depth("((("), 3);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let text = "(".repeat(200_000);
        assert_eq!(nesting_depth(&text), 200_000);
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("stop".to_string()));
        assert_eq!(result, Err("stop".to_string()));
    }
}
