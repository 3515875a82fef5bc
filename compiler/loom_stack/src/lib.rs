//! Stack growth for deeply nested input.
//!
//! The parser recurses once per nesting level of statements and expressions.
//! Wrapping those recursive entry points in [`ensure_sufficient_stack`] lets
//! input such as a hundred thousand nested parentheses parse without
//! overflowing the thread's stack. Code that walks finished trees does not
//! need this: tree walks and drops use heap work-lists instead.

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
