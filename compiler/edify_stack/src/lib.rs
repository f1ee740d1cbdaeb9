//! Stack safety for deep recursion.
//!
//! Script trees are walked recursively: every call node evaluates its
//! children by re-entering the evaluator. A pathological script (thousands
//! of nested `concat(...)` calls, for example) would otherwise exhaust the
//! native stack. Wrapping each dispatch in [`ensure_sufficient_stack`] grows
//! the stack on demand instead.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a fresh segment when needed.
//! - **WASM targets**: plain passthrough.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn evaluate_value(state: &mut State, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| dispatch(state, expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
