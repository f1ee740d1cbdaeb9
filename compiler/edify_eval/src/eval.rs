//! Recursive evaluation and the helpers functions use to evaluate their
//! arguments.
//!
//! Functions receive their arguments unevaluated. Eager functions call
//! [`read_args`] / [`read_value_args`]; lazy ones (`ifelse`, `assert`) call
//! [`evaluate_condition`] / [`evaluate_value`] on the children they select.

use std::fmt;
use std::ops::Range;

use edify_ir::{Expr, ExprKind};
use edify_stack::ensure_sufficient_stack;

use crate::builtins::literal;
use crate::cause_code::CauseCode;
use crate::diagnostics::CallFrame;
use crate::errors::{
    already_aborted, arg_range_exceeded, empty_arg_range, type_mismatch, unknown_function,
    EvalError, EvalResult,
};
use crate::state::State;
use crate::value::Value;

/// Evaluate `expr`, keeping the full value.
///
/// Fails immediately, without running anything, if `state` already holds a
/// failure. Otherwise resolves the node's function and invokes it with the
/// node's raw children. A failure is recorded in `state` on the way out.
pub fn evaluate_value(state: &mut State, expr: &Expr) -> EvalResult {
    if state.is_aborted() {
        return Err(already_aborted(state.errmsg(), state.cause_code()));
    }
    ensure_sufficient_stack(|| dispatch(state, expr))
}

#[tracing::instrument(level = "trace", skip_all, fields(function = %expr.name))]
fn dispatch(state: &mut State, expr: &Expr) -> EvalResult {
    if expr.kind == ExprKind::Literal {
        return literal(&expr.name, state, &expr.args);
    }

    let Some(function) = state.find_function(&expr.name) else {
        tracing::debug!(name = %expr.name, "call to unregistered function");
        return Err(state.latch(unknown_function(&expr.name).or_span(expr.span)));
    };

    if let Err(err) = state.push_frame(CallFrame::new(expr.name.as_str(), expr.span)) {
        return Err(state.latch(err.or_span(expr.span)));
    }
    let result = function(&expr.name, state, &expr.args)
        .map_err(|err| state.latch(err.or_span(expr.span)));
    state.pop_frame();
    result
}

/// Evaluate `expr` and require a text result.
///
/// A blob result is a type error.
pub fn evaluate(state: &mut State, expr: &Expr) -> Result<String, EvalError> {
    match evaluate_value(state, expr)?.into_string() {
        Ok(text) => Ok(text),
        Err(other) => {
            Err(state.latch(type_mismatch("string", other.type_name()).or_span(expr.span)))
        }
    }
}

/// Evaluate `expr` as text and test it: empty is false, anything else true.
pub fn evaluate_condition(state: &mut State, expr: &Expr) -> Result<bool, EvalError> {
    Ok(Value::string(evaluate(state, expr)?).is_truthy())
}

/// Evaluate every argument as text, left to right.
pub fn read_args(state: &mut State, argv: &[Expr]) -> Result<Vec<String>, EvalError> {
    read_args_range(state, argv, 0, argv.len())
}

/// Evaluate `argv[start..start + len]` as text, left to right.
///
/// A range past the end of `argv` fails before anything is evaluated. The
/// first failing argument stops evaluation; later arguments never run and
/// no partial results are returned.
pub fn read_args_range(
    state: &mut State,
    argv: &[Expr],
    start: usize,
    len: usize,
) -> Result<Vec<String>, EvalError> {
    let range = arg_range(argv, start, len)?;
    argv[range].iter().map(|arg| evaluate(state, arg)).collect()
}

/// Evaluate every argument, keeping full values. Requires at least one.
pub fn read_value_args(state: &mut State, argv: &[Expr]) -> Result<Vec<Value>, EvalError> {
    read_value_args_range(state, argv, 0, argv.len())
}

/// Evaluate `argv[start..start + len]`, keeping full values.
///
/// Same contract as [`read_args_range`], and an empty range is an error.
pub fn read_value_args_range(
    state: &mut State,
    argv: &[Expr],
    start: usize,
    len: usize,
) -> Result<Vec<Value>, EvalError> {
    if len == 0 {
        return Err(empty_arg_range());
    }
    let range = arg_range(argv, start, len)?;
    argv[range].iter().map(|arg| evaluate_value(state, arg)).collect()
}

fn arg_range(argv: &[Expr], start: usize, len: usize) -> Result<Range<usize>, EvalError> {
    match start.checked_add(len) {
        Some(end) if end <= argv.len() => Ok(start..end),
        _ => Err(arg_range_exceeded(start, len, argv.len())),
    }
}

/// Append a formatted message to the state's failure message.
///
/// The cause code is left as it is. Returns the error for the caller to
/// propagate; prefer the [`error_abort!`](crate::error_abort) macro.
pub fn error_abort(state: &mut State, args: fmt::Arguments<'_>) -> EvalError {
    let message = fmt::format(args);
    state.append_errmsg(&message);
    tracing::debug!(%message, "error_abort");
    EvalError::new(message).with_cause(state.cause_code())
}

/// Like [`error_abort`], and also set the state's cause code.
pub fn error_abort_with_cause(
    state: &mut State,
    cause: CauseCode,
    args: fmt::Arguments<'_>,
) -> EvalError {
    let message = fmt::format(args);
    state.append_errmsg(&message);
    state.set_cause_code(cause);
    tracing::debug!(%message, %cause, "error_abort");
    EvalError::new(message).with_cause(cause)
}

/// Compose a failure message into the state, `format!`-style.
///
/// ```text
/// return Err(error_abort!(state, "{name}() expects 1 arg, got {}", argv.len()));
/// ```
#[macro_export]
macro_rules! error_abort {
    ($state:expr, $($arg:tt)+) => {
        $crate::error_abort($state, ::std::format_args!($($arg)+))
    };
}

/// Compose a failure message and cause code into the state.
///
/// ```text
/// return Err(error_abort_with_cause!(state, CauseCode::FileOpenFailure, "open {path}: {err}"));
/// ```
#[macro_export]
macro_rules! error_abort_with_cause {
    ($state:expr, $cause:expr, $($arg:tt)+) => {
        $crate::error_abort_with_cause($state, $cause, ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests;
