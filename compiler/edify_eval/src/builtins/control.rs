use edify_ir::Expr;

use crate::errors::{assertion_failed, wrong_arg_count, EvalResult};
use crate::eval::{evaluate, evaluate_condition, evaluate_value};
use crate::state::State;
use crate::value::Value;

/// `ifelse(cond, then[, else])`
///
/// Only the selected branch is evaluated. With no else branch a false
/// condition yields `""`.
pub fn ifelse(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    if argv.len() != 2 && argv.len() != 3 {
        return Err(wrong_arg_count(name, "2 or 3", argv.len()));
    }

    if evaluate_condition(state, &argv[0])? {
        evaluate_value(state, &argv[1])
    } else if let Some(else_branch) = argv.get(2) {
        evaluate_value(state, else_branch)
    } else {
        Ok(Value::empty())
    }
}

/// `abort([msg])`
///
/// Always fails. The message is `msg`'s text, or `"<name> called"`.
pub fn abort(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    let message = match argv.first() {
        Some(msg) => evaluate(state, msg)?,
        None => String::new(),
    };
    if message.is_empty() {
        return Err(crate::error_abort!(state, "{name} called"));
    }
    Err(crate::error_abort!(state, "{message}"))
}

/// `assert(cond, ...)`
///
/// Checks each condition in order; the first false one fails the run with
/// its source text.
pub fn assert(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    if argv.is_empty() {
        return Err(wrong_arg_count(name, "at least 1", 0));
    }

    for cond in argv {
        if !evaluate_condition(state, cond)? {
            let source = state
                .source_of(cond)
                .map_or_else(|| cond.to_string(), str::to_string);
            return Err(assertion_failed(&source).with_span(cond.span));
        }
    }
    Ok(Value::bool(true))
}
