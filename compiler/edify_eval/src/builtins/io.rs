use std::time::Duration;

use edify_ir::Expr;

use super::compare::parse_int;
use crate::errors::{int_parse_failure, wrong_arg_count, EvalResult};
use crate::eval::read_args;
use crate::state::State;
use crate::value::Value;

/// `stdout(...)` writes each argument's text to the state's print handler.
///
/// All arguments are evaluated before anything is written. Returns the last
/// argument's text, or `""` with no arguments.
pub fn stdout(_name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    let mut args = read_args(state, argv)?;
    for text in &args {
        state.print_handler().print(text);
    }
    Ok(Value::string(args.pop().unwrap_or_default()))
}

/// `sleep(secs)` blocks the calling thread. Not cancellable.
pub fn sleep(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    if argv.len() != 1 {
        return Err(wrong_arg_count(name, "1", argv.len()));
    }

    let args = read_args(state, argv)?;
    let secs = parse_int(&args[0])
        .and_then(|secs| u64::try_from(secs).ok())
        .ok_or_else(|| int_parse_failure(&args[0]))?;

    tracing::debug!(secs, "sleeping");
    std::thread::sleep(Duration::from_secs(secs));
    Ok(Value::empty())
}
