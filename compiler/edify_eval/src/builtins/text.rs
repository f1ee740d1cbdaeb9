use edify_ir::Expr;

use crate::errors::{wrong_arg_count, EvalResult};
use crate::eval::read_args;
use crate::state::State;
use crate::value::Value;

/// `concat(...)` joins its arguments' text. No arguments yields `""`.
pub fn concat(_name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    Ok(Value::string(read_args(state, argv)?.concat()))
}

/// `is_substring(needle, haystack)`
pub fn is_substring(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    if argv.len() != 2 {
        return Err(wrong_arg_count(name, "2", argv.len()));
    }

    let args = read_args(state, argv)?;
    Ok(Value::bool(args[1].contains(args[0].as_str())))
}
