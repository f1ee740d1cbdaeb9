//! The builtin function set.
//!
//! Every builtin has the [`Function`] signature: its own name, the run's
//! state, and its unevaluated arguments.
//!
//! - control: `ifelse`, `abort`, `assert`
//! - text: `concat`, `is_substring`
//! - compare: `less_than_int`, `greater_than_int`
//! - io: `stdout`, `sleep`

mod compare;
mod control;
mod io;
mod text;

use edify_ir::Expr;

use crate::errors::EvalResult;
use crate::function_table::Function;
use crate::state::State;
use crate::value::Value;

pub use compare::{greater_than_int, less_than_int, parse_int};
pub use control::{abort, assert, ifelse};
pub use io::{sleep, stdout};
pub use text::{concat, is_substring};

/// Canonical names registered by `register_builtins`.
pub(crate) const BUILTINS: &[(&str, Function)] = &[
    ("ifelse", ifelse),
    ("abort", abort),
    ("assert", assert),
    ("concat", concat),
    ("is_substring", is_substring),
    ("stdout", stdout),
    ("sleep", sleep),
    ("less_than_int", less_than_int),
    ("greater_than_int", greater_than_int),
];

/// Evaluates to its own name.
///
/// Literal nodes evaluate through this; hosts can also register it under a
/// name to define a named constant.
pub fn literal(name: &str, _state: &mut State, _argv: &[Expr]) -> EvalResult {
    Ok(Value::string(name))
}
