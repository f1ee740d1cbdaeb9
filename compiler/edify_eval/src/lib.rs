//! Edify Eval - Evaluator core for edify scripts.
//!
//! An edify script is a tree of function calls whose leaves are string
//! literals. This crate evaluates such trees against a per-run [`State`]:
//! every call node is resolved by name in a [`FunctionTable`] and invoked
//! with its raw, unevaluated children, so each function controls whether
//! and in what order its arguments run.
//!
//! # Architecture
//!
//! - [`evaluate_value`] / [`evaluate`]: recursive dispatch
//! - [`read_args`] / [`read_value_args`]: eager argument evaluation
//! - [`error_abort!`]: failure reporting into the state
//! - [`FunctionTable`]: name to function mapping, process-wide or owned
//! - `builtins`: control flow, text, comparison, and I/O functions
//!
//! # Failure model
//!
//! Functions return `Err` to fail. The first failure of a run is latched
//! into the state's message and cause code, and every later evaluation
//! through that state fails without running anything.

mod builtins;
mod cause_code;
mod diagnostics;
pub mod errors;
mod eval;
mod function_table;
mod print_handler;
mod shared;
mod state;
mod value;

pub use builtins::{
    abort, assert, concat, greater_than_int, ifelse, is_substring, less_than_int, literal,
    parse_int, sleep, stdout,
};
pub use cause_code::CauseCode;
pub use diagnostics::{BacktraceFrame, CallFrame, CallStack, EvalBacktrace};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use eval::{
    error_abort, error_abort_with_cause, evaluate, evaluate_condition, evaluate_value, read_args,
    read_args_range, read_value_args, read_value_args_range,
};
pub use function_table::{
    find_function, function_table, register_builtins, register_function, Function,
    FunctionTable,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use shared::SharedRegistry;
pub use state::{State, StateBuilder};
pub use value::{Value, TRUE_TEXT};

pub use edify_ir::{Expr, ExprKind, Span};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=edify_eval=debug`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
