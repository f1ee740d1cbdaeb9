//! Per-run execution context.
//!
//! A host builds one [`State`] per script run, evaluates the root expression
//! against it, and then reads the result or the recorded failure. The first
//! failure of a run is latched into the state: after that every evaluation
//! through the same state fails immediately without running any function.

use std::any::Any;
use std::fmt;

use edify_ir::Expr;

use crate::cause_code::CauseCode;
use crate::diagnostics::{CallFrame, CallStack};
use crate::errors::EvalError;
use crate::function_table::{find_function, Function, FunctionTable};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::shared::SharedRegistry;

/// Where a state resolves function names.
#[derive(Clone, Debug)]
enum TableSource {
    /// The process-wide table.
    Global,
    /// A table owned by the host.
    Shared(SharedRegistry<FunctionTable>),
}

/// Execution context threaded through every evaluation call.
pub struct State {
    /// Script text, kept for diagnostics only.
    script: String,
    /// Opaque host context. The core never looks inside.
    cookie: Option<Box<dyn Any + Send>>,
    /// Failure message; non-empty means the run is aborted.
    errmsg: String,
    cause_code: CauseCode,
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
    table: TableSource,
}

impl State {
    /// State with no cookie, stdout output, and the process-wide table.
    pub fn new(script: impl Into<String>) -> Self {
        StateBuilder::new(script).build()
    }

    pub fn builder(script: impl Into<String>) -> StateBuilder {
        StateBuilder::new(script)
    }

    /// The script text this run was built from.
    #[inline]
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Source text of `expr`, if its span points into the script.
    pub fn source_of(&self, expr: &Expr) -> Option<&str> {
        expr.span.slice(&self.script)
    }

    /// Borrow the host cookie as `T`.
    ///
    /// `None` when there is no cookie or it holds another type.
    pub fn cookie<T: Any>(&self) -> Option<&T> {
        self.cookie.as_deref()?.downcast_ref::<T>()
    }

    /// Mutably borrow the host cookie as `T`.
    pub fn cookie_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.cookie.as_deref_mut()?.downcast_mut::<T>()
    }

    /// Take the cookie back, typically after the run finishes.
    pub fn take_cookie(&mut self) -> Option<Box<dyn Any + Send>> {
        self.cookie.take()
    }

    /// Accumulated failure message; empty while the run is healthy.
    #[inline]
    pub fn errmsg(&self) -> &str {
        &self.errmsg
    }

    #[inline]
    pub fn cause_code(&self) -> CauseCode {
        self.cause_code
    }

    /// Whether a failure has been recorded.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        !self.errmsg.is_empty()
    }

    /// Output channel for the `stdout` builtin.
    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Builtin frames currently executing.
    #[inline]
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Resolve `name` in this state's function table.
    pub fn find_function(&self, name: &str) -> Option<Function> {
        match &self.table {
            TableSource::Global => find_function(name),
            TableSource::Shared(table) => table.find(name),
        }
    }

    pub(crate) fn append_errmsg(&mut self, message: &str) {
        self.errmsg.push_str(message);
    }

    pub(crate) fn set_cause_code(&mut self, cause: CauseCode) {
        self.cause_code = cause;
    }

    pub(crate) fn push_frame(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        self.call_stack.push(frame)
    }

    pub(crate) fn pop_frame(&mut self) {
        self.call_stack.pop();
    }

    /// Record `err` as the run's failure unless one is already recorded.
    ///
    /// Returns the error with the current backtrace attached. An existing
    /// message and cause are never overwritten.
    pub(crate) fn latch(&mut self, mut err: EvalError) -> EvalError {
        if err.backtrace.is_none() && !self.call_stack.is_empty() {
            err = err.with_backtrace(self.call_stack.capture());
        }
        if self.is_aborted() {
            return err;
        }

        if err.message.is_empty() {
            let context = self
                .call_stack
                .capture()
                .frames()
                .first()
                .map_or_else(|| "script".to_string(), |frame| format!("{}()", frame.name));
            self.errmsg = format!("{context} failed");
        } else {
            self.errmsg.push_str(&err.message);
        }
        if err.cause.is_specified() {
            self.cause_code = err.cause;
        }
        tracing::debug!(
            message = %self.errmsg,
            cause = %self.cause_code,
            "script evaluation aborted"
        );
        err
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("script_len", &self.script.len())
            .field("has_cookie", &self.cookie.is_some())
            .field("errmsg", &self.errmsg)
            .field("cause_code", &self.cause_code)
            .field("depth", &self.call_stack.depth())
            .finish_non_exhaustive()
    }
}

/// Builder for [`State`].
///
/// Defaults: no cookie, output to stdout, the process-wide function table,
/// unlimited nesting.
pub struct StateBuilder {
    script: String,
    cookie: Option<Box<dyn Any + Send>>,
    print_handler: Option<SharedPrintHandler>,
    table: Option<SharedRegistry<FunctionTable>>,
    max_depth: Option<usize>,
}

impl StateBuilder {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            cookie: None,
            print_handler: None,
            table: None,
            max_depth: None,
        }
    }

    /// Host context handed through to every function unchanged.
    #[must_use]
    pub fn cookie<T: Any + Send>(mut self, cookie: T) -> Self {
        self.cookie = Some(Box::new(cookie));
        self
    }

    /// Where `stdout` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Resolve names in `table` instead of the process-wide table.
    #[must_use]
    pub fn function_table(mut self, table: SharedRegistry<FunctionTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Fail with `RecursionLimit` once this many function calls are nested.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn build(self) -> State {
        State {
            script: self.script,
            cookie: self.cookie,
            errmsg: String::new(),
            cause_code: CauseCode::NoCause,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_depth),
            table: self.table.map_or(TableSource::Global, TableSource::Shared),
        }
    }
}
