//! Name-keyed registry of callable functions.
//!
//! Every call node is resolved here by exact, case-sensitive name at
//! evaluation time. The table is filled once before any script runs and is
//! only read afterwards, so concurrent runs may share it.
//!
//! Two forms exist:
//! - the process-wide table behind [`register_function`], [`find_function`]
//!   and [`register_builtins`], used by states that are not given a table
//! - owned [`FunctionTable`]s, shared through [`SharedRegistry`] and handed
//!   to a state with [`StateBuilder::function_table`]
//!
//! [`SharedRegistry`]: crate::SharedRegistry
//! [`StateBuilder::function_table`]: crate::StateBuilder::function_table

use std::fmt;
use std::sync::LazyLock;

use edify_ir::Expr;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builtins::BUILTINS;
use crate::errors::EvalResult;
use crate::state::State;

/// A native function callable from scripts.
///
/// Receives its own name, the run's state, and its *unevaluated* arguments.
/// It decides which arguments to evaluate and in what order.
pub type Function = fn(&str, &mut State, &[Expr]) -> EvalResult;

/// Registry mapping function names to callables.
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: FxHashMap<String, Function>,
}

impl FunctionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding exactly the builtin set.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register_builtins();
        table
    }

    /// Insert or replace the entry for `name`. Last registration wins.
    pub fn register(&mut self, name: impl Into<String>, function: Function) {
        let name = name.into();
        tracing::trace!(%name, "registering function");
        self.functions.insert(name, function);
    }

    /// Registered callable for `name`, if any.
    #[inline]
    pub fn find(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Register every builtin under its canonical name.
    ///
    /// Calling this again re-registers identical entries, and also restores
    /// any builtin a host had overridden.
    pub fn register_builtins(&mut self) {
        for &(name, function) in BUILTINS {
            self.register(name, function);
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
            .field("functions", &self.names())
            .finish()
    }
}

/// Process-wide table. Starts empty; hosts call [`register_builtins`] and
/// then register their own functions during startup.
static FUNCTION_TABLE: LazyLock<RwLock<FunctionTable>> =
    LazyLock::new(|| RwLock::new(FunctionTable::new()));

/// The process-wide table.
pub fn function_table() -> &'static RwLock<FunctionTable> {
    &FUNCTION_TABLE
}

/// Insert or replace `name` in the process-wide table.
///
/// Meant for startup, before any script is evaluated.
pub fn register_function(name: impl Into<String>, function: Function) {
    FUNCTION_TABLE.write().register(name, function);
}

/// Look `name` up in the process-wide table.
pub fn find_function(name: &str) -> Option<Function> {
    FUNCTION_TABLE.read().find(name)
}

/// Register the builtin set in the process-wide table. Idempotent.
pub fn register_builtins() {
    FUNCTION_TABLE.write().register_builtins();
}
