//! Host-owned function tables shared between states.
//!
//! A host that wants its own set of functions, instead of the process-wide
//! table, builds a [`FunctionTable`](crate::FunctionTable) once, wraps it
//! here, and hands a clone to every [`State`](crate::State) it creates. Runs
//! on different threads then resolve names against the same table without
//! locking.

use std::fmt;
use std::sync::Arc;

/// Read-only handle to a table shared by many states.
///
/// Cloning is a reference-count bump. There is no way back to `&mut T`, so a
/// table is complete before it is wrapped.
pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    /// Freeze `registry` and share it.
    pub fn new(registry: T) -> Self {
        SharedRegistry(Arc::new(registry))
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRegistry({:?})", &*self.0)
    }
}
