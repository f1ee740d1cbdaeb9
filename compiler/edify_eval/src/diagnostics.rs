//! Call tracking for diagnostics.
//!
//! - `CallStack`: the builtin frames currently executing, with an optional
//!   depth limit
//! - `EvalBacktrace`: immutable snapshot of those frames, stored on the
//!   error recorded for a run

use std::fmt;

use edify_ir::Span;

use crate::errors::{recursion_limit_exceeded, EvalError};

/// One builtin invocation in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function name as written in the script.
    pub name: String,
    /// Location of the call node.
    pub span: Span,
}

impl CallFrame {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Live stack of builtin frames for one run.
///
/// The evaluator pushes a frame before invoking a function and pops it after.
/// The depth check lives in `push()`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means unlimited; native stack growth still protects the walk.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `RecursionLimit` if the stack is full.
    ///
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Number of active frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the active frames, innermost first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(
            self.frames
                .iter()
                .rev()
                .map(|frame| BacktraceFrame {
                    name: frame.name.clone(),
                    span: frame.span,
                })
                .collect(),
        )
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    pub span: Span,
}

/// Immutable snapshot of the call stack at a failure, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if !frame.span.is_empty() {
                write!(f, " at {}", frame.span)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
