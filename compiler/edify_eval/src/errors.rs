//! Error types for script evaluation.
//!
//! `EvalErrorKind` gives each failure a structured category so hosts and
//! tests can match on it instead of parsing text. Factory functions are the
//! public way to build errors: each fills in `kind`, `message`, and the
//! host-facing [`CauseCode`].

use std::fmt;

use edify_ir::Span;

use crate::cause_code::CauseCode;
use crate::diagnostics::EvalBacktrace;
use crate::value::Value;

/// Result of evaluating one expression.
pub type EvalResult = Result<Value, EvalError>;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Call names a function missing from the function table.
    UnknownFunction { name: String },
    /// Builtin received an argument count it cannot accept.
    ///
    /// `expected` is descriptive: `"2"`, `"2 or 3"`, `"at least 1"`.
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
    /// A value of the wrong payload type reached a text-only consumer.
    TypeMismatch { expected: String, got: String },
    /// Text could not be parsed as a 64-bit integer.
    IntParse { text: String },
    /// An argument helper was asked for children that do not exist.
    ArgRange {
        start: usize,
        len: usize,
        available: usize,
    },
    /// `read_value_args` was asked to evaluate nothing.
    EmptyArgRange,
    /// An `assert` condition was false.
    AssertionFailed { condition: String },
    /// Nesting exceeded the state's depth limit.
    RecursionLimit { depth: usize },
    /// The state was already aborted when evaluation was requested.
    Aborted,
    /// Free-form message composed by `error_abort`.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFunction { name } => write!(f, "unknown function \"{name}\""),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if expected == "1" {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name}() expects {expected} {arg_word}, got {got}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "expecting {expected}, got value type {got}")
            }
            Self::IntParse { text } => write!(f, "failed to parse int in {text}"),
            Self::ArgRange {
                start,
                len,
                available,
            } => write!(
                f,
                "argument range {start}+{len} exceeds {available} available arguments"
            ),
            Self::EmptyArgRange => write!(f, "argument range must not be empty"),
            Self::AssertionFailed { condition } => write!(f, "assert failed: {condition}"),
            Self::RecursionLimit { depth } => {
                write!(f, "maximum nesting depth exceeded (limit: {depth})")
            }
            Self::Aborted => write!(f, "evaluation already aborted"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation failure.
///
/// The evaluator also records the first failure of a run in its
/// [`State`](crate::State); this value is what travels up the Rust call
/// chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message. For factory-built errors this equals
    /// `kind.to_string()`.
    pub message: String,
    /// Host-facing classification.
    pub cause: CauseCode,
    /// Script location of the failing node, when known.
    pub span: Option<Span>,
    /// Builtin frames active when the failure was recorded.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message and no cause.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            cause: CauseCode::NoCause,
            span: None,
            backtrace: None,
        }
    }

    fn from_kind(kind: EvalErrorKind, cause: CauseCode) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            cause,
            span: None,
            backtrace: None,
        }
    }

    /// Set the host-facing classification.
    #[must_use]
    pub fn with_cause(mut self, cause: CauseCode) -> Self {
        self.cause = cause;
        self
    }

    /// Attach a script location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a script location unless the error already has one.
    ///
    /// Outer call nodes use this so the innermost location wins.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_empty() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Whether this error is the short-circuit of an already aborted run.
    #[inline]
    pub fn is_short_circuit(&self) -> bool {
        self.kind == EvalErrorKind::Aborted
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if self.cause.is_specified() {
            write!(f, " [{}]", self.cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Dispatch errors

/// Call names a function that was never registered.
#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::UnknownFunction {
            name: name.to_string(),
        },
        CauseCode::UnknownFunction,
    )
}

/// Nesting exceeded the configured limit.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::RecursionLimit { depth },
        CauseCode::RecursionLimit,
    )
}

/// Short-circuit for a run that already recorded a failure.
///
/// Carries the recorded message and cause unchanged.
#[cold]
pub fn already_aborted(message: &str, cause: CauseCode) -> EvalError {
    EvalError {
        kind: EvalErrorKind::Aborted,
        message: message.to_string(),
        cause,
        span: None,
        backtrace: None,
    }
}

// Argument errors

/// Builtin received the wrong number of arguments.
#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::ArityMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            got,
        },
        CauseCode::ArgsParsingFailure,
    )
}

/// Value of the wrong payload type.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        },
        CauseCode::ArgsParsingFailure,
    )
}

/// Text is not a valid 64-bit integer.
#[cold]
pub fn int_parse_failure(text: &str) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::IntParse {
            text: text.to_string(),
        },
        CauseCode::ArgsParsingFailure,
    )
}

/// Argument helper range runs past the available children.
#[cold]
pub fn arg_range_exceeded(start: usize, len: usize, available: usize) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::ArgRange {
            start,
            len,
            available,
        },
        CauseCode::ArgsParsingFailure,
    )
}

/// Value-preserving helper asked to evaluate zero arguments.
#[cold]
pub fn empty_arg_range() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyArgRange, CauseCode::ArgsParsingFailure)
}

// Assertion errors

/// `assert` condition was false. `condition` is the condition's source text.
#[cold]
pub fn assertion_failed(condition: &str) -> EvalError {
    EvalError::from_kind(
        EvalErrorKind::AssertionFailed {
            condition: condition.to_string(),
        },
        CauseCode::AssertionFailure,
    )
}

#[cfg(test)]
mod tests;
