//! Evaluation results.
//!
//! Every successful evaluation yields exactly one owned [`Value`]. Text and
//! binary payloads share one type so functions that pass results through
//! untouched (`ifelse`, host file readers) need not care which they hold,
//! while functions that need text reject blobs explicitly.

use std::fmt;

/// Text emitted by boolean builtins for true. False is the empty string.
pub const TRUE_TEXT: &str = "t";

/// Result of evaluating an expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Text payload.
    Str(String),
    /// Binary payload, produced only by host functions.
    Blob(Vec<u8>),
}

impl Value {
    /// Create a text value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a binary value.
    #[inline]
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Blob(bytes.into())
    }

    /// The empty text value, which is also false.
    #[inline]
    pub fn empty() -> Self {
        Value::Str(String::new())
    }

    /// Boolean as text: `"t"` for true, `""` for false.
    #[inline]
    pub fn bool(b: bool) -> Self {
        if b {
            Value::Str(TRUE_TEXT.to_string())
        } else {
            Value::empty()
        }
    }

    /// Name of the payload type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Blob(_) => "blob",
        }
    }

    /// Text payload, or `None` for blobs.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Blob(_) => None,
        }
    }

    /// Raw payload bytes regardless of type.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Str(s) => s.as_bytes(),
            Value::Blob(b) => b,
        }
    }

    /// Take the text payload, handing blobs back unchanged.
    pub fn into_string(self) -> Result<String, Value> {
        match self {
            Value::Str(s) => Ok(s),
            blob @ Value::Blob(_) => Err(blob),
        }
    }

    /// Empty payload is false, anything else is true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.as_bytes().is_empty()
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Blob(bytes)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Blob(b) => write!(f, "Blob({} bytes)", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Blob(b) => write!(f, "<blob: {} bytes>", b.len()),
        }
    }
}
