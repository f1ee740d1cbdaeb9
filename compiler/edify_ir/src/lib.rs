//! Edify IR - the immutable expression tree handed to the evaluator.
//!
//! Scripts are parsed elsewhere; this crate only defines the shape the parser
//! produces. Every node is a named function call over child expressions, with
//! literals as zero-argument leaves. Nodes carry a [`Span`] into the
//! script text so the evaluator can quote source in diagnostics.

mod expr;
mod span;

pub use expr::{Expr, ExprKind};
pub use span::{Span, SpanError};
