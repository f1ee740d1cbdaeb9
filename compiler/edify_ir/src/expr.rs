//! Expression nodes.
//!
//! A script is one tree of calls. `ifelse(is_substring("a", x), "yes", "no")`
//! is a `Call` named `ifelse` whose three children are a call and two
//! literals. Literals are leaves whose `name` is their constant text.

use std::fmt;

use edify_stack::ensure_sufficient_stack;

use crate::Span;

/// How a node is evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// Resolved by name through the function table at evaluation time.
    Call,
    /// Constant text; evaluates to its own name.
    Literal,
}

/// Immutable call node: a function name applied to ordered children.
///
/// The evaluator never mutates a tree, so one tree may be evaluated any
/// number of times, including from several threads at once.
///
/// Trees can be nested far deeper than the native stack allows. Dropping is
/// iterative; cloning, comparing and formatting grow the stack on demand.
pub struct Expr {
    pub kind: ExprKind,
    /// Function name for calls, constant text for literals.
    pub name: String,
    /// Unevaluated arguments, in source order.
    pub args: Vec<Expr>,
    /// Location in the script text.
    pub span: Span,
}

impl Expr {
    /// A call to `name` with the given arguments.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr {
            kind: ExprKind::Call,
            name: name.into(),
            args,
            span: Span::DUMMY,
        }
    }

    /// A literal leaf holding `text`.
    pub fn literal(text: impl Into<String>) -> Self {
        Expr {
            kind: ExprKind::Literal,
            name: text.into(),
            args: Vec::new(),
            span: Span::DUMMY,
        }
    }

    /// Attach the node's location in the script.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        self.kind == ExprKind::Literal
    }

    /// Number of direct children.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.args);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.args);
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Expr {
            kind: self.kind,
            name: self.name.clone(),
            args: self.args.clone(),
            span: self.span,
        })
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| {
            self.kind == other.kind
                && self.span == other.span
                && self.name == other.name
                && self.args == other.args
        })
    }
}

impl Eq for Expr {}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Expr")
                .field("kind", &self.kind)
                .field("name", &self.name)
                .field("args", &self.args)
                .field("span", &self.span)
                .finish()
        })
    }
}

/// Renders the node back in script syntax, quoting literals.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.render(f))
    }
}

impl Expr {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ExprKind::Literal => {
                f.write_str("\"")?;
                for c in self.name.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            ExprKind::Call => {
                write!(f, "{}(", self.name)?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
