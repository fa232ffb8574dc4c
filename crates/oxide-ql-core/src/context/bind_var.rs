//! Bind variable (placeholder) references.

use std::cell::Cell;
use std::rc::Rc;

use crate::lexer::Span;

/// Shared handle to a [`BindVar`].
///
/// The syntax tree node and the parse context hold the same bind variable,
/// so the position assigned when the context is drained is visible from the
/// tree.
pub type BindVarRef = Rc<BindVar>;

/// A placeholder found in a statement (`?`, `?1`, `$1`, `:name`, `@name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindVar {
    /// Name for `:name` and `@name` placeholders.
    name: Option<String>,
    /// Location in the statement text.
    span: Span,
    /// Ordinal position in the batch, `None` until assigned.
    pos: Cell<Option<usize>>,
}

impl BindVar {
    /// Creates a bind variable without a position.
    #[must_use]
    pub fn new(name: Option<String>, span: Span) -> Self {
        Self {
            name,
            span,
            pos: Cell::new(None),
        }
    }

    /// Creates a bind variable pinned to an explicit position.
    #[must_use]
    pub fn with_pos(pos: usize, name: Option<String>, span: Span) -> Self {
        Self {
            name,
            span,
            pos: Cell::new(Some(pos)),
        }
    }

    /// Returns the placeholder name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the location of the placeholder.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the assigned position.
    #[must_use]
    pub fn pos(&self) -> Option<usize> {
        self.pos.get()
    }

    /// Returns true while no position has been assigned.
    #[must_use]
    pub fn is_unset_pos(&self) -> bool {
        self.pos.get().is_none()
    }

    /// Assigns the position.
    pub fn set_pos(&self, pos: usize) {
        self.pos.set(Some(pos));
    }
}
