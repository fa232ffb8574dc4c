//! The owned result container of a parse.

use crate::mem::MemTrackerPtr;

/// Statement text and the flags of the parse invocation that owns it.
///
/// The tree charges the length of its text to the memory tracker for as long
/// as it is alive.
#[derive(Debug)]
pub struct ParseTree {
    stmt: String,
    reparsed: bool,
    internal: bool,
    mem_tracker: MemTrackerPtr,
}

impl ParseTree {
    /// Creates a tree owning `stmt`.
    #[must_use]
    pub fn new(
        stmt: impl Into<String>,
        reparsed: bool,
        mem_tracker: &MemTrackerPtr,
        internal: bool,
    ) -> Self {
        let stmt = stmt.into();
        mem_tracker.consume(stmt.len());
        Self {
            stmt,
            reparsed,
            internal,
            mem_tracker: MemTrackerPtr::clone(mem_tracker),
        }
    }

    /// Returns the statement text.
    #[must_use]
    pub fn stmt(&self) -> &str {
        &self.stmt
    }

    /// Returns whether this tree belongs to a reparse attempt.
    #[must_use]
    pub const fn reparsed(&self) -> bool {
        self.reparsed
    }

    /// Returns whether the statement was issued internally rather than by a
    /// client.
    #[must_use]
    pub const fn internal(&self) -> bool {
        self.internal
    }

    /// Returns the tracker the text is charged to.
    #[must_use]
    pub const fn mem_tracker(&self) -> &MemTrackerPtr {
        &self.mem_tracker
    }
}

impl Drop for ParseTree {
    fn drop(&mut self) {
        self.mem_tracker.release(self.stmt.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemTracker;

    #[test]
    fn test_tree_charges_text_while_alive() {
        let tracker = MemTracker::new("tree");
        let tree = ParseTree::new("SELECT 1", false, &tracker, false);
        assert_eq!(tracker.consumption(), 8);
        drop(tree);
        assert_eq!(tracker.consumption(), 0);
    }

    #[test]
    fn test_tree_flags() {
        let tracker = MemTracker::new("tree");
        let tree = ParseTree::new("SELECT 1", true, &tracker, true);
        assert_eq!(tree.stmt(), "SELECT 1");
        assert!(tree.reparsed());
        assert!(tree.internal());
        assert_eq!(tree.mem_tracker().id(), "tree");
    }
}
