//! Per-statement parse state shared by the scanner and the grammar.

use tracing::Level;

use super::{BindVarRef, ParseTree};
use crate::lexer::ScanSource;
use crate::mem::MemTrackerPtr;

/// State of one parse attempt.
///
/// The context owns the statement text (through its [`ParseTree`]) and feeds
/// it to the scanner with [`read`](Self::read). While the grammar runs it
/// collects the bind variables of the current statement, and
/// [`get_bind_variables`](Self::get_bind_variables) hands them out with
/// positions that keep counting across all statements of the batch.
#[derive(Debug)]
pub struct ParseContext {
    parse_tree: ParseTree,
    /// Read cursor into the statement text.
    stmt_offset: usize,
    /// Bind variables of the statement being parsed, in encounter order.
    bind_variables: Vec<BindVarRef>,
    /// Next position in the batch.
    bind_pos: usize,
    trace_scanning: bool,
    trace_parsing: bool,
}

impl ParseContext {
    /// Creates a context for `stmt`.
    ///
    /// Scan and parse tracing are switched on together when `TRACE` events
    /// are enabled for the current subscriber.
    #[must_use]
    pub fn new(
        stmt: impl Into<String>,
        reparsed: bool,
        mem_tracker: &MemTrackerPtr,
        internal: bool,
    ) -> Self {
        let trace = tracing::enabled!(Level::TRACE);
        Self {
            parse_tree: ParseTree::new(stmt, reparsed, mem_tracker, internal),
            stmt_offset: 0,
            bind_variables: Vec::new(),
            bind_pos: 0,
            trace_scanning: trace,
            trace_parsing: trace,
        }
    }

    /// Copies the next bytes of the statement into `buf`.
    ///
    /// At most `buf.len()` bytes are copied. Returns the number of bytes
    /// copied; 0 means the whole statement has been read, and further calls
    /// keep returning 0.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let stmt = self.parse_tree.stmt().as_bytes();
        let copy_size = (stmt.len() - self.stmt_offset).min(buf.len());
        if copy_size > 0 {
            buf[..copy_size]
                .copy_from_slice(&stmt[self.stmt_offset..self.stmt_offset + copy_size]);
            self.stmt_offset += copy_size;
        }
        copy_size
    }

    /// Starts a new pass over the same statement.
    ///
    /// Rewinds the read cursor and forgets the bind variables and positions
    /// of the previous pass. The parse tree is kept as is.
    pub fn restart(&mut self) {
        self.stmt_offset = 0;
        self.bind_variables.clear();
        self.bind_pos = 0;
    }

    /// Registers a bind variable found in the current statement.
    pub fn add_bind_variable(&mut self, var: BindVarRef) {
        if self.trace_parsing {
            tracing::trace!(
                target: "oxide_ql_core::parse",
                name = var.name(),
                pos = var.pos(),
                start = var.span().start,
                "bind variable"
            );
        }
        self.bind_variables.push(var);
    }

    /// Moves the bind variables of the current statement into `vars`.
    ///
    /// `vars` is cleared first. Variables without an explicit position get
    /// the next batch position. Every variable consumes one position, pinned
    /// or not, and the counter carries over to the next statement.
    pub fn get_bind_variables(&mut self, vars: &mut Vec<BindVarRef>) {
        vars.clear();
        for var in self.bind_variables.drain(..) {
            if var.is_unset_pos() {
                var.set_pos(self.bind_pos);
            }
            vars.push(var);
            self.bind_pos += 1;
        }
    }

    /// Returns the statement text.
    #[must_use]
    pub fn stmt(&self) -> &str {
        self.parse_tree.stmt()
    }

    /// Returns the read cursor.
    #[must_use]
    pub const fn stmt_offset(&self) -> usize {
        self.stmt_offset
    }

    /// Returns the number of bind variables waiting to be drained.
    #[must_use]
    pub fn pending_bind_variables(&self) -> usize {
        self.bind_variables.len()
    }

    /// Returns the position the next drained bind variable will take.
    #[must_use]
    pub const fn bind_pos(&self) -> usize {
        self.bind_pos
    }

    /// Returns the owned parse tree.
    #[must_use]
    pub const fn parse_tree(&self) -> &ParseTree {
        &self.parse_tree
    }

    /// Consumes the context and returns its parse tree.
    #[must_use]
    pub fn into_parse_tree(self) -> ParseTree {
        self.parse_tree
    }

    /// Returns whether this is a reparse attempt.
    #[must_use]
    pub const fn reparsed(&self) -> bool {
        self.parse_tree.reparsed()
    }

    /// Returns whether the statement was issued internally.
    #[must_use]
    pub const fn internal(&self) -> bool {
        self.parse_tree.internal()
    }

    /// Returns whether scanned tokens are traced.
    #[must_use]
    pub const fn trace_scanning(&self) -> bool {
        self.trace_scanning
    }

    /// Returns whether grammar progress is traced.
    #[must_use]
    pub const fn trace_parsing(&self) -> bool {
        self.trace_parsing
    }
}

impl ScanSource for ParseContext {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        Self::read(self, buf)
    }
}
