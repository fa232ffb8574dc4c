//! Parse context
//!
//! The bridge between a statement string, the scanner that reads it and the
//! grammar that collects its bind variables.

mod bind_var;
mod parse_context;
mod parse_tree;

pub use bind_var::{BindVar, BindVarRef};
pub use parse_context::ParseContext;
pub use parse_tree::ParseTree;
