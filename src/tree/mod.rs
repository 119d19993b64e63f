//! Java tree boundary: parsing adapter, syntactic kinds, and paths.
//!
//! This module wraps tree-sitter Java trees behind the small surface the
//! matching engine needs: a parser adapter, a typed kind tag, and the
//! root-to-leaf path abstraction that criteria are evaluated against.

pub mod errors;
pub mod kind;
pub mod parser;
pub mod path;

pub use errors::ParseError;
pub use kind::TreeKind;
pub use parser::{ErrorNode, JavaParser, ParsedSource};
pub use path::{named_children, preorder, Preorder, TreePath};
