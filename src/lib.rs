//! Anno Locator: location matching for Java annotation insertion
//!
//! The core of an annotation-insertion pipeline is re-identification:
//! a serialized address names a program element ("parameter 2 of method
//! `foo` in class `Bar`", "the first bound of class `Baz`'s second type
//! parameter"), and that element must be found again in a freshly parsed
//! tree that carries no handles. This crate decides, for every candidate
//! path a traversal produces, whether its leaf is the addressed element.
//!
//! # Architecture
//!
//! An address compiles down to a single primitive: [`Criteria`], a
//! conjunction of [`Criterion`] values built through the factory
//! functions in [`find`]. Intelligence lives in the individual matching
//! rules, not in the combination logic: criteria AND together, evaluate
//! fail-fast in insertion order, and an empty set matches everything.
//!
//! Trees come from tree-sitter's Java grammar through the [`tree`]
//! boundary: a parser adapter, a typed kind tag, and the root-to-leaf
//! [`TreePath`] the criteria inspect.
//!
//! # Example
//!
//! ```no_run
//! use anno_locator::find::{self, Criteria};
//! use anno_locator::tree::{JavaParser, TreeKind, TreePath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut criteria = Criteria::new();
//! criteria.add(find::is(TreeKind::Method, "foo")?);
//! criteria.add(find::in_class("Bar")?);
//!
//! let mut parser = JavaParser::new()?;
//! let source = "class Bar { void foo() { } }";
//! let unit = parser.parse_with_source(source)?;
//! # let candidate = unit.root_node();
//!
//! let path = TreePath::from_leaf(&unit, candidate);
//! if criteria.is_satisfied_by(Some(&path)) {
//!     println!("found the insertion site");
//! }
//! # Ok(())
//! # }
//! ```

pub mod find;
pub mod tree;

// Re-exports
pub use find::{
    BoundLocation, Criteria, Criterion, CriterionError, InnerTypeLocation, LocalLocation,
    TypeStep,
};
pub use tree::{JavaParser, ParseError, ParsedSource, TreeKind, TreePath};
