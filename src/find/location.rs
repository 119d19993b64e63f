//! Location descriptors: the value types a serialized address is made of.
//!
//! Descriptors identify sub-positions that names alone cannot reach: a
//! nesting level inside a composed type, a type-parameter bound, or one of
//! several same-named locals. They are pure data, compared structurally,
//! and never reference the criteria built from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One descent step from an outer type towards an inner type position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeStep {
    /// Into the element type of an array.
    Array,
    /// Into type argument number `n` (0-based) of a parameterized type.
    TypeArg(usize),
    /// Into the bound of a wildcard type argument.
    WildcardBound,
}

impl fmt::Display for TypeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeStep::Array => f.write_str("array"),
            TypeStep::TypeArg(n) => write!(f, "arg {n}"),
            TypeStep::WildcardBound => f.write_str("wildcard bound"),
        }
    }
}

/// A nesting position inside a generic or array type, as an ordered
/// sequence of steps from the outermost type.
///
/// The empty sequence addresses the outermost type itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InnerTypeLocation {
    pub steps: Vec<TypeStep>,
}

impl InnerTypeLocation {
    pub fn new(steps: Vec<TypeStep>) -> Self {
        InnerTypeLocation { steps }
    }

    /// The outermost position: no descent at all.
    pub fn outermost() -> Self {
        InnerTypeLocation::default()
    }

    pub fn is_outermost(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for InnerTypeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}

/// A local variable's declaration site: its name plus the 0-based ordinal
/// among same-named locals of the enclosing method, counted in pre-order.
///
/// The ordinal disambiguates a name redeclared in sibling scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalLocation {
    pub name: String,
    pub index: usize,
}

impl LocalLocation {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        LocalLocation {
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for LocalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' #{}", self.name, self.index)
    }
}

/// A type-parameter bound position: which type parameter (0-based, in
/// declaration order) and which of its written bounds (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundLocation {
    pub param_index: usize,
    pub bound_index: usize,
}

impl BoundLocation {
    pub fn new(param_index: usize, bound_index: usize) -> Self {
        BoundLocation {
            param_index,
            bound_index,
        }
    }
}

impl fmt::Display for BoundLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of type parameter {}", self.bound_index, self.param_index)
    }
}
