//! Criteria: a conjunction of criteria addressing one program element,
//! plus the factory functions that build the individual criteria.
//!
//! The factories are the only supported way to construct a [`Criterion`];
//! they validate their arguments up front, so a malformed address fails
//! when it is translated, never silently during matching.

use std::fmt;

use indexmap::IndexSet;
use tracing::debug;

use crate::find::criterion::{Criterion, Rule};
use crate::find::errors::CriterionError;
use crate::find::location::{BoundLocation, InnerTypeLocation, LocalLocation};
use crate::tree::{ParsedSource, TreeKind, TreePath};

/// A set of criteria for locating a program element in a source tree.
///
/// Criteria combine with logical AND and evaluate fail-fast in insertion
/// order. Duplicates are ignored. The empty set is satisfied by every
/// path. The expected lifecycle is build-then-query: populate fully, then
/// evaluate against candidate paths for the rest of its life.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    criteria: IndexSet<Criterion>,
    debug: bool,
}

impl Criteria {
    /// Creates a new `Criteria` without any criterion.
    pub fn new() -> Self {
        Criteria::default()
    }

    /// Enable or disable tracing of unsatisfied criteria.
    ///
    /// Off by default. When on, the first failing criterion of each
    /// evaluation is reported at debug level through `tracing`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// See [`with_debug`](Self::with_debug).
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Add a criterion. Adding one that is already present is a no-op.
    pub fn add(&mut self, criterion: Criterion) {
        self.criteria.insert(criterion);
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Iterate the criteria in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    /// Whether the program element at the leaf of `path` satisfies all of
    /// these criteria.
    pub fn is_satisfied_by(&self, path: Option<&TreePath<'_>>) -> bool {
        self.check(|c| c.is_satisfied_by(path))
    }

    /// Like [`is_satisfied_by`](Self::is_satisfied_by), with an explicit
    /// compilation unit standing in when the path is absent.
    pub fn is_satisfied_within(
        &self,
        path: Option<&TreePath<'_>>,
        unit: &ParsedSource<'_>,
    ) -> bool {
        self.check(|c| c.is_satisfied_within(path, unit))
    }

    /// The first criterion, in insertion order, that `path` fails to
    /// satisfy; `None` when all are satisfied.
    ///
    /// Evaluation stops at the returned criterion, so this is also the
    /// observable form of the fail-fast contract.
    pub fn first_unsatisfied(&self, path: Option<&TreePath<'_>>) -> Option<&Criterion> {
        self.criteria.iter().find(|c| !c.is_satisfied_by(path))
    }

    /// See [`first_unsatisfied`](Self::first_unsatisfied), with an
    /// explicit compilation unit.
    pub fn first_unsatisfied_within(
        &self,
        path: Option<&TreePath<'_>>,
        unit: &ParsedSource<'_>,
    ) -> Option<&Criterion> {
        self.criteria
            .iter()
            .find(|c| !c.is_satisfied_within(path, unit))
    }

    fn check(&self, satisfied: impl Fn(&Criterion) -> bool) -> bool {
        for criterion in &self.criteria {
            if !satisfied(criterion) {
                if self.debug {
                    debug!(criterion = %criterion, "unsatisfied criterion");
                }
                return false;
            }
        }
        true
    }

    /// Determines whether this is the criteria on a receiver.
    pub fn is_on_receiver(&self) -> bool {
        self.criteria.iter().any(Criterion::is_receiver)
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, criterion) in self.criteria.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{criterion}")?;
        }
        f.write_str("]")
    }
}

impl Extend<Criterion> for Criteria {
    fn extend<T: IntoIterator<Item = Criterion>>(&mut self, iter: T) {
        for criterion in iter {
            self.add(criterion);
        }
    }
}

// ---------------------------------------------------------------------------
// Factory functions
// ---------------------------------------------------------------------------

fn nonempty(name: impl Into<String>, what: &'static str) -> Result<String, CriterionError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(CriterionError::EmptyName { what });
    }
    Ok(name)
}

/// The program element has the given kind and declared name.
pub fn is(kind: TreeKind, name: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::Is {
        kind,
        name: nonempty(name, "element")?,
    }))
}

/// The program element is enclosed by a node of the given kind.
pub fn enclosed_by(kind: TreeKind) -> Criterion {
    Criterion::from_rule(Rule::EnclosedBy { kind })
}

/// The program element lives in the named package. The empty name
/// addresses the unnamed package.
pub fn in_package(name: impl Into<String>) -> Criterion {
    Criterion::from_rule(Rule::InPackage { name: name.into() })
}

/// The program element is enclosed by the named class (or interface,
/// enum, record, or annotation type).
pub fn in_class(name: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::InClass {
        name: nonempty(name, "class")?,
    }))
}

/// The program element is enclosed by the named method or constructor.
pub fn in_method(name: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::InMethod {
        name: nonempty(name, "method")?,
    }))
}

/// The program element is not enclosed by any method.
pub fn not_in_method() -> Criterion {
    Criterion::from_rule(Rule::NotInMethod)
}

/// The program element is the package declaration with the given name.
pub fn package_decl(name: impl Into<String>) -> Criterion {
    Criterion::from_rule(Rule::PackageDecl { name: name.into() })
}

/// The program element sits at the given nesting position inside a
/// generic or array type.
pub fn at_location(location: InnerTypeLocation) -> Criterion {
    Criterion::from_rule(Rule::GenericArrayLocation { location })
}

/// The program element is an outermost type position, not nested inside
/// a generic or array type.
pub fn at_outermost_location() -> Criterion {
    at_location(InnerTypeLocation::outermost())
}

/// The program element belongs to the named field's declaration.
pub fn field(name: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::Field {
        name: nonempty(name, "field")?,
    }))
}

/// The program element is the receiver parameter of the named method.
pub fn receiver(method: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::Receiver {
        method: nonempty(method, "method")?,
    }))
}

/// The program element is within the return-type position of the named
/// method.
pub fn return_type(method: impl Into<String>) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::ReturnType {
        method: nonempty(method, "method")?,
    }))
}

/// The program element is a method declaration with the given signature,
/// `name(type1,type2,...)` with parameter types as written in source. A
/// bare name (no parameter list) addresses every overload of that name.
pub fn is_sig_method(signature: impl Into<String>) -> Result<Criterion, CriterionError> {
    let signature = nonempty(signature, "method")?;
    if let Some(open) = signature.find('(') {
        if open == 0 {
            return Err(CriterionError::MalformedSignature {
                signature,
                message: "missing method name",
            });
        }
        if !signature.ends_with(')') {
            return Err(CriterionError::MalformedSignature {
                signature,
                message: "missing closing parenthesis",
            });
        }
    }
    Ok(Criterion::from_rule(Rule::IsSigMethod { signature }))
}

/// The program element is formal parameter number `index` (0-based,
/// receiver excluded) of the named method.
pub fn param(method: impl Into<String>, index: usize) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::Param {
        method: nonempty(method, "method")?,
        index,
    }))
}

/// The program element is the local variable described by `location`
/// within the named method.
pub fn local(
    method: impl Into<String>,
    location: LocalLocation,
) -> Result<Criterion, CriterionError> {
    if location.name.trim().is_empty() {
        return Err(CriterionError::EmptyName {
            what: "local variable",
        });
    }
    Ok(Criterion::from_rule(Rule::LocalVariable {
        method: nonempty(method, "method")?,
        location,
    }))
}

/// The program element is the type position of cast number `offset`
/// (0-based, pre-order) within the named method.
pub fn cast(method: impl Into<String>, offset: usize) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::Cast {
        method: nonempty(method, "method")?,
        offset,
    }))
}

/// The program element is the type position of object creation number
/// `offset` within the named method.
pub fn new_object(
    method: impl Into<String>,
    offset: usize,
) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::NewObject {
        method: nonempty(method, "method")?,
        offset,
    }))
}

/// The program element is the type position of instanceof test number
/// `offset` within the named method.
pub fn instance_of(
    method: impl Into<String>,
    offset: usize,
) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::InstanceOf {
        method: nonempty(method, "method")?,
        offset,
    }))
}

/// The program element is the type-parameter bound described by
/// `location`.
pub fn at_bound_location(location: BoundLocation) -> Criterion {
    Criterion::from_rule(Rule::AtBoundLocation { location })
}

/// The program element is the bound described by `location`, declared on
/// the named method.
pub fn method_bound(
    method: impl Into<String>,
    location: BoundLocation,
) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::MethodBound {
        method: nonempty(method, "method")?,
        location,
    }))
}

/// The program element is the bound described by `location`, declared on
/// the named class.
pub fn class_bound(
    class: impl Into<String>,
    location: BoundLocation,
) -> Result<Criterion, CriterionError> {
    Ok(Criterion::from_rule(Rule::ClassBound {
        class: nonempty(class, "class")?,
        location,
    }))
}
