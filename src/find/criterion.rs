//! The criterion predicate family.
//!
//! One [`Criterion`] tests one structural fact about a tree path: "the
//! leaf is a method named `foo`", "some ancestor is a class named `Bar`",
//! "the chain passes through the type position of the second cast inside
//! method `baz`". Criteria are immutable after construction and evaluate
//! without side effects; an absent or too-shallow path is an ordinary
//! non-match, never an error.
//!
//! ## Positional conventions
//!
//! Every numeric position in an address is 0-based, and every occurrence
//! offset (casts, object creations, instanceof tests, same-named locals)
//! counts hits in pre-order over the named nodes of the enclosing method's
//! subtree. The component that produces serialized addresses counts the
//! same way; the two sides share this convention rather than deriving it
//! independently.

use std::fmt;

use tree_sitter::Node;

use crate::find::location::{BoundLocation, InnerTypeLocation, LocalLocation, TypeStep};
use crate::tree::path::{named_children, preorder};
use crate::tree::{ParsedSource, TreeKind, TreePath};

/// A single matching rule testable against a tree path.
///
/// Criteria are built through the factory functions in [`crate::find`];
/// the rule representation is not part of the public surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Criterion {
    pub(crate) rule: Rule,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Rule {
    Is { kind: TreeKind, name: String },
    EnclosedBy { kind: TreeKind },
    InPackage { name: String },
    InClass { name: String },
    InMethod { name: String },
    NotInMethod,
    PackageDecl { name: String },
    GenericArrayLocation { location: InnerTypeLocation },
    Field { name: String },
    Receiver { method: String },
    ReturnType { method: String },
    IsSigMethod { signature: String },
    Param { method: String, index: usize },
    LocalVariable { method: String, location: LocalLocation },
    Cast { method: String, offset: usize },
    NewObject { method: String, offset: usize },
    InstanceOf { method: String, offset: usize },
    AtBoundLocation { location: BoundLocation },
    MethodBound { method: String, location: BoundLocation },
    ClassBound { class: String, location: BoundLocation },
}

impl Criterion {
    pub(crate) fn from_rule(rule: Rule) -> Self {
        Criterion { rule }
    }

    /// True iff this criterion addresses a method's receiver parameter.
    pub fn is_receiver(&self) -> bool {
        matches!(self.rule, Rule::Receiver { .. })
    }

    /// Whether the program element at the leaf of `path` satisfies this
    /// criterion.
    pub fn is_satisfied_by(&self, path: Option<&TreePath<'_>>) -> bool {
        self.eval(path, path.map(|p| p.unit()))
    }

    /// Like [`is_satisfied_by`](Self::is_satisfied_by), with an explicit
    /// compilation unit standing in when the path is absent (the unit
    /// itself is the candidate element).
    pub fn is_satisfied_within(
        &self,
        path: Option<&TreePath<'_>>,
        unit: &ParsedSource<'_>,
    ) -> bool {
        debug_assert!(path.map_or(true, |p| std::ptr::eq(p.unit().source, unit.source)));
        self.eval(path, Some(unit))
    }

    fn eval(&self, path: Option<&TreePath<'_>>, unit: Option<&ParsedSource<'_>>) -> bool {
        let Some(path) = path else {
            // Only the package rules can match at the compilation unit
            // itself; everything else needs a chain to look at.
            return match &self.rule {
                Rule::InPackage { name } | Rule::PackageDecl { name } => {
                    unit.is_some_and(|u| package_name_matches(u, name))
                }
                _ => false,
            };
        };

        let unit = path.unit();
        match &self.rule {
            Rule::Is { kind, name } => {
                TreeKind::from_node(path.leaf()) == Some(*kind)
                    && unit.declared_name(path.leaf()) == Some(name.as_str())
            }
            Rule::EnclosedBy { kind } => path
                .iter_to_root()
                .any(|n| TreeKind::from_node(n) == Some(*kind)),
            Rule::InPackage { name } => package_name_matches(unit, name),
            Rule::InClass { name } => in_class(path, name),
            Rule::InMethod { name } => in_method(path, name),
            Rule::NotInMethod => !path.iter_to_root().any(|n| {
                TreeKind::from_node(n).is_some_and(TreeKind::is_method_like)
            }),
            Rule::PackageDecl { name } => {
                TreeKind::from_node(path.leaf()) == Some(TreeKind::Package)
                    && unit.declared_name(path.leaf()) == Some(name.as_str())
            }
            Rule::GenericArrayLocation { location } => type_steps(path) == location.steps,
            Rule::Field { name } => path.iter_to_root().any(|n| {
                TreeKind::from_node(n) == Some(TreeKind::Field)
                    && declarator_names(unit, n).any(|d| d == name.as_str())
            }),
            Rule::Receiver { method } => on_receiver_of(path, method),
            Rule::ReturnType { method } => in_return_type(path, method),
            Rule::IsSigMethod { signature } => is_sig_method(path, signature),
            Rule::Param { method, index } => on_param(path, method, *index),
            Rule::LocalVariable { method, location } => on_local(path, method, location),
            Rule::Cast { method, offset } => {
                on_occurrence(path, method, TreeKind::Cast, *offset)
            }
            Rule::NewObject { method, offset } => {
                on_occurrence(path, method, TreeKind::NewObject, *offset)
            }
            Rule::InstanceOf { method, offset } => {
                on_occurrence(path, method, TreeKind::InstanceOf, *offset)
            }
            Rule::AtBoundLocation { location } => on_bound(path, location),
            Rule::MethodBound { method, location } => {
                in_method(path, method) && on_bound(path, location)
            }
            Rule::ClassBound { class, location } => {
                in_class(path, class) && on_bound(path, location)
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Rule::Is { kind, name } => write!(f, "is {kind} '{name}'"),
            Rule::EnclosedBy { kind } => write!(f, "enclosed by {kind}"),
            Rule::InPackage { name } if name.is_empty() => {
                f.write_str("in unnamed package")
            }
            Rule::InPackage { name } => write!(f, "in package '{name}'"),
            Rule::InClass { name } => write!(f, "in class '{name}'"),
            Rule::InMethod { name } => write!(f, "in method '{name}'"),
            Rule::NotInMethod => f.write_str("not in any method"),
            Rule::PackageDecl { name } => write!(f, "package declaration '{name}'"),
            Rule::GenericArrayLocation { location } if location.is_outermost() => {
                f.write_str("at outermost type location")
            }
            Rule::GenericArrayLocation { location } => {
                write!(f, "at inner type location {location}")
            }
            Rule::Field { name } => write!(f, "field '{name}'"),
            Rule::Receiver { method } => write!(f, "receiver of method '{method}'"),
            Rule::ReturnType { method } => write!(f, "return type of method '{method}'"),
            Rule::IsSigMethod { signature } => {
                write!(f, "is method with signature '{signature}'")
            }
            Rule::Param { method, index } => {
                write!(f, "parameter {index} of method '{method}'")
            }
            Rule::LocalVariable { method, location } => {
                write!(f, "local {location} in method '{method}'")
            }
            Rule::Cast { method, offset } => {
                write!(f, "cast {offset} in method '{method}'")
            }
            Rule::NewObject { method, offset } => {
                write!(f, "object creation {offset} in method '{method}'")
            }
            Rule::InstanceOf { method, offset } => {
                write!(f, "instanceof {offset} in method '{method}'")
            }
            Rule::AtBoundLocation { location } => write!(f, "at bound {location}"),
            Rule::MethodBound { method, location } => {
                write!(f, "bound {location} of method '{method}'")
            }
            Rule::ClassBound { class, location } => {
                write!(f, "bound {location} of class '{class}'")
            }
        }
    }
}

fn package_name_matches(unit: &ParsedSource<'_>, name: &str) -> bool {
    match unit.package_name() {
        Some(package) => package == name,
        // The empty name addresses the unnamed package.
        None => name.is_empty(),
    }
}

/// Chain scan for a class-like declaration with the given name. The scan
/// includes the leaf, so a path ending at the declaration itself counts as
/// "in" it.
fn in_class(path: &TreePath<'_>, name: &str) -> bool {
    let unit = path.unit();
    path.iter_to_root().any(|n| {
        TreeKind::from_node(n).is_some_and(TreeKind::is_class_like)
            && unit.declared_name(n) == Some(name)
    })
}

/// Chain scan for a method or constructor declaration with the given name.
fn in_method(path: &TreePath<'_>, name: &str) -> bool {
    let unit = path.unit();
    path.iter_to_root().any(|n| {
        TreeKind::from_node(n).is_some_and(TreeKind::is_method_like)
            && unit.declared_name(n) == Some(name)
    })
}

/// The names declared by a field declaration (one per declarator).
fn declarator_names<'a>(
    unit: &'a ParsedSource<'a>,
    declaration: Node<'a>,
) -> impl Iterator<Item = &'a str> {
    named_children(declaration)
        .filter(|c| TreeKind::from_node(*c) == Some(TreeKind::Variable))
        .filter_map(move |c| unit.declared_name(c))
}

/// Nearest method-like declaration strictly above a node, via parent links.
fn enclosing_method_of(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if TreeKind::from_node(n).is_some_and(TreeKind::is_method_like) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

fn on_receiver_of(path: &TreePath<'_>, method: &str) -> bool {
    let unit = path.unit();
    path.iter_to_root().any(|n| {
        TreeKind::from_node(n) == Some(TreeKind::ReceiverParameter)
            && enclosing_method_of(n)
                .is_some_and(|m| unit.declared_name(m) == Some(method))
    })
}

/// The chain must pass from a method declaration named `method` directly
/// into its return-type position.
fn in_return_type(path: &TreePath<'_>, method: &str) -> bool {
    let unit = path.unit();
    path.nodes().windows(2).any(|w| {
        let (parent, child) = (w[0], w[1]);
        TreeKind::from_node(parent) == Some(TreeKind::Method)
            && unit.declared_name(parent) == Some(method)
            && parent
                .child_by_field_name("type")
                .is_some_and(|t| t.id() == child.id())
    })
}

fn is_sig_method(path: &TreePath<'_>, signature: &str) -> bool {
    let leaf = path.leaf();
    if !TreeKind::from_node(leaf).is_some_and(TreeKind::is_method_like) {
        return false;
    }
    let unit = path.unit();
    if !signature.contains('(') {
        // A bare name addresses every overload.
        return unit.declared_name(leaf) == Some(signature);
    }
    method_signature(unit, leaf).is_some_and(|s| s == signature)
}

/// Render a method's signature as `name(type1,type2,...)`, with parameter
/// types exactly as written in source.
fn method_signature(unit: &ParsedSource<'_>, method: Node<'_>) -> Option<String> {
    let name = unit.declared_name(method)?;
    let parameters = method.child_by_field_name("parameters")?;
    let types: Vec<&str> = named_children(parameters)
        .filter(|p| {
            matches!(
                TreeKind::from_node(*p),
                Some(TreeKind::Parameter | TreeKind::SpreadParameter)
            )
        })
        .filter_map(|p| parameter_type(p).map(|t| unit.node_text(t)))
        .collect();
    Some(format!("{}({})", name, types.join(",")))
}

fn parameter_type(parameter: Node<'_>) -> Option<Node<'_>> {
    // spread_parameter has no `type` field; its type is the first named
    // child after any modifiers.
    parameter
        .child_by_field_name("type")
        .or_else(|| named_children(parameter).find(|c| c.kind() != "modifiers"))
}

fn on_param(path: &TreePath<'_>, method: &str, index: usize) -> bool {
    let unit = path.unit();
    for n in path.iter_to_root() {
        if !matches!(
            TreeKind::from_node(n),
            Some(TreeKind::Parameter | TreeKind::SpreadParameter)
        ) {
            continue;
        }
        let Some(list) = n.parent() else { continue };
        if list.kind() != "formal_parameters" {
            continue;
        }
        let Some(declaration) = list.parent() else { continue };
        if !TreeKind::from_node(declaration).is_some_and(TreeKind::is_method_like) {
            continue;
        }
        if unit.declared_name(declaration) != Some(method) {
            continue;
        }
        // Position among declared parameters; a receiver parameter is not
        // one of them.
        let position = named_children(list)
            .filter(|c| {
                matches!(
                    TreeKind::from_node(*c),
                    Some(TreeKind::Parameter | TreeKind::SpreadParameter)
                )
            })
            .position(|c| c.id() == n.id());
        if position == Some(index) {
            return true;
        }
    }
    false
}

fn on_local(path: &TreePath<'_>, method: &str, location: &LocalLocation) -> bool {
    let unit = path.unit();
    let nodes = path.nodes();
    for (i, declaration) in nodes.iter().enumerate() {
        if TreeKind::from_node(*declaration) != Some(TreeKind::LocalVariable) {
            continue;
        }
        // When the path descends into one of the declarators, it must be
        // the named one; a path into the declared type matches any of them.
        if let Some(next) = nodes.get(i + 1) {
            if TreeKind::from_node(*next) == Some(TreeKind::Variable)
                && unit.declared_name(*next) != Some(location.name.as_str())
            {
                continue;
            }
        }
        let Some(declarator) = named_children(*declaration)
            .filter(|c| TreeKind::from_node(*c) == Some(TreeKind::Variable))
            .find(|c| unit.declared_name(*c) == Some(location.name.as_str()))
        else {
            continue;
        };
        let Some(method_node) = enclosing_method_of(*declaration) else {
            continue;
        };
        if unit.declared_name(method_node) != Some(method) {
            continue;
        }
        let ordinal = local_declarators(unit, method_node, &location.name)
            .position(|c| c.id() == declarator.id());
        if ordinal == Some(location.index) {
            return true;
        }
    }
    false
}

/// All declarators of local variables named `name` inside a method, in
/// pre-order.
fn local_declarators<'a>(
    unit: &'a ParsedSource<'a>,
    method: Node<'a>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a>> {
    preorder(method)
        .filter(|n| TreeKind::from_node(*n) == Some(TreeKind::Variable))
        .filter(|n| {
            n.parent()
                .is_some_and(|p| TreeKind::from_node(p) == Some(TreeKind::LocalVariable))
        })
        .filter(move |n| unit.declared_name(*n) == Some(name))
}

/// The chain must pass through the type position of occurrence number
/// `offset` of `kind` within the named method.
fn on_occurrence(path: &TreePath<'_>, method: &str, kind: TreeKind, offset: usize) -> bool {
    let unit = path.unit();
    for w in path.nodes().windows(2) {
        let (expr, child) = (w[0], w[1]);
        if TreeKind::from_node(expr) != Some(kind) {
            continue;
        }
        if !type_position_of(expr, kind).is_some_and(|t| t.id() == child.id()) {
            continue;
        }
        let Some(method_node) = enclosing_method_of(expr) else {
            continue;
        };
        if unit.declared_name(method_node) != Some(method) {
            continue;
        }
        let ordinal = preorder(method_node)
            .filter(|n| TreeKind::from_node(*n) == Some(kind))
            .position(|n| n.id() == expr.id());
        if ordinal == Some(offset) {
            return true;
        }
    }
    false
}

fn type_position_of(expr: Node<'_>, kind: TreeKind) -> Option<Node<'_>> {
    match kind {
        TreeKind::Cast | TreeKind::NewObject => expr.child_by_field_name("type"),
        TreeKind::InstanceOf => expr.child_by_field_name("right"),
        _ => None,
    }
}

fn on_bound(path: &TreePath<'_>, location: &BoundLocation) -> bool {
    for w in path.nodes().windows(2) {
        let (bound_list, bound) = (w[0], w[1]);
        if TreeKind::from_node(bound_list) != Some(TreeKind::TypeBound) {
            continue;
        }
        let bound_index = named_children(bound_list).position(|c| c.id() == bound.id());
        if bound_index != Some(location.bound_index) {
            continue;
        }
        let Some(type_param) = bound_list.parent() else {
            continue;
        };
        if TreeKind::from_node(type_param) != Some(TreeKind::TypeParameter) {
            continue;
        }
        let Some(param_list) = type_param.parent() else {
            continue;
        };
        let param_index = named_children(param_list)
            .filter(|c| TreeKind::from_node(*c) == Some(TreeKind::TypeParameter))
            .position(|c| c.id() == type_param.id());
        if param_index == Some(location.param_index) {
            return true;
        }
    }
    false
}

/// The descent steps from the outermost enclosing type position down to
/// the leaf. Empty when the leaf is itself an outermost type position.
fn type_steps(path: &TreePath<'_>) -> Vec<TypeStep> {
    let mut steps = Vec::new();
    for w in path.nodes().windows(2).rev() {
        let (parent, child) = (w[0], w[1]);
        match TreeKind::from_node(parent) {
            Some(TreeKind::ArrayType) => {
                if parent
                    .child_by_field_name("element")
                    .is_some_and(|e| e.id() == child.id())
                {
                    steps.push(TypeStep::Array);
                }
                // the dimensions child is not a type position
            }
            Some(TreeKind::TypeArguments) => {
                if let Some(i) = named_children(parent).position(|c| c.id() == child.id()) {
                    steps.push(TypeStep::TypeArg(i));
                }
            }
            Some(TreeKind::Wildcard) => steps.push(TypeStep::WildcardBound),
            // structural hops within one composed type
            Some(TreeKind::GenericType) | Some(TreeKind::AnnotatedType) => {}
            _ => break,
        }
    }
    // collected inner-to-outer while walking up
    steps.reverse();
    steps
}
