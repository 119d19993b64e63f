//! Location criteria for re-identifying program elements in a parsed
//! tree.
//!
//! A serialized address ("parameter 2 of method `foo` in class `Bar`")
//! translates into a [`Criteria`]: one criterion per structural
//! constraint, built through the factory functions of this module, then
//! tested against every candidate path the traversal produces.

pub mod criteria;
pub mod criterion;
pub mod errors;
pub mod location;

pub use criteria::{
    at_bound_location, at_location, at_outermost_location, cast, class_bound, enclosed_by,
    field, in_class, in_method, in_package, instance_of, is, is_sig_method, local,
    method_bound, new_object, not_in_method, package_decl, param, receiver, return_type,
    Criteria,
};
pub use criterion::Criterion;
pub use errors::CriterionError;
pub use location::{BoundLocation, InnerTypeLocation, LocalLocation, TypeStep};
