use thiserror::Error;

/// Construction-time rejection of a malformed location criterion.
///
/// Evaluation itself never fails; an address that cannot be built is a
/// caller bug and surfaces here, before any matching runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("empty {what} name in location criterion")]
    EmptyName { what: &'static str },

    #[error("malformed method signature '{signature}': {message}")]
    MalformedSignature {
        signature: String,
        message: &'static str,
    },
}
