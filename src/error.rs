use thiserror::Error;

/// Errors returned by the strict accessors and the shared handle
///
/// The lenient [`Attributes::get`](crate::Attributes::get) never produces these;
/// it degrades to a default value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The requested key was not found
    #[error("Key not found in attributes: {0}")]
    KeyNotFound(String),
    /// The stored value has a different type than the one requested
    #[error("Bad type for attribute {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    /// The shared attributes are already borrowed in a conflicting way
    #[error("Attributes are already borrowed")]
    Borrowed,
}
