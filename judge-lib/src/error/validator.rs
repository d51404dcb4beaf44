//! Validator dispatch errors

/// No validator is registered for a rule kind.
///
/// Signals a mismatch between the rules the server declared and the
/// validators available on the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No validator registered for kind '{kind}'")]
pub struct UnknownValidatorError {
    /// The unresolved rule kind.
    pub kind: String,
}

impl UnknownValidatorError {
    /// Creates a new unknown validator error.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// A confirmation rule points at an element that is not in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Confirmation target '{target}' of element '{element}' not found")]
pub struct MissingConfirmationTargetError {
    /// Id of the element carrying the confirmation rule.
    pub element: String,
    /// Id of the missing target element.
    pub target: String,
}

/// A `format` rule carries a pattern that does not compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid pattern '{pattern}': {message}")]
pub struct InvalidPatternError {
    /// The pattern as it arrived in the rule-set.
    pub pattern: String,
    /// Compiler error message.
    pub message: String,
}
