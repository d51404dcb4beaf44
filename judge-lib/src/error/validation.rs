//! Validation outcome errors

/// Errors raised by the [`Validation`](crate::Validation) state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `close` was called on a validation that already left the pending state.
    #[error("Validation is already closed")]
    AlreadyClosed,

    /// Messages were requested from a validation that is still pending.
    #[error("Validation is still pending")]
    Pending,

    /// A serialized message list could not be deserialized.
    #[error("Malformed validation messages: {0}")]
    MalformedMessages(String),
}
