//! The Validation outcome primitive
//!
//! A [`Validation`] is the result of evaluating one rule. Synchronous
//! validators return it already closed; asynchronous ones return it pending
//! and close it exactly once when their work completes.
//!
//! ```
//! use judge_lib::Validation;
//!
//! let validation = Validation::new();
//! assert!(validation.is_pending());
//!
//! validation.close(r#"["has already been taken"]"#)?;
//! assert!(validation.is_invalid());
//! assert!(validation.close(Vec::<String>::new()).is_err());
//! # Ok::<(), judge_lib::error::ValidationError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::ValidationError;

/// State of a [`Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// Not finalized yet.
    #[default]
    Pending,
    /// Finalized without messages.
    Valid,
    /// Finalized with one or more messages.
    Invalid(Vec<String>),
}

impl ValidationState {
    /// Builds a closed state from a message list: empty means valid.
    pub fn from_messages(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(messages)
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Input accepted by [`Validation::close`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Closing {
    /// A structured message list.
    Messages(Vec<String>),
    /// A JSON array of strings, as returned by the server.
    Serialized(String),
}

impl Closing {
    fn into_messages(self) -> Result<Vec<String>, ValidationError> {
        match self {
            Self::Messages(messages) => Ok(messages),
            Self::Serialized(raw) => serde_json::from_str(&raw)
                .map_err(|e| ValidationError::MalformedMessages(e.to_string())),
        }
    }
}

impl From<Vec<String>> for Closing {
    fn from(messages: Vec<String>) -> Self {
        Self::Messages(messages)
    }
}

impl From<Vec<&str>> for Closing {
    fn from(messages: Vec<&str>) -> Self {
        Self::Messages(messages.into_iter().map(String::from).collect())
    }
}

impl From<String> for Closing {
    fn from(raw: String) -> Self {
        Self::Serialized(raw)
    }
}

impl From<&str> for Closing {
    fn from(raw: &str) -> Self {
        Self::Serialized(raw.to_string())
    }
}

/// Three-state outcome of one rule evaluation.
///
/// Cloning yields another handle to the same outcome, so an asynchronous
/// validator can keep one clone to close while the orchestrator watches the
/// other. The transition out of `Pending` happens exactly once.
///
/// There is no cancellation: a pending validation whose closing side is
/// dropped stays pending forever.
#[derive(Clone)]
pub struct Validation {
    state: Arc<watch::Sender<ValidationState>>,
}

impl Validation {
    /// Creates an open (pending) validation.
    pub fn new() -> Self {
        Self::with_state(ValidationState::Pending)
    }

    /// Creates a closed validation: valid if `messages` is empty.
    pub fn closed(messages: Vec<String>) -> Self {
        Self::with_state(ValidationState::from_messages(messages))
    }

    /// Creates a closed, valid validation.
    pub fn valid() -> Self {
        Self::with_state(ValidationState::Valid)
    }

    /// Creates a closed validation holding a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::closed(vec![message.into()])
    }

    fn with_state(state: ValidationState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { state: Arc::new(tx) }
    }

    /// Closes a pending validation.
    ///
    /// Accepts either a message list or its serialized JSON form. A malformed
    /// serialized form leaves the validation pending.
    pub fn close(&self, messages: impl Into<Closing>) -> Result<(), ValidationError> {
        if !self.is_pending() {
            return Err(ValidationError::AlreadyClosed);
        }

        let messages = messages.into().into_messages()?;
        let closed = self.state.send_if_modified(move |state| {
            if !state.is_pending() {
                return false;
            }
            *state = ValidationState::from_messages(messages);
            true
        });

        if closed {
            Ok(())
        } else {
            Err(ValidationError::AlreadyClosed)
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> ValidationState {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().is_pending()
    }

    pub fn is_valid(&self) -> bool {
        self.state.borrow().is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.state.borrow().is_invalid()
    }

    /// Returns the messages of a closed validation (empty when valid).
    pub fn messages(&self) -> Result<Vec<String>, ValidationError> {
        match &*self.state.borrow() {
            ValidationState::Pending => Err(ValidationError::Pending),
            ValidationState::Valid => Ok(Vec::new()),
            ValidationState::Invalid(messages) => Ok(messages.clone()),
        }
    }

    /// Waits until the validation is closed and returns its final state.
    ///
    /// Resolves immediately for an already closed validation.
    pub async fn closed_state(&self) -> ValidationState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.is_pending()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.state(),
        }
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for Validation {
    fn from(messages: Vec<String>) -> Self {
        Self::closed(messages)
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validation").field(&*self.state.borrow()).finish()
    }
}
