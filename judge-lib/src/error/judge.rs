//! Top-level error type

use super::ConfigError;
use super::InvalidPatternError;
use super::MalformedRuleSetError;
use super::MissingConfirmationTargetError;
use super::UnknownValidatorError;
use super::ValidationError;

/// Any configuration error surfaced by the engine.
///
/// Validation failures are never represented here; they travel through the
/// `on_invalid` callback as messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedRuleSet(#[from] MalformedRuleSetError),

    #[error(transparent)]
    UnknownValidator(#[from] UnknownValidatorError),

    #[error(transparent)]
    MissingConfirmationTarget(#[from] MissingConfirmationTargetError),

    #[error(transparent)]
    InvalidPattern(#[from] InvalidPatternError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the rule kind if this is an unknown validator error.
    pub fn unknown_kind(&self) -> Option<&str> {
        match self {
            Self::UnknownValidator(e) => Some(&e.kind),
            _ => None,
        }
    }
}
