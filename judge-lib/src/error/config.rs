//! Configuration errors

/// Errors raised while building a [`JudgeConfig`](crate::JudgeConfig) from
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The origin is not an absolute http(s) URL.
    #[error("Invalid origin '{value}': {message}")]
    InvalidOrigin { value: String, message: String },

    /// The endpoint base path does not start with `/`.
    #[error("Invalid base path '{0}': must start with '/'")]
    InvalidBasePath(String),
}
