//! Engine configuration

use url::Url;

use crate::error::ConfigError;

/// Default base path of the server-side validation endpoint.
pub const DEFAULT_BASE_PATH: &str = "/judge";

/// Default message used when a server-backed check cannot complete.
pub const DEFAULT_REQUEST_ERROR: &str = "Request error: %{status}";

/// Configuration for server-backed validators.
///
/// # Example
///
/// ```
/// use judge_lib::JudgeConfig;
///
/// let config = JudgeConfig::default()
///     .with_origin("https://example.com")
///     .with_base_path("/validations");
///
/// assert_eq!(config.endpoint("validate"), "https://example.com/validations/validate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    /// Scheme and authority prepended to endpoint paths.
    ///
    /// Default: none (relative URLs)
    pub origin: Option<String>,

    /// Path of the validation endpoint.
    ///
    /// Default: `/judge`
    pub base_path: String,

    /// Message reported when a request fails; `%{status}` is replaced by the
    /// HTTP status (0 for transport failures).
    ///
    /// Default: `Request error: %{status}`
    pub request_error: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            origin: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            request_error: DEFAULT_REQUEST_ERROR.to_string(),
        }
    }
}

impl JudgeConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin (e.g. `https://example.com`).
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into().trim_end_matches('/').to_string());
        self
    }

    /// Sets the endpoint base path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Sets the generic request failure message.
    pub fn with_request_error(mut self, message: impl Into<String>) -> Self {
        self.request_error = message.into();
        self
    }

    /// Reads `JUDGE_ORIGIN`, `JUDGE_BASE_PATH` and `JUDGE_REQUEST_ERROR`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(origin) = lookup("JUDGE_ORIGIN").filter(|v| !v.trim().is_empty()) {
            let url = Url::parse(origin.trim()).map_err(|e| ConfigError::InvalidOrigin {
                value: origin.clone(),
                message: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidOrigin {
                    value: origin,
                    message: "scheme must be http or https".to_string(),
                });
            }
            config = config.with_origin(origin.trim());
        }

        if let Some(path) = lookup("JUDGE_BASE_PATH").filter(|v| !v.is_empty()) {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidBasePath(path));
            }
            config.base_path = path;
        }

        if let Some(message) = lookup("JUDGE_REQUEST_ERROR").filter(|v| !v.is_empty()) {
            config.request_error = message;
        }

        Ok(config)
    }

    /// Full URL (or path, without an origin) of an endpoint below the base path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.origin.as_deref().unwrap_or_default(),
            self.base_path.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The request failure message for a given status.
    pub fn request_error_for(&self, status: u16) -> String {
        self.request_error.replace("%{status}", &status.to_string())
    }
}
