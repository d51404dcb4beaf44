//! Transport trait and Reply

use std::sync::Arc;

use async_trait::async_trait;

/// A completed (or failed) GET request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code; 0 when the request never produced a response.
    pub status: u16,
    /// Response headers, names lowercased.
    pub headers: Vec<(String, String)>,
    /// Response body, or the failure description for transport errors.
    pub body: String,
}

impl Reply {
    /// Creates a reply without headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Creates a `200 OK` reply.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Creates a reply for a request that failed before a response arrived.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The HTTP backend used by [`Network`](super::Network).
///
/// Implementations never fail: every outcome, including connection errors,
/// is described by the returned [`Reply`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request.
    async fn get(&self, url: &str) -> Reply;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Reply {
        (**self).get(url).await
    }
}
