//! Network primitive
//!
//! A thin GET helper for validators that need the server's opinion. It does
//! not retry and applies no timeout beyond the transport's own; callers decide
//! what a failure means.

mod reqwest_transport;
mod transport;

pub use reqwest_transport::ReqwestTransport;
pub use transport::Reply;
pub use transport::Transport;

use std::sync::Arc;

use log::debug;
use log::warn;

/// Callback-style GET over a pluggable [`Transport`].
///
/// `get` returns immediately; the request runs on a spawned task and exactly
/// one of the two callbacks fires when it completes. Must be called from
/// within a tokio runtime.
#[derive(Clone)]
pub struct Network {
    transport: Arc<dyn Transport>,
}

impl Network {
    /// Creates a network primitive over the given transport.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a network primitive over a shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Issues a GET request.
    ///
    /// `on_success(status, headers, body)` fires for 2xx responses,
    /// `on_error(status, headers, body)` for everything else, including
    /// transport failures (status 0).
    pub fn get<S, E>(&self, url: impl Into<String>, on_success: S, on_error: E)
    where
        S: FnOnce(u16, &[(String, String)], &str) + Send + 'static,
        E: FnOnce(u16, &[(String, String)], &str) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let url = url.into();

        debug!("GET {}", url);
        tokio::spawn(async move {
            let reply = transport.get(&url).await;
            if reply.is_success() {
                debug!("GET {} -> {}", url, reply.status);
                on_success(reply.status, &reply.headers, &reply.body);
            } else {
                warn!("GET {} failed with status {}: {}", url, reply.status, reply.body);
                on_error(reply.status, &reply.headers, &reply.body);
            }
        });
    }

    /// Performs a GET request and waits for the reply.
    pub async fn fetch(&self, url: &str) -> Reply {
        self.transport.get(url).await
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network").finish_non_exhaustive()
    }
}
