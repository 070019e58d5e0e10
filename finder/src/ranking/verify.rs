use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::error::{FinderError, Result};

/// Answers "does this URL currently resolve to a page".
///
/// Implementations must not fail: any transport error counts as unreachable.
#[async_trait]
pub trait LinkVerifier: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

const MAX_REDIRECTS: usize = 5;

/// Verifier backed by a real HTTP client. Sends HEAD and retries as GET for
/// servers that refuse HEAD.
pub struct HttpLinkVerifier {
    client: Client,
}

impl HttpLinkVerifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("fashion-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinderError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn status_of(&self, url: &str) -> Option<StatusCode> {
        let head = match self.client.head(url).send().await {
            Ok(response) => response.status(),
            Err(e) => {
                debug!(url, error = %e, "HEAD request failed");
                return None;
            }
        };

        if head != StatusCode::METHOD_NOT_ALLOWED && head != StatusCode::NOT_IMPLEMENTED {
            return Some(head);
        }

        match self.client.get(url).send().await {
            Ok(response) => Some(response.status()),
            Err(e) => {
                debug!(url, error = %e, "GET request failed");
                None
            }
        }
    }
}

#[async_trait]
impl LinkVerifier for HttpLinkVerifier {
    async fn is_reachable(&self, url: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }
        let reachable = self
            .status_of(url)
            .await
            .is_some_and(|status| status.is_success());
        debug!(url, reachable, "Verified link");
        reachable
    }
}

/// Verifier that never touches the network. Used when verification is
/// disabled and in tests.
pub struct StaticVerifier {
    reachable: bool,
}

impl StaticVerifier {
    pub fn new(reachable: bool) -> Self {
        Self { reachable }
    }
}

#[async_trait]
impl LinkVerifier for StaticVerifier {
    async fn is_reachable(&self, _url: &str) -> bool {
        self.reachable
    }
}
