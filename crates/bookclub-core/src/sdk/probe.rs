//! HTTP status probe backed by reqwest

use super::environment::StatusProbe;
use super::error::ProbeError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Issues a plain GET against the script URL and reports the status code
#[derive(Debug, Clone)]
pub struct HttpStatusProbe {
    client: reqwest::Client,
}

impl HttpStatusProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusProbe for HttpStatusProbe {
    async fn probe(&self, url: &Url) -> Result<u16, ProbeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ProbeError(e.to_string()))?;

        let status = response.status().as_u16();
        log::debug!("probe: {} answered HTTP {}", url.path(), status);
        Ok(status)
    }
}
