use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProxyConfig;
use crate::types::{TryOnRequest, UpstreamReply};

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn forward(&self, request: &TryOnRequest) -> Result<UpstreamReply>;
}

/// Relays validated requests to the try-on backend over HTTP.
pub struct HttpUpstream {
    client: Client,
    endpoint: String,
}

impl HttpUpstream {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::info!(endpoint = %config.endpoint, timeout = ?config.timeout, "Upstream client configured");

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    #[tracing::instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn forward(&self, request: &TryOnRequest) -> Result<UpstreamReply> {
        // `.json()` sets the application/json content type
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();

        // An unreadable body is treated like one that is not JSON
        let body = match response.bytes().await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(status, error = %e, "Upstream body is not JSON");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(status, error = %e, "Failed to read upstream body");
                None
            }
        };

        tracing::debug!(status, "Upstream responded");
        Ok(UpstreamReply { status, body })
    }
}
