//! Metadata service HTTP client
//!
//! A single reqwest client configured with the short probe timeouts, shared
//! by every provider.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::Provider;
use crate::config::ProbeConfig;
use crate::error::ProbeError;

#[derive(Debug, Clone)]
pub struct MetadataClient {
    http: Client,
    config: Arc<ProbeConfig>,
}

impl MetadataClient {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let timeouts = &config.timeouts;
        let mut builder = Client::builder()
            .user_agent(concat!("sdl-core/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeouts.connect)
            .tcp_keepalive(timeouts.tcp_keepalive)
            .pool_idle_timeout(timeouts.pool_idle)
            .timeout(timeouts.request);

        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        let http = builder.build().map_err(ProbeError::Client)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Issue a GET and insist on 200 OK
    async fn get(
        &self,
        provider: Provider,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, ProbeError> {
        debug!(%provider, url, "Probing metadata service");

        let mut request = self.http.get(url);
        if provider == Provider::Gcp {
            request = request.header("Metadata-Flavor", "Google");
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|source| ProbeError::Request {
            provider,
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::Status {
                provider,
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: &str,
    ) -> Result<T, ProbeError> {
        self.get(provider, url, &[])
            .await?
            .json()
            .await
            .map_err(|source| ProbeError::Decode { provider, source })
    }

    pub async fn get_text(
        &self,
        provider: Provider,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, ProbeError> {
        self.get(provider, url, query)
            .await?
            .text()
            .await
            .map_err(|source| ProbeError::Decode { provider, source })
    }
}
