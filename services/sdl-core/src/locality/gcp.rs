//! GCP instance metadata

use tracing::{debug, warn};

use super::client::MetadataClient;
use super::Provider;
use crate::error::ProbeError;

/// Locality of a process running on a Compute Engine instance
#[derive(Debug, Clone)]
pub struct GcpLocation {
    client: MetadataClient,
}

impl GcpLocation {
    pub fn new(client: MetadataClient) -> Self {
        Self { client }
    }

    /// Zone the instance runs in, e.g. `us-central1-a`
    pub async fn region(&self) -> Result<String, ProbeError> {
        let url = &self.client.config().gcp_zone_url;
        let zone: String = self.client.get_json(Provider::Gcp, url).await?;

        let region = zone_basename(&zone).ok_or(ProbeError::EmptyRegion {
            provider: Provider::Gcp,
        })?;

        debug!(zone = %zone, region, "Resolved GCP zone");
        Ok(region.to_string())
    }

    /// Instance identity token minted for the configured audience
    pub async fn identity_token(&self) -> Result<String, ProbeError> {
        let config = self.client.config();
        self.client
            .get_text(
                Provider::Gcp,
                &config.gcp_identity_url,
                &[("audience", config.audience.as_str()), ("format", "full")],
            )
            .await
    }

    /// Identity token, or "" when unavailable
    pub async fn locality(&self) -> String {
        match self.identity_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not retrieve GCP instance identity token");
                String::new()
            }
        }
    }
}

/// Last path segment of `projects/<id>/zones/<zone>`.
///
/// Empty and one-character segments are rejected.
fn zone_basename(zone: &str) -> Option<&str> {
    let trimmed = zone.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if base.len() <= 1 {
        None
    } else {
        Some(base)
    }
}
