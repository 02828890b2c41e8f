//! AWS instance metadata

use serde::Deserialize;
use tracing::{debug, warn};

use super::client::MetadataClient;
use super::Provider;
use crate::error::ProbeError;

#[derive(Debug, Deserialize)]
struct IdentityDocument {
    #[serde(default)]
    region: String,
}

/// Locality of a process running on an EC2 instance
#[derive(Debug, Clone)]
pub struct AwsLocation {
    client: MetadataClient,
}

impl AwsLocation {
    pub fn new(client: MetadataClient) -> Self {
        Self { client }
    }

    /// Region from the instance identity document
    pub async fn region(&self) -> Result<String, ProbeError> {
        let url = &self.client.config().aws_identity_document_url;
        let document: IdentityDocument = self.client.get_json(Provider::Aws, url).await?;

        if document.region.is_empty() {
            return Err(ProbeError::EmptyRegion {
                provider: Provider::Aws,
            });
        }

        debug!(region = %document.region, "Resolved AWS region");
        Ok(document.region)
    }

    /// PKCS7 signature of the identity document, or "" when unavailable
    pub async fn locality(&self) -> String {
        let url = &self.client.config().aws_identity_pkcs7_url;
        match self.client.get_text(Provider::Aws, url, &[]).await {
            Ok(signature) => signature,
            Err(e) => {
                warn!(error = %e, "Could not retrieve AWS instance identity signature");
                String::new()
            }
        }
    }
}
