//! Cloud Locality Detection
//!
//! Works out which cloud (and which region of it) the process runs on by
//! probing the instance metadata services.
//!
//! ## Detection order
//!
//! 1. AWS instance identity document
//! 2. GCP instance identity token (only if AWS failed)
//!
//! If both fail, the returned [`DetectionError`] keeps both causes. A manual
//! location skips detection entirely.

mod aws;
mod client;
mod gcp;
mod manual;

use std::fmt;

use tracing::{debug, info, warn};

pub use aws::AwsLocation;
pub use client::MetadataClient;
pub use gcp::GcpLocation;
pub use manual::ManualLocation;

use crate::config::ProbeConfig;
use crate::error::{DetectionError, ProbeError};

/// Cloud providers with a probed metadata service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
    Gcp,
}

impl Provider {
    /// Short tag the SDL API uses for this cloud
    pub fn cloud_name(&self) -> &'static str {
        match self {
            Provider::Aws => "s3",
            Provider::Gcp => "gs",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Aws => write!(f, "aws"),
            Provider::Gcp => write!(f, "gcp"),
        }
    }
}

/// How a downstream consumer should interpret [`Locator::locality`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalityType {
    /// Signed AWS identity document
    AwsPkcs7,
    /// GCP identity JWT
    GcpJwt,
    /// Operator-supplied value, not to be verified
    Forced,
}

impl LocalityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalityType::AwsPkcs7 => "aws_pkcs7",
            LocalityType::GcpJwt => "gcp_jwt",
            LocalityType::Forced => "forced",
        }
    }
}

impl fmt::Display for LocalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the process is running
#[derive(Debug, Clone)]
pub enum Locator {
    Aws(AwsLocation),
    Gcp(GcpLocation),
    Manual(ManualLocation),
}

impl Locator {
    /// Skip detection and use `location` for everything
    pub fn manual(location: impl Into<String>) -> Self {
        Locator::Manual(ManualLocation::new(location))
    }

    pub fn cloud_name(&self) -> &str {
        match self {
            Locator::Aws(_) => Provider::Aws.cloud_name(),
            Locator::Gcp(_) => Provider::Gcp.cloud_name(),
            Locator::Manual(m) => m.as_str(),
        }
    }

    /// Region (or zone); probes the metadata service for cloud variants
    pub async fn region(&self) -> Result<String, ProbeError> {
        match self {
            Locator::Aws(aws) => aws.region().await,
            Locator::Gcp(gcp) => gcp.region().await,
            Locator::Manual(m) => Ok(m.as_str().to_string()),
        }
    }

    /// Opaque identity artifact, "" when it could not be obtained
    pub async fn locality(&self) -> String {
        match self {
            Locator::Aws(aws) => aws.locality().await,
            Locator::Gcp(gcp) => gcp.locality().await,
            Locator::Manual(m) => m.as_str().to_string(),
        }
    }

    pub fn locality_type(&self) -> LocalityType {
        match self {
            Locator::Aws(_) => LocalityType::AwsPkcs7,
            Locator::Gcp(_) => LocalityType::GcpJwt,
            Locator::Manual(_) => LocalityType::Forced,
        }
    }

    /// `<cloud>.<region>`, or the manual value unchanged
    pub async fn location(&self) -> Result<String, ProbeError> {
        match self {
            Locator::Manual(m) => Ok(m.as_str().to_string()),
            _ => Ok(format!("{}.{}", self.cloud_name(), self.region().await?)),
        }
    }
}

/// Probes AWS, then GCP, and hands back the first that answers
pub struct LocalityResolver {
    client: MetadataClient,
}

impl LocalityResolver {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        Ok(Self {
            client: MetadataClient::new(config)?,
        })
    }

    pub async fn resolve(&self) -> Result<Locator, DetectionError> {
        let aws = AwsLocation::new(self.client.clone());
        let aws_err = match aws.region().await {
            Ok(region) => {
                info!(provider = %Provider::Aws, %region, "Detected cloud platform");
                return Ok(Locator::Aws(aws));
            }
            Err(e) => e,
        };

        debug!(error = %aws_err, "AWS detection failed, trying GCP");

        let gcp = GcpLocation::new(self.client.clone());
        match gcp.identity_token().await {
            Ok(_) => {
                info!(provider = %Provider::Gcp, "Detected cloud platform");
                Ok(Locator::Gcp(gcp))
            }
            Err(gcp_err) => {
                warn!(aws = %aws_err, gcp = %gcp_err, "Could not detect cloud platform");
                Err(DetectionError {
                    aws: aws_err,
                    gcp: gcp_err,
                })
            }
        }
    }
}
