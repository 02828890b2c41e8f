//! Metadata probe configuration
//!
//! Endpoint URLs and the timeouts that keep probes from hanging off-cloud.

use std::time::Duration;

pub const AWS_IDENTITY_DOCUMENT_URL: &str =
    "http://169.254.169.254/latest/dynamic/instance-identity/document";
pub const AWS_IDENTITY_PKCS7_URL: &str =
    "http://169.254.169.254/latest/dynamic/instance-identity/pkcs7";
pub const GCP_ZONE_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/zone?alt=json";
pub const GCP_IDENTITY_URL: &str =
    "http://metadata/computeMetadata/v1/instance/service-accounts/default/identity";

/// Audience the GCP identity token is minted for
pub const DEFAULT_AUDIENCE: &str = "https://www.ncbi.nlm.nih.gov";

/// Timeouts applied to every metadata request.
///
/// The metadata endpoints only exist on the matching cloud, so anywhere else
/// a probe must fail within these bounds rather than the OS defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTimeouts {
    pub connect: Duration,
    pub tcp_keepalive: Duration,
    pub pool_idle: Duration,
    /// Upper bound on a whole request, covering TLS handshake and the wait
    /// for the first response bytes.
    pub request: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(1),
            tcp_keepalive: Duration::from_secs(1),
            pool_idle: Duration::from_millis(500),
            request: Duration::from_secs(2),
        }
    }
}

/// Where and how the metadata services are probed
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub aws_identity_document_url: String,
    pub aws_identity_pkcs7_url: String,
    pub gcp_zone_url: String,
    pub gcp_identity_url: String,
    pub audience: String,
    pub timeouts: ProbeTimeouts,
    /// Honour HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment
    pub use_env_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            aws_identity_document_url: AWS_IDENTITY_DOCUMENT_URL.to_string(),
            aws_identity_pkcs7_url: AWS_IDENTITY_PKCS7_URL.to_string(),
            gcp_zone_url: GCP_ZONE_URL.to_string(),
            gcp_identity_url: GCP_IDENTITY_URL.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            timeouts: ProbeTimeouts::default(),
            use_env_proxy: true,
        }
    }
}

impl ProbeConfig {
    /// Point the AWS probes at a different metadata host
    pub fn aws_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.aws_identity_document_url =
            format!("{}/latest/dynamic/instance-identity/document", base);
        self.aws_identity_pkcs7_url = format!("{}/latest/dynamic/instance-identity/pkcs7", base);
        self
    }

    /// Point the GCP probes at a different metadata host
    pub fn gcp_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.gcp_zone_url = format!("{}/computeMetadata/v1/instance/zone?alt=json", base);
        self.gcp_identity_url = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/identity",
            base
        );
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn timeouts(mut self, timeouts: ProbeTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn use_env_proxy(mut self, enabled: bool) -> Self {
        self.use_env_proxy = enabled;
        self
    }
}
