//! Error taxonomy
//!
//! Typed failures for metadata probing and SDL response validation.

use std::fmt;
use thiserror::Error;

use crate::locality::Provider;

/// A single metadata probe against one provider failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP client could not be constructed
    #[error("failed to build metadata HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (connection refused, timeout, DNS, ...)
    #[error(
        "{provider} metadata request to {url} failed, locality can only be resolved on an amazon or google instance: {source}"
    )]
    Request {
        provider: Provider,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The metadata service answered with something other than 200 OK
    #[error("{provider} metadata service at {url} returned status {status}")]
    Status {
        provider: Provider,
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body did not have the expected JSON shape
    #[error("couldn't decode response from {provider} metadata service: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// The metadata service answered but had no usable region
    #[error("{provider} metadata service returned an empty region")]
    EmptyRegion { provider: Provider },
}

impl ProbeError {
    pub fn provider(&self) -> Option<Provider> {
        match self {
            ProbeError::Client(_) => None,
            ProbeError::Request { provider, .. }
            | ProbeError::Status { provider, .. }
            | ProbeError::Decode { provider, .. }
            | ProbeError::EmptyRegion { provider } => Some(*provider),
        }
    }
}

/// Neither AWS nor GCP could be detected.
///
/// Both causes are kept so an operator can tell "not on a known cloud" apart
/// from "on a cloud whose metadata service is blocked".
#[derive(Debug, Error)]
#[error("could not detect cloud platform: aws: {aws}; gcp: {gcp}")]
pub struct DetectionError {
    pub aws: ProbeError,
    #[source]
    pub gcp: ProbeError,
}

/// Fields whose absence invalidates an SDL record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Type,
    Link,
    Service,
    Region,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Type => write!(f, "type"),
            Field::Link => write!(f, "link"),
            Field::Service => write!(f, "service"),
            Field::Region => write!(f, "region"),
        }
    }
}

/// An SDL response violated one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected SDL API version {expected}, got version {actual:?}")]
    VersionMismatch { expected: String, actual: String },

    #[error("SDL API v{version} returned an empty response")]
    EmptyResult { version: String },

    #[error("SDL API returned accession that wasn't requested: {id}")]
    UnrequestedAccession { id: String },

    #[error("SDL API: {id} returned status {status}: {message}")]
    Status {
        id: String,
        status: i64,
        message: String,
    },

    #[error("SDL API returned no files for accession {id}")]
    EmptyFiles { id: String },

    #[error("SDL API returned a duplicate accession: {id}")]
    DuplicateAccession { id: String },

    /// `record` names the file (or location owner) when known
    #[error("SDL API returned a {record} without a {field}")]
    MissingField { record: String, field: Field },

    #[error("SDL API returned {count} locations for file {file}, expected at most one")]
    MultipleLocations { file: String, count: usize },
}

/// A raw SDL response body could not be turned into domain accessions.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("SDL API responded with error {status}: {message}")]
    Api { status: i64, message: String },

    #[error("couldn't decode SDL API response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Service.to_string(), "service");
        assert_eq!(Field::Type.to_string(), "type");
    }

    #[test]
    fn test_validation_messages_carry_context() {
        let err = ValidationError::Status {
            id: "SRR000001".to_string(),
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "SDL API: SRR000001 returned status 404: not found");

        let err = ValidationError::MissingField {
            record: "file a.bam location".to_string(),
            field: Field::Link,
        };
        assert_eq!(
            err.to_string(),
            "SDL API returned a file a.bam location without a link"
        );
    }

    #[test]
    fn test_detection_error_reports_both_causes() {
        let err = DetectionError {
            aws: ProbeError::EmptyRegion {
                provider: Provider::Aws,
            },
            gcp: ProbeError::EmptyRegion {
                provider: Provider::Gcp,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("aws: aws metadata service returned an empty region"));
        assert!(msg.contains("gcp: gcp metadata service returned an empty region"));
        assert_eq!(err.aws.provider(), Some(Provider::Aws));
        assert_eq!(err.gcp.provider(), Some(Provider::Gcp));
    }
}
