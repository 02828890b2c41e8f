use serde::Deserialize;

use super::accession::AccessionRecord;
use crate::error::ValidationError;

/// Top-level object every SDL API response is wrapped in
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    #[serde(deserialize_with = "super::null_as_default")]
    pub version: String,
    #[serde(rename = "result", deserialize_with = "super::null_as_default")]
    pub results: Vec<AccessionRecord>,
}

impl ResponseEnvelope {
    /// Version must match and results must be non-empty.
    ///
    /// Accessions are not inspected here; see [`super::transfigure_response`].
    pub fn validate(&self, expected_version: &str) -> Result<(), ValidationError> {
        if self.version != expected_version {
            return Err(ValidationError::VersionMismatch {
                expected: expected_version.to_string(),
                actual: self.version.clone(),
            });
        }
        if self.results.is_empty() {
            return Err(ValidationError::EmptyResult {
                version: self.version.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_mismatch() {
        let env = ResponseEnvelope {
            version: "1".to_string(),
            results: vec![AccessionRecord::default()],
        };

        assert_eq!(
            env.validate("2"),
            Err(ValidationError::VersionMismatch {
                expected: "2".to_string(),
                actual: "1".to_string(),
            })
        );
    }

    #[test]
    fn test_version_checked_before_results() {
        let env = ResponseEnvelope::default();
        assert!(matches!(
            env.validate("2"),
            Err(ValidationError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_result() {
        let env = ResponseEnvelope {
            version: "2".to_string(),
            results: vec![],
        };
        assert_eq!(
            env.validate("2"),
            Err(ValidationError::EmptyResult {
                version: "2".to_string()
            })
        );
    }

    #[test]
    fn test_does_not_inspect_accessions() {
        let env = ResponseEnvelope {
            version: "2".to_string(),
            results: vec![AccessionRecord::default()],
        };
        assert!(env.validate("2").is_ok());
    }
}
