use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Field, ValidationError};

/// Where the SDL API says a file can be downloaded from
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "super::null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub service: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub region: String,
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub bucket: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub key: String,
}

impl LocationRecord {
    /// Link, service and region must be present, checked in that order
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (Field::Link, &self.link),
            (Field::Service, &self.service),
            (Field::Region, &self.region),
        ];

        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ValidationError::MissingField {
                record: "location".to_string(),
                field: *field,
            }),
            None => Ok(()),
        }
    }
}
