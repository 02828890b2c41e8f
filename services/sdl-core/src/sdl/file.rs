use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::location::LocationRecord;
use crate::error::{Field, ValidationError};
use crate::model::File;

/// A file entry of an accession as sent by the SDL API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileRecord {
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub size: u64,
    #[serde(rename = "type", deserialize_with = "super::null_as_default")]
    pub file_type: String,
    #[serde(rename = "modificationDate")]
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(rename = "md5", deserialize_with = "super::null_as_default")]
    pub md5_hash: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub locations: Vec<LocationRecord>,
}

impl FileRecord {
    /// Name and type are required; at most one location, which must be valid
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField {
                record: "file".to_string(),
                field: Field::Name,
            });
        }
        if self.file_type.is_empty() {
            return Err(ValidationError::MissingField {
                record: format!("file {}", self.name),
                field: Field::Type,
            });
        }

        match self.locations.as_slice() {
            [] => Ok(()),
            [location] => location.validate().map_err(|e| match e {
                ValidationError::MissingField { field, .. } => ValidationError::MissingField {
                    record: format!("location of file {}", self.name),
                    field,
                },
                other => other,
            }),
            many => Err(ValidationError::MultipleLocations {
                file: self.name.clone(),
                count: many.len(),
            }),
        }
    }

    /// Flatten into the domain file, merging in the sole location if any
    pub fn transfigure(self) -> File {
        let mut file = File {
            name: self.name,
            size: self.size,
            file_type: self.file_type,
            modified_date: self.modified_date,
            md5_hash: self.md5_hash,
            ..Default::default()
        };

        if let Some(location) = self.locations.into_iter().next() {
            file.link = location.link;
            file.service = location.service;
            file.region = location.region;
        }

        file
    }
}
