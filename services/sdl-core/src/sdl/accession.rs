use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use super::file::FileRecord;
use super::RequestedAccessions;
use crate::error::ValidationError;
use crate::model::Accession;

/// Status every accession must carry to be usable
pub const STATUS_OK: i64 = 200;

/// An accession entry of an SDL response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessionRecord {
    #[serde(rename = "bundle", deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: i64,
    #[serde(rename = "msg", deserialize_with = "super::null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub files: Vec<FileRecord>,
}

impl AccessionRecord {
    /// Check the accession against the request and the rest of the batch.
    ///
    /// `seen` holds the ids already accepted in this batch; on success this
    /// accession's id is added to it.
    pub fn validate<R>(&self, requested: &R, seen: &mut HashSet<String>) -> Result<(), ValidationError>
    where
        R: RequestedAccessions + ?Sized,
    {
        if !requested.is_requested(&self.id) {
            return Err(ValidationError::UnrequestedAccession {
                id: self.id.clone(),
            });
        }
        if self.status != STATUS_OK {
            return Err(ValidationError::Status {
                id: self.id.clone(),
                status: self.status,
                message: self.message.clone(),
            });
        }
        if self.files.is_empty() {
            return Err(ValidationError::EmptyFiles {
                id: self.id.clone(),
            });
        }
        if !seen.insert(self.id.clone()) {
            return Err(ValidationError::DuplicateAccession {
                id: self.id.clone(),
            });
        }

        for file in &self.files {
            file.validate()?;
        }

        debug!(accession = %self.id, files = self.files.len(), "Accession validated");
        Ok(())
    }

    /// Map into the domain accession; files are keyed by name, last one wins
    pub fn transfigure(self) -> Accession {
        let files = self
            .files
            .into_iter()
            .map(|f| {
                let file = f.transfigure();
                (file.name.clone(), file)
            })
            .collect();

        Accession { id: self.id, files }
    }
}
