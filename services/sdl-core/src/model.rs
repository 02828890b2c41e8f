//! Domain shapes handed to the filesystem layer
//!
//! These are produced by the SDL transfigure step and outlive the wire
//! records they were built from.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file of an accession, with its (single) download location merged in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub modified_date: Option<DateTime<Utc>>,
    pub md5_hash: String,
    /// Empty when the SDL API gave no location
    pub link: String,
    pub service: String,
    pub region: String,
}

impl File {
    /// Whether a download link is known yet
    pub fn has_location(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A requested accession and its files keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accession {
    pub id: String,
    pub files: HashMap<String, File>,
}
