//! SDL API Response Validation
//!
//! Wire records of the SDL API and the pipeline that turns one response into
//! domain accessions:
//!
//! ```text
//! ResponseEnvelope -> AccessionRecord -> FileRecord -> LocationRecord
//! ```
//!
//! Every step is fail-fast; one bad record rejects the whole response.

mod accession;
mod envelope;
mod file;
mod location;

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

pub use accession::{AccessionRecord, STATUS_OK};
pub use envelope::ResponseEnvelope;
pub use file::FileRecord;
pub use location::LocationRecord;

use crate::error::{PayloadError, ValidationError};
use crate::model::Accession;

/// SDL protocol version understood by default
pub const SDL_VERSION: &str = "2";

/// Membership check for the accessions a caller asked the SDL API about
pub trait RequestedAccessions {
    fn is_requested(&self, id: &str) -> bool;
}

impl<S: BuildHasher> RequestedAccessions for HashSet<String, S> {
    fn is_requested(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl RequestedAccessions for BTreeSet<String> {
    fn is_requested(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl<T: AsRef<str>> RequestedAccessions for [T] {
    fn is_requested(&self, id: &str) -> bool {
        self.iter().any(|r| r.as_ref() == id)
    }
}

impl<T: AsRef<str>> RequestedAccessions for Vec<T> {
    fn is_requested(&self, id: &str) -> bool {
        self.as_slice().is_requested(id)
    }
}

impl<F: Fn(&str) -> bool> RequestedAccessions for F {
    fn is_requested(&self, id: &str) -> bool {
        self(id)
    }
}

/// Decode an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error object the SDL API returns instead of an envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default, deserialize_with = "null_as_default")]
    status: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    message: String,
}

/// Decode a raw SDL response body.
///
/// An API error object is reported as [`PayloadError::Api`].
pub fn parse_response(body: &[u8]) -> Result<ResponseEnvelope, PayloadError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    let is_api_error = value
        .as_object()
        .map(|o| o.contains_key("status") && o.contains_key("message") && !o.contains_key("result"))
        .unwrap_or(false);

    if is_api_error {
        let err: ApiError = serde_json::from_value(value)?;
        return Err(PayloadError::Api {
            status: err.status,
            message: err.message,
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Validate a whole response and transfigure it into domain accessions.
///
/// Duplicate tracking is scoped to this call. Accessions come back in
/// response order.
pub fn transfigure_response<R>(
    envelope: ResponseEnvelope,
    expected_version: &str,
    requested: &R,
) -> Result<Vec<Accession>, ValidationError>
where
    R: RequestedAccessions + ?Sized,
{
    envelope.validate(expected_version)?;

    let mut seen = HashSet::with_capacity(envelope.results.len());
    for record in &envelope.results {
        record.validate(requested, &mut seen)?;
    }

    debug!(count = envelope.results.len(), "SDL response validated");

    let accessions: Vec<Accession> = envelope
        .results
        .into_iter()
        .map(AccessionRecord::transfigure)
        .collect();

    info!(
        version = expected_version,
        accessions = accessions.len(),
        "SDL response accepted"
    );
    Ok(accessions)
}
