//! Per-record failures met while reading the catalog.
//!
//! These never abort a listing: the catalog drops the record, logs the
//! error and keeps going.

use thiserror::Error;

use crate::error::ValidationError;

/// Why a single stored record was left out of a listing.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The blob content could not be downloaded.
    #[error("failed to fetch {key}: {reason}")]
    Fetch {
        /// Blob key of the record.
        key: String,
        /// Backend error text.
        reason: String,
    },

    /// The blob was listed but gone by the time it was fetched.
    #[error("record {key} disappeared before it could be read")]
    Missing {
        /// Blob key of the record.
        key: String,
    },

    /// The content is not a JSON record object.
    #[error("failed to parse {key}: {source}")]
    Parse {
        /// Blob key of the record.
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record lacks `id`, `title` or `description`.
    #[error("record {key} is malformed: {source}")]
    Shape {
        /// Blob key of the record.
        key: String,
        #[source]
        source: ValidationError,
    },
}

impl RecordError {
    /// Blob key of the offending record.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Fetch { key, .. }
            | Self::Missing { key }
            | Self::Parse { key, .. }
            | Self::Shape { key, .. } => key,
        }
    }
}
