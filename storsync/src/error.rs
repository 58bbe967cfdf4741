//! Error types for storsync
//!
//! [`SyncError`] is a hard failure: it aborts the sync pass. Recoverable
//! problems (skipped enclosure stage, rejected uploads) are logged and recorded
//! in the [`SyncReport`](crate::report::SyncReport) instead.

use crate::mapping::MappingError;
use crate::source::FetchError;
use thiserror::Error;

/// Sync pass error
#[derive(Debug, Error)]
pub enum SyncError {
    /// A listing the pass cannot continue without could not be fetched
    #[error("Failed to fetch {listing}: {source}")]
    Fetch {
        listing: String,
        #[source]
        source: FetchError,
    },

    /// Source returned data that does not match the expected record shape
    #[error("Malformed {listing} from source: {message}")]
    MalformedSource { listing: String, message: String },

    /// A record could not be transformed
    #[error("Cannot map {record}: {source}")]
    Mapping {
        record: String,
        #[source]
        source: MappingError,
    },
}

impl SyncError {
    /// Classify a fetch failure; undecodable bodies are malformed source data
    pub fn fetch(listing: impl Into<String>, error: FetchError) -> Self {
        match error {
            FetchError::Decode(message) => SyncError::MalformedSource {
                listing: listing.into(),
                message,
            },
            source => SyncError::Fetch {
                listing: listing.into(),
                source,
            },
        }
    }

    pub fn mapping(record: impl Into<String>, source: MappingError) -> Self {
        SyncError::Mapping {
            record: record.into(),
            source,
        }
    }
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
