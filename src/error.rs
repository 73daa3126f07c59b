//! Error types for playlist-export
//!
//! This module provides the error taxonomy for the library:
//! - `ResolutionError` — fatal before any per-item work begins
//! - `FetchError` — per-item, contained within the run loop
//! - `StoreError` — reading or writing the tabular export target
//!
//! Per-item fetch errors never escape the run loop, so `FetchError` has no
//! top-level variant; resolution and store errors propagate to the run
//! outcome and are reported once.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for playlist-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for playlist-export
#[derive(Debug, Error)]
pub enum Error {
    /// Playlist reference could not be resolved into an item list
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Export store read or write failed
    #[error("export store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (provider JSON output)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External tool execution failed (yt-dlp or equivalent)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Fatal errors raised while resolving a playlist reference
///
/// Any of these aborts the run before per-item fetching starts.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The supplied reference was empty after trimming
    #[error("playlist reference is empty")]
    EmptyReference,

    /// The provider could not resolve the reference at all
    #[error("failed to resolve playlist '{reference}': {reason}")]
    Unresolvable {
        /// The playlist reference that failed to resolve
        reference: String,
        /// Provider-supplied failure detail
        reason: String,
    },

    /// The reference resolved but yielded zero items
    #[error("no items found in playlist '{reference}'")]
    EmptyPlaylist {
        /// The playlist reference that resolved to nothing
        reference: String,
    },
}

/// Non-fatal per-item fetch errors
///
/// These are logged and counted; the run loop continues with the next item.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider reported a failure for this item
    #[error("metadata fetch failed for item '{id}': {reason}")]
    Provider {
        /// Item identifier
        id: String,
        /// Provider-supplied failure detail
        reason: String,
    },

    /// The per-fetch timeout elapsed before the provider responded
    #[error("metadata fetch for item '{id}' timed out after {seconds}s")]
    Timeout {
        /// Item identifier
        id: String,
        /// Configured timeout in seconds
        seconds: u64,
    },
}

/// Errors from the tabular export store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open or parse an existing export file
    #[error("failed to read existing export '{path}': {source}")]
    ReadExisting {
        /// Path of the export file that could not be read
        path: PathBuf,
        /// Underlying CSV or I/O failure
        #[source]
        source: csv::Error,
    },

    /// The existing export has no `Title` column to seed dedup state from
    #[error("export '{path}' has no Title column")]
    MissingTitleColumn {
        /// Path of the export file missing the column
        path: PathBuf,
    },

    /// Failed to write the export file
    #[error("failed to write export '{path}': {source}")]
    Write {
        /// Path of the export file that could not be written
        path: PathBuf,
        /// Underlying CSV or I/O failure
        #[source]
        source: csv::Error,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_display_includes_reference() {
        let err = ResolutionError::EmptyPlaylist {
            reference: "https://example.com/playlist?list=abc".to_string(),
        };
        assert!(err.to_string().contains("list=abc"));
    }

    #[test]
    fn fetch_timeout_display_includes_item_and_seconds() {
        let err = FetchError::Timeout {
            id: "vid42".to_string(),
            seconds: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("vid42"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn store_error_wraps_into_top_level_error() {
        let err: Error = StoreError::MissingTitleColumn {
            path: PathBuf::from("/tmp/out.csv"),
        }
        .into();
        assert!(matches!(err, Error::Store(_)));
        assert!(err.to_string().contains("no Title column"));
    }
}
