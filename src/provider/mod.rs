//! Metadata provider capability interface
//!
//! The provider is the external collaborator that knows how to talk to the
//! source platform. The library consumes it through a narrow trait so that
//! production runs can shell out to `yt-dlp` while tests script responses
//! in memory.

mod cli;

pub use cli::CliMetadataProvider;

use async_trait::async_trait;

use crate::types::ItemStub;

/// Raw per-item metadata as reported by the provider, before normalization
///
/// Fields the provider cannot supply are empty strings; the fetcher decides
/// defaults and normalization when building a
/// [`VideoRecord`](crate::types::VideoRecord).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMetadata {
    /// Raw title (untrimmed)
    pub title: String,
    /// Description text
    pub description: String,
    /// Channel / uploader name
    pub channel: String,
    /// Raw upload date, typically `YYYYMMDD`
    pub upload_date: String,
    /// Canonical item URL ("" when the provider did not report one)
    pub url: String,
}

/// Capability interface over the external metadata provider
///
/// Implementations can drive an external binary, an HTTP API, or provide
/// scripted responses for tests.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Flat resolution: obtain the playlist's item identifiers and count
    /// without fetching each item's full metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved. An empty item
    /// list is not an error at this layer; the resolver treats it as fatal.
    async fn resolve_flat(&self, reference: &str) -> crate::Result<Vec<ItemStub>>;

    /// Fetch full metadata for a single item
    ///
    /// # Errors
    ///
    /// Returns an error if the item's metadata cannot be fetched. Callers
    /// contain the failure; it never aborts the surrounding run.
    async fn fetch_item(&self, stub: &ItemStub) -> crate::Result<ItemMetadata>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
