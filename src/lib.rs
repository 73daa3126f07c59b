//! # playlist-export
//!
//! Backend library for exporting playlist metadata to tabular files.
//!
//! ## Design Philosophy
//!
//! playlist-export is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Fault-tolerant** - A failed item never aborts the run
//! - **Cancellable** - Runs stop cooperatively between items
//!
//! A run resolves a playlist reference into its item list, fetches metadata
//! for each item strictly in order, optionally skips titles already present
//! in a prior export, and writes the kept records to a CSV file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use playlist_export::{Config, ExportTarget, PlaylistExtractor, RunRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Locates the yt-dlp binary on PATH
//!     let extractor = PlaylistExtractor::with_discovered_provider(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = extractor.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let handle = extractor.start_run(RunRequest {
//!         reference: "https://www.youtube.com/playlist?list=PL123".to_string(),
//!         target: ExportTarget::Create {
//!             path: "videos.csv".into(),
//!         },
//!     });
//!     let outcome = handle.wait().await;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Run orchestration (decomposed into focused submodules)
pub mod extractor;
/// Per-item metadata fetching and field normalization
pub mod fetcher;
/// Metadata provider capability and its yt-dlp implementation
pub mod provider;
/// Tabular export persistence
pub mod store;
/// Core types and events
pub mod types;

mod dedup;
mod resolver;

// Re-export commonly used types
pub use config::{Config, FetchConfig, ToolsConfig};
pub use error::{Error, FetchError, ResolutionError, Result, StoreError};
pub use extractor::{PlaylistExtractor, RunHandle};
pub use fetcher::normalize_upload_date;
pub use provider::{CliMetadataProvider, ItemMetadata, MetadataProvider};
pub use store::{load_existing_titles, ExistingTitleSet, EXPORT_COLUMNS};
pub use types::{
    Event, ExportMode, ExportTarget, ItemStub, RunOutcome, RunRequest, RunStatus, RunSummary,
    VideoRecord,
};
