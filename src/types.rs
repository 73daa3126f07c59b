//! Core types for playlist-export

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::ExistingTitleSet;

/// Minimal per-item handle obtained by flat resolution, before the full
/// metadata fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStub {
    /// Provider-scoped item identifier
    pub id: String,
    /// Zero-based position within the playlist
    pub position: usize,
}

/// Fully fetched metadata for one playlist item
///
/// Created only on a successful fetch and immutable afterwards. The title is
/// trimmed at construction; it is the dedup key for Append-mode exports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Item title, trimmed of surrounding whitespace
    pub title: String,
    /// Item description (may be empty)
    pub description: String,
    /// Channel / uploader name (may be empty)
    pub channel: String,
    /// Upload date, normalized to `DD-MM-YYYY` when the raw value was an
    /// 8-character `YYYYMMDD` string; otherwise the raw value unchanged
    pub upload_date: String,
    /// Canonical item URL
    pub url: String,
}

/// Export mode selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Write a fresh export file
    Create,
    /// Merge into an existing export file, deduplicating by title
    Append,
}

/// Destination for the run's persisted records
#[derive(Clone, Debug)]
pub enum ExportTarget {
    /// Write a new file at `path` containing exactly the kept records
    Create {
        /// Destination path for the fresh export
        path: PathBuf,
    },
    /// Rewrite the file at `path` with its existing rows followed by the
    /// kept records, skipping records whose trimmed title is already in
    /// `existing`
    Append {
        /// Path of the prior export to merge into
        path: PathBuf,
        /// Title snapshot loaded from the prior export before the run started
        existing: ExistingTitleSet,
    },
}

impl ExportTarget {
    /// The export mode this target selects
    pub fn mode(&self) -> ExportMode {
        match self {
            ExportTarget::Create { .. } => ExportMode::Create,
            ExportTarget::Append { .. } => ExportMode::Append,
        }
    }

    /// The destination path
    pub fn path(&self) -> &std::path::Path {
        match self {
            ExportTarget::Create { path } | ExportTarget::Append { path, .. } => path,
        }
    }

    /// The pre-run title snapshot, if this is an Append target
    pub fn existing_titles(&self) -> Option<&ExistingTitleSet> {
        match self {
            ExportTarget::Create { .. } => None,
            ExportTarget::Append { existing, .. } => Some(existing),
        }
    }
}

/// Everything needed to start one extraction run
#[derive(Clone, Debug)]
pub struct RunRequest {
    /// The playlist reference (URL or identifier) to resolve
    pub reference: String,
    /// Where and how to persist the kept records
    pub target: ExportTarget,
}

/// Run lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// No run started yet
    Idle,
    /// The fetch loop is executing
    Running,
    /// Cancellation was signalled but not yet observed by the loop
    Cancelling,
    /// All items processed; export finished (or nothing to save)
    Completed,
    /// The loop stopped at a cancellation check; kept records were discarded
    Cancelled,
    /// Resolution, loop, or export failed
    Failed,
}

impl RunStatus {
    /// Convert integer status code to RunStatus
    pub fn from_u8(status: u8) -> Self {
        match status {
            0 => RunStatus::Idle,
            1 => RunStatus::Running,
            2 => RunStatus::Cancelling,
            3 => RunStatus::Completed,
            4 => RunStatus::Cancelled,
            _ => RunStatus::Failed,
        }
    }

    /// Convert RunStatus to integer status code
    pub fn to_u8(self) -> u8 {
        match self {
            RunStatus::Idle => 0,
            RunStatus::Running => 1,
            RunStatus::Cancelling => 2,
            RunStatus::Completed => 3,
            RunStatus::Cancelled => 4,
            RunStatus::Failed => 5,
        }
    }

    /// Terminal status text suitable for a progress label
    pub fn status_text(self) -> &'static str {
        match self {
            RunStatus::Idle => "",
            RunStatus::Running | RunStatus::Cancelling => "Processing...",
            RunStatus::Completed => "Done.",
            RunStatus::Cancelled => "Cancelled.",
            RunStatus::Failed => "Failed.",
        }
    }

    /// Whether this status is final for the run
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Cancelled | RunStatus::Failed
        )
    }
}

/// Event emitted during the run lifecycle
///
/// Events are delivered in order on a broadcast channel; one `Progress`
/// event is emitted per processed item regardless of fetch outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Resolution succeeded; the fetch loop is starting
    RunStarted {
        /// Number of items the playlist resolved to
        total: usize,
    },

    /// An item finished processing (fetched, skipped, or failed)
    Progress {
        /// Items processed so far (1-based, monotonic, bounded by `total`)
        processed: usize,
        /// Total items in the playlist
        total: usize,
        /// Completion percentage, truncated to a whole number
        percent: u32,
        /// Display text in the form `"{processed}/{total} processed ({percent}%)"`
        status_text: String,
    },

    /// An item's metadata was fetched and kept
    ItemFetched {
        /// Zero-based playlist position
        position: usize,
        /// Trimmed item title
        title: String,
    },

    /// An item's fetch failed; the item was skipped
    ItemFailed {
        /// Zero-based playlist position
        position: usize,
        /// Failure detail
        error: String,
    },

    /// A fetched item duplicated an existing title and was discarded
    DuplicateSkipped {
        /// Zero-based playlist position
        position: usize,
        /// Trimmed item title that was already present
        title: String,
    },

    /// The run completed but kept no records; nothing was written
    NothingToSave,

    /// The run completed and records were persisted
    Completed {
        /// Number of records written
        kept: usize,
        /// Destination path of the export
        destination: PathBuf,
    },

    /// The run observed cancellation and discarded all kept records
    Cancelled,

    /// The run failed (resolution, loop, or export error)
    RunFailed {
        /// Error message
        error: String,
    },
}

/// Terminal result of one extraction run
#[derive(Debug)]
pub enum RunOutcome {
    /// All items processed without cancellation
    Completed(RunSummary),
    /// Cancellation was observed; nothing was persisted
    Cancelled,
    /// Resolution, loop, or export error
    Failed(crate::Error),
}

/// Summary of a completed run
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Items processed (equals the playlist total on completion)
    pub processed: usize,
    /// Total items in the playlist
    pub total: usize,
    /// Records fetched and kept, in playlist order
    pub kept: Vec<VideoRecord>,
    /// Items discarded as duplicates of existing titles
    pub duplicates: usize,
    /// Items skipped because their fetch failed
    pub failures: usize,
    /// Export destination (None when nothing was kept and nothing written)
    pub destination: Option<PathBuf>,
}
