//! Configuration types for playlist-export

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fetch behavior configuration (timeouts, event buffering)
///
/// Groups settings related to how per-item metadata is fetched and how
/// progress events are delivered. Used as a nested sub-config within
/// [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-item fetch timeout in seconds (None = no timeout)
    ///
    /// When set, a fetch that exceeds the timeout is recorded as a skipped
    /// item, exactly like any other per-item failure. Does not affect the
    /// run's observable contracts beyond how the failure is produced.
    #[serde(default)]
    pub item_timeout_secs: Option<u64>,

    /// Event broadcast channel capacity (default: 1000)
    ///
    /// Subscribers that fall further behind than this receive a lagged error
    /// from the broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            item_timeout_secs: None,
            event_buffer: default_event_buffer(),
        }
    }
}

/// External tool paths for the metadata provider
///
/// Groups settings for locating the external extractor binary.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for the extractor binary if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`PlaylistExtractor`](crate::PlaylistExtractor)
///
/// Fields are organized into logical sub-configs:
/// - [`fetch`](FetchConfig) — per-item timeout, event buffering
/// - [`tools`](ToolsConfig) — external extractor binary discovery
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays flat (no nesting).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fetch behavior settings
    #[serde(flatten)]
    pub fetch: FetchConfig,

    /// External tool paths
    #[serde(flatten)]
    pub tools: ToolsConfig,
}

fn default_event_buffer() -> usize {
    1000
}

fn default_true() -> bool {
    true
}
