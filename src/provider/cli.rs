//! CLI-based metadata provider using the external yt-dlp binary

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

use super::{ItemMetadata, MetadataProvider};
use crate::types::ItemStub;

/// One line of `--flat-playlist --dump-json` output
#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
}

/// Full `--dump-json` output for a single item (only the fields we export)
#[derive(Debug, Deserialize)]
struct ItemJson {
    title: Option<String>,
    description: Option<String>,
    uploader: Option<String>,
    upload_date: Option<String>,
    webpage_url: Option<String>,
}

/// CLI-based metadata provider driving the external `yt-dlp` binary
///
/// Flat resolution runs `yt-dlp --flat-playlist --dump-json` so the item
/// count and identifiers are known before any expensive per-item fetch.
/// Each item fetch runs a separate `--dump-json` invocation against the
/// item's watch URL.
///
/// # Examples
///
/// ```no_run
/// use playlist_export::provider::CliMetadataProvider;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let provider = CliMetadataProvider::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let provider = CliMetadataProvider::from_path()
///     .expect("yt-dlp not found in PATH");
/// ```
pub struct CliMetadataProvider {
    binary_path: PathBuf,
}

impl CliMetadataProvider {
    /// Create a new CLI provider with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Uses the `which` crate to search the system PATH.
    /// Returns `None` if the binary is not found.
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }

    /// Resolve a provider from tool configuration
    ///
    /// An explicitly configured path wins; otherwise PATH is searched when
    /// `search_path` is enabled.
    pub fn from_config(tools: &crate::config::ToolsConfig) -> Option<Self> {
        if let Some(ref path) = tools.ytdlp_path {
            Some(Self::new(path.clone()))
        } else if tools.search_path {
            Self::from_path()
        } else {
            None
        }
    }

    /// Run the binary with the given arguments, returning stdout on success
    async fn run(&self, args: &[&str]) -> crate::Result<String> {
        let output = Command::new(&self.binary_path)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::Error::ExternalTool(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Canonical watch URL for an item identifier
    fn watch_url(&self, id: &str) -> crate::Result<url::Url> {
        url::Url::parse_with_params("https://www.youtube.com/watch", &[("v", id)])
            .map_err(|e| crate::Error::Other(format!("invalid item URL for '{}': {}", id, e)))
    }
}

#[async_trait]
impl MetadataProvider for CliMetadataProvider {
    async fn resolve_flat(&self, reference: &str) -> crate::Result<Vec<ItemStub>> {
        let stdout = self
            .run(&[
                "--flat-playlist",
                "--dump-json",
                "--skip-download",
                "--no-warnings",
                reference,
            ])
            .await?;

        let mut stubs = Vec::new();
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            let entry: FlatEntry = serde_json::from_str(line)?;
            // Entries without an id (deleted/private items) cannot be fetched
            if let Some(id) = entry.id {
                stubs.push(ItemStub {
                    id,
                    position: stubs.len(),
                });
            }
        }
        Ok(stubs)
    }

    async fn fetch_item(&self, stub: &ItemStub) -> crate::Result<ItemMetadata> {
        let watch_url = self.watch_url(&stub.id)?;
        let stdout = self
            .run(&[
                "--dump-json",
                "--skip-download",
                "--no-warnings",
                watch_url.as_str(),
            ])
            .await?;

        let line = stdout
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::ExternalTool(format!(
                    "yt-dlp produced no metadata for item '{}'",
                    stub.id
                ))
            })?;
        let item: ItemJson = serde_json::from_str(line)?;

        Ok(ItemMetadata {
            title: item.title.unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            channel: item.uploader.unwrap_or_default(),
            upload_date: item.upload_date.unwrap_or_default(),
            url: item
                .webpage_url
                .unwrap_or_else(|| watch_url.as_str().to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_consistency_with_which_crate() {
        let which_result = which::which("yt-dlp");
        let from_path_result = CliMetadataProvider::from_path();
        assert_eq!(
            which_result.is_ok(),
            from_path_result.is_some(),
            "from_path() should return Some if and only if which::which() succeeds"
        );
    }

    #[test]
    fn from_config_prefers_explicit_path() {
        let tools = crate::config::ToolsConfig {
            ytdlp_path: Some(PathBuf::from("/opt/yt-dlp")),
            search_path: true,
        };
        let provider = CliMetadataProvider::from_config(&tools).unwrap();
        assert_eq!(provider.binary_path, PathBuf::from("/opt/yt-dlp"));
    }

    #[test]
    fn from_config_returns_none_when_search_disabled_and_no_path() {
        let tools = crate::config::ToolsConfig {
            ytdlp_path: None,
            search_path: false,
        };
        assert!(CliMetadataProvider::from_config(&tools).is_none());
    }

    #[test]
    fn watch_url_encodes_item_id() {
        let provider = CliMetadataProvider::new(PathBuf::from("yt-dlp"));
        let url = provider.watch_url("abc 123").unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/watch?v=abc+123");
    }

    #[tokio::test]
    async fn resolve_flat_with_invalid_binary_path_is_external_tool_error() {
        let provider = CliMetadataProvider::new(PathBuf::from("/nonexistent/path/to/yt-dlp"));
        let result = provider.resolve_flat("https://example.com/playlist").await;
        match result {
            Err(crate::Error::ExternalTool(msg)) => {
                assert!(msg.contains("Failed to execute yt-dlp"));
            }
            other => panic!("Expected ExternalTool error, got: {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn fetch_item_with_invalid_binary_path_is_external_tool_error() {
        let provider = CliMetadataProvider::new(PathBuf::from("/nonexistent/path/to/yt-dlp"));
        let stub = ItemStub {
            id: "vid1".to_string(),
            position: 0,
        };
        let result = provider.fetch_item(&stub).await;
        assert!(matches!(result, Err(crate::Error::ExternalTool(_))));
    }
}
