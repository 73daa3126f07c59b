//! Run orchestration split into focused submodules.
//!
//! - `handle` — per-run cancellation and outcome handle
//! - `run_task` — the sequential fetch loop and terminal outcome

mod handle;
mod run_task;


pub use handle::RunHandle;

use std::sync::Arc;
use std::sync::atomic::AtomicU8;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::{CliMetadataProvider, MetadataProvider};
use crate::types::{Event, RunRequest, RunStatus};

/// Main extraction orchestrator (cloneable — all fields are Arc-wrapped).
///
/// Owns the event broadcast channel and spawns one worker task per run.
/// The worker performs the entire resolve→fetch→dedup→accumulate loop;
/// the caller observes progress through [`subscribe`](Self::subscribe) and
/// controls the run through the returned [`RunHandle`].
#[derive(Clone)]
pub struct PlaylistExtractor {
    /// Configuration (wrapped in Arc for sharing across run tasks)
    config: Arc<Config>,
    /// Metadata provider capability (trait object for pluggable implementations)
    provider: Arc<dyn MetadataProvider>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl PlaylistExtractor {
    /// Create an extractor with an explicit metadata provider.
    pub fn new(config: Config, provider: Arc<dyn MetadataProvider>) -> Self {
        let (event_tx, _rx) = tokio::sync::broadcast::channel(config.fetch.event_buffer.max(1));
        tracing::info!(provider = provider.name(), "Extractor initialized");
        Self {
            config: Arc::new(config),
            provider,
            event_tx,
        }
    }

    /// Create an extractor backed by the external yt-dlp binary.
    ///
    /// Uses the configured binary path, or searches PATH when none is set.
    ///
    /// # Errors
    ///
    /// Returns an error when no extractor binary can be located.
    pub fn with_discovered_provider(config: Config) -> Result<Self> {
        let provider = CliMetadataProvider::from_config(&config.tools).ok_or_else(|| {
            Error::ExternalTool("yt-dlp binary not found (set ytdlp_path or install it)".to_string())
        })?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    /// Subscribe to run events.
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. A subscriber that falls behind the configured buffer
    /// receives a lagged error from the broadcast channel.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration.
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Start one extraction run on a background worker task.
    ///
    /// Each run owns its cancellation token and run state; the returned
    /// handle is the only way to signal cancellation and await the outcome.
    /// Must be called within a Tokio runtime.
    pub fn start_run(&self, request: RunRequest) -> RunHandle {
        let cancel_token = tokio_util::sync::CancellationToken::new();
        // Published as Running before the worker is spawned, so a cancel()
        // issued before the worker is first scheduled still transitions to
        // Cancelling
        let status = Arc::new(AtomicU8::new(RunStatus::Running.to_u8()));

        let ctx = run_task::RunContext {
            request,
            provider: Arc::clone(&self.provider),
            config: Arc::clone(&self.config),
            event_tx: self.event_tx.clone(),
            cancel_token: cancel_token.clone(),
            status: Arc::clone(&status),
        };
        let join = tokio::spawn(run_task::run_extraction_task(ctx));

        RunHandle::new(cancel_token, status, join)
    }
}
