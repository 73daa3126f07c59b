//! Run task — the sequential resolve→fetch→dedup→accumulate loop and its
//! terminal outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio_util::sync::CancellationToken;

use crate::dedup;
use crate::fetcher::ItemFetcher;
use crate::provider::MetadataProvider;
use crate::resolver;
use crate::store;
use crate::types::{Event, RunOutcome, RunRequest, RunStatus, RunSummary, VideoRecord};

/// Shared context for a single run task.
pub(crate) struct RunContext {
    pub(crate) request: RunRequest,
    pub(crate) provider: Arc<dyn MetadataProvider>,
    pub(crate) config: Arc<crate::config::Config>,
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    pub(crate) cancel_token: CancellationToken,
    pub(crate) status: Arc<AtomicU8>,
}

impl RunContext {
    /// Emit an event; dropped silently when nobody is subscribed.
    fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    fn set_status(&self, status: RunStatus) {
        self.status.store(status.to_u8(), Ordering::SeqCst);
    }

    /// Mark the run failed, emit the failure event, and build the outcome.
    fn fail(&self, error: crate::Error) -> RunOutcome {
        tracing::error!(error = %error, "Run failed");
        self.emit(Event::RunFailed {
            error: error.to_string(),
        });
        self.set_status(RunStatus::Failed);
        RunOutcome::Failed(error)
    }
}

/// Mutable run state, owned exclusively by the run task and reset per run.
struct RunState {
    processed: usize,
    total: usize,
    kept: Vec<VideoRecord>,
    duplicates: usize,
    failures: usize,
}

/// Core run task — orchestrates the full lifecycle of one extraction run.
///
/// Phases:
/// 1. Resolve the playlist flatly so the total is known up front
/// 2. Fetch items one at a time, checking cancellation before each fetch
/// 3. Persist the kept records (or report nothing to save)
pub(crate) async fn run_extraction_task(ctx: RunContext) -> RunOutcome {
    // Status is already Running, stored by start_run before the spawn
    // Phase 1: flat resolution; any failure here is fatal before per-item work
    let stubs =
        match resolver::resolve_playlist(ctx.provider.as_ref(), &ctx.request.reference).await {
            Ok(stubs) => stubs,
            Err(e) => return ctx.fail(e.into()),
        };
    let total = stubs.len();
    ctx.emit(Event::RunStarted { total });

    let fetcher = ItemFetcher::new(
        Arc::clone(&ctx.provider),
        ctx.config.fetch.item_timeout_secs,
    );
    let mode = ctx.request.target.mode();
    let mut state = RunState {
        processed: 0,
        total,
        kept: Vec::new(),
        duplicates: 0,
        failures: 0,
    };

    // Phase 2: strictly sequential fetch loop, in playlist order
    for stub in &stubs {
        // Cooperative cancellation: checked once per iteration, never
        // preempting an in-flight fetch
        if ctx.cancel_token.is_cancelled() {
            tracing::info!(
                processed = state.processed,
                total,
                discarded = state.kept.len(),
                "Run cancelled; discarding fetched records"
            );
            ctx.emit(Event::Cancelled);
            ctx.set_status(RunStatus::Cancelled);
            // Kept records are dropped here; nothing is persisted
            return RunOutcome::Cancelled;
        }

        match fetcher.fetch_one(stub).await {
            Ok(record) => {
                if dedup::should_keep(&record, mode, ctx.request.target.existing_titles()) {
                    tracing::info!(
                        position = stub.position,
                        title = %record.title,
                        "Item fetched"
                    );
                    ctx.emit(Event::ItemFetched {
                        position: stub.position,
                        title: record.title.clone(),
                    });
                    state.kept.push(record);
                } else {
                    tracing::debug!(
                        position = stub.position,
                        title = %record.title,
                        "Title already in export; skipping"
                    );
                    state.duplicates += 1;
                    ctx.emit(Event::DuplicateSkipped {
                        position: stub.position,
                        title: record.title,
                    });
                }
            }
            Err(e) => {
                tracing::warn!(
                    position = stub.position,
                    item = %stub.id,
                    error = %e,
                    "Item fetch failed; skipping"
                );
                state.failures += 1;
                ctx.emit(Event::ItemFailed {
                    position: stub.position,
                    error: e.to_string(),
                });
            }
        }

        // Progress advances after every item regardless of fetch outcome
        state.processed += 1;
        let percent = (state.processed * 100 / total) as u32;
        ctx.emit(Event::Progress {
            processed: state.processed,
            total,
            percent,
            status_text: format!(
                "{}/{} processed ({}%)",
                state.processed, total, percent
            ),
        });
    }

    // Phase 3: persist the kept records
    if state.kept.is_empty() {
        tracing::info!(
            processed = state.processed,
            failures = state.failures,
            duplicates = state.duplicates,
            "Run complete with nothing to save"
        );
        ctx.emit(Event::NothingToSave);
        ctx.set_status(RunStatus::Completed);
        return RunOutcome::Completed(RunSummary {
            processed: state.processed,
            total: state.total,
            kept: state.kept,
            duplicates: state.duplicates,
            failures: state.failures,
            destination: None,
        });
    }

    let destination = match store::write_records(&ctx.request.target, &state.kept) {
        Ok(path) => path,
        Err(e) => return ctx.fail(e.into()),
    };

    tracing::info!(
        destination = %destination.display(),
        kept = state.kept.len(),
        failures = state.failures,
        duplicates = state.duplicates,
        "Run complete"
    );
    ctx.emit(Event::Completed {
        kept: state.kept.len(),
        destination: destination.clone(),
    });
    ctx.set_status(RunStatus::Completed);
    RunOutcome::Completed(RunSummary {
        processed: state.processed,
        total: state.total,
        kept: state.kept,
        duplicates: state.duplicates,
        failures: state.failures,
        destination: Some(destination),
    })
}
