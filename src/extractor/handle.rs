//! Run handle — cancellation signal, status observation, outcome await.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio_util::sync::CancellationToken;

use crate::types::{RunOutcome, RunStatus};

/// Handle to one in-flight extraction run.
///
/// The handle is the single writer of the cancellation signal; the run task
/// is its single reader and checks it once per loop iteration. Cancellation
/// is cooperative — an in-flight fetch is never interrupted.
pub struct RunHandle {
    cancel_token: CancellationToken,
    status: Arc<AtomicU8>,
    join: tokio::task::JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub(crate) fn new(
        cancel_token: CancellationToken,
        status: Arc<AtomicU8>,
        join: tokio::task::JoinHandle<RunOutcome>,
    ) -> Self {
        Self {
            cancel_token,
            status,
            join,
        }
    }

    /// Signal cancellation.
    ///
    /// The run stops at its next per-item check and discards every record
    /// fetched so far; nothing is persisted. Idempotent.
    pub fn cancel(&self) {
        // Cancelling is observable until the worker reaches its next check
        let _ = self.status.compare_exchange(
            RunStatus::Running.to_u8(),
            RunStatus::Cancelling.to_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.cancel_token.cancel();
    }

    /// Current run status.
    pub fn status(&self) -> RunStatus {
        RunStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    /// Whether the run task has finished.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Await the run's terminal outcome.
    pub async fn wait(self) -> RunOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Failed(crate::Error::Other(format!("run task panicked: {e}"))),
        }
    }
}
