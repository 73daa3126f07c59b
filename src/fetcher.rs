//! Per-item metadata fetching — one provider call per item, failures contained.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::provider::MetadataProvider;
use crate::types::{ItemStub, VideoRecord};

/// Fetches one item's full metadata at a time.
///
/// Each call is independent: a failure is returned to the caller as a
/// [`FetchError`] and never aborts the surrounding run. No retries — under a
/// flaky source the run favors completion over per-item completeness.
pub(crate) struct ItemFetcher {
    provider: Arc<dyn MetadataProvider>,
    timeout: Option<Duration>,
}

impl ItemFetcher {
    pub(crate) fn new(provider: Arc<dyn MetadataProvider>, timeout_secs: Option<u64>) -> Self {
        Self {
            provider,
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }

    /// Fetch full metadata for one item and build its [`VideoRecord`].
    pub(crate) async fn fetch_one(
        &self,
        stub: &ItemStub,
    ) -> std::result::Result<VideoRecord, FetchError> {
        let fetch = self.provider.fetch_item(stub);
        let raw = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetch)
                .await
                .map_err(|_| FetchError::Timeout {
                    id: stub.id.clone(),
                    seconds: timeout.as_secs(),
                })?,
            None => fetch.await,
        }
        .map_err(|e| FetchError::Provider {
            id: stub.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(VideoRecord {
            title: raw.title.trim().to_string(),
            description: raw.description,
            channel: raw.channel,
            upload_date: normalize_upload_date(&raw.upload_date),
            url: raw.url,
        })
    }
}

/// Normalize a raw `YYYYMMDD` upload date to `DD-MM-YYYY`.
///
/// Any value that is not exactly 8 characters (including the empty string)
/// passes through unchanged. The rearrangement is purely positional, so an
/// 8-character value is reordered without digit validation; non-ASCII values
/// pass through untouched.
pub fn normalize_upload_date(raw: &str) -> String {
    if raw.len() == 8 && raw.is_ascii() {
        format!("{}-{}-{}", &raw[6..8], &raw[4..6], &raw[0..4])
    } else {
        raw.to_string()
    }
}
