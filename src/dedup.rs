//! Duplicate detection against a previously exported record set.

use crate::store::ExistingTitleSet;
use crate::types::{ExportMode, VideoRecord};

/// Decide whether a fetched record should be kept.
///
/// In Append mode with a pre-loaded title snapshot, a record is discarded
/// when its trimmed title is already present (exact, case-sensitive match).
/// Without a snapshot, or in Create mode, every record is kept.
///
/// Pure and deterministic; the snapshot is never mutated, so a title kept
/// earlier in the same run does not suppress a later identical title.
pub(crate) fn should_keep(
    record: &VideoRecord,
    mode: ExportMode,
    existing: Option<&ExistingTitleSet>,
) -> bool {
    match (mode, existing) {
        (ExportMode::Append, Some(titles)) => !titles.contains(record.title.trim()),
        _ => true,
    }
}
