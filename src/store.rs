//! Tabular export store — CSV persistence for extracted records.
//!
//! The store writes one row per [`VideoRecord`] under a fixed five-column
//! header. Append mode reads the prior export fully into memory and rewrites
//! the file in place; create mode writes a fresh file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::types::{ExportTarget, VideoRecord};

/// Column header of every export file, in order.
pub const EXPORT_COLUMNS: [&str; 5] = ["Title", "Description", "Channel", "Upload Date", "URL"];

/// Immutable snapshot of trimmed titles loaded from a prior export.
///
/// Captured once before a run starts and used only as the dedup oracle;
/// records kept during the run are never added to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExistingTitleSet {
    titles: HashSet<String>,
}

impl ExistingTitleSet {
    /// Whether the (already trimmed) title is present.
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    /// Number of distinct titles in the snapshot.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the snapshot holds no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl FromIterator<String> for ExistingTitleSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            titles: iter
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

/// Load the `Title` column of an existing export as a dedup snapshot.
///
/// Empty and whitespace-only values are dropped; the rest are trimmed.
/// Called once when switching into Append mode, not re-read per run. A
/// missing file or a file without a `Title` column is an error, and the
/// mode switch must not take effect.
pub fn load_existing_titles(path: &Path) -> std::result::Result<ExistingTitleSet, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::ReadExisting {
        path: path.to_path_buf(),
        source: e,
    })?;

    let headers = reader
        .headers()
        .map_err(|e| StoreError::ReadExisting {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();
    let title_idx = headers
        .iter()
        .position(|h| h == "Title")
        .ok_or_else(|| StoreError::MissingTitleColumn {
            path: path.to_path_buf(),
        })?;

    let mut titles = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StoreError::ReadExisting {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(title) = row.get(title_idx) {
            titles.push(title.to_string());
        }
    }

    let set: ExistingTitleSet = titles.into_iter().collect();
    tracing::info!(path = %path.display(), titles = set.len(), "Loaded existing titles");
    Ok(set)
}

/// Write a fresh export file containing exactly the kept records.
///
/// Rows are written in insertion order under [`EXPORT_COLUMNS`].
pub fn write_create(
    path: &Path,
    records: &[VideoRecord],
) -> std::result::Result<(), StoreError> {
    let write_err = |e: csv::Error| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(EXPORT_COLUMNS).map_err(write_err)?;
    for record in records {
        write_row(&mut writer, record).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;

    tracing::info!(path = %path.display(), rows = records.len(), "Export written");
    Ok(())
}

/// Merge records into an existing export and rewrite it in place.
///
/// The whole prior file is read into memory first; the rewrite then emits
/// the existing rows in their original order followed by the new records.
/// Not transactional: a failure mid-write can leave the file truncated or
/// inconsistent with either the old or new content.
pub fn write_append(
    path: &Path,
    records: &[VideoRecord],
) -> std::result::Result<(), StoreError> {
    let read_err = |e: csv::Error| StoreError::ReadExisting {
        path: path.to_path_buf(),
        source: e,
    };
    let write_err = |e: csv::Error| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    // Read the prior rows fully before the destination is touched
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let mut existing_rows = Vec::new();
    for row in reader.records() {
        existing_rows.push(row.map_err(read_err)?);
    }
    drop(reader);

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(EXPORT_COLUMNS).map_err(write_err)?;
    for row in &existing_rows {
        writer.write_record(row).map_err(write_err)?;
    }
    for record in records {
        write_row(&mut writer, record).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;

    tracing::info!(
        path = %path.display(),
        prior_rows = existing_rows.len(),
        appended = records.len(),
        "Export rewritten with appended rows"
    );
    Ok(())
}

/// Persist the kept records to the target, returning the destination path.
pub(crate) fn write_records(
    target: &ExportTarget,
    records: &[VideoRecord],
) -> std::result::Result<PathBuf, StoreError> {
    match target {
        ExportTarget::Create { path } => write_create(path, records)?,
        ExportTarget::Append { path, .. } => write_append(path, records)?,
    }
    Ok(target.path().to_path_buf())
}

fn write_row(
    writer: &mut csv::Writer<std::fs::File>,
    record: &VideoRecord,
) -> std::result::Result<(), csv::Error> {
    writer.write_record([
        record.title.as_str(),
        record.description.as_str(),
        record.channel.as_str(),
        record.upload_date.as_str(),
        record.url.as_str(),
    ])
}
