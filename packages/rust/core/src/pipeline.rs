//! End-to-end `convert` pipeline: workbook → rows → records → JSON file.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use imsakia_shared::{ConvertConfig, Result};

use crate::extract::extract_records;
use crate::normalize::normalize_record;
use crate::workbook::open_first_sheet;
use crate::writer::write_records;

/// Result of the `convert` pipeline.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Number of records written.
    pub count: usize,
    /// Data rows skipped as blank.
    pub skipped: usize,
    /// Values rewritten by normalization (0 when disabled).
    pub normalized: usize,
    /// Where the JSON was written.
    pub dest_path: PathBuf,
    /// Size of the JSON document in bytes.
    pub bytes: usize,
    /// Hex SHA-256 of the JSON document.
    pub sha256: String,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each record is built.
    fn record_extracted(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &ConvertResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_extracted(&self, _current: usize, _total: usize) {}
    fn done(&self, _result: &ConvertResult) {}
}

/// Run the full conversion.
///
/// 1. Open the workbook and select its first sheet
/// 2. Extract one record per non-blank data row
/// 3. Normalize times and dates (if enabled)
/// 4. Write the JSON array to the destination
///
/// Nothing is written unless every earlier step succeeded.
#[instrument(skip_all, fields(source = %config.source_path.display(), dest = %config.dest_path.display()))]
pub fn convert(config: &ConvertConfig, progress: &dyn ProgressReporter) -> Result<ConvertResult> {
    let start = Instant::now();

    progress.phase("Opening workbook");
    let range = open_first_sheet(&config.source_path)?;

    progress.phase("Reading rows");
    let extraction = extract_records(&range)?;
    let mut records = extraction.records;
    let total = records.len();

    let mut normalized = 0;
    for (i, record) in records.iter_mut().enumerate() {
        if config.normalize {
            normalized += normalize_record(record);
        }
        progress.record_extracted(i + 1, total);
    }

    progress.phase("Writing JSON");
    let summary = write_records(&config.dest_path, &records)?;

    let result = ConvertResult {
        count: records.len(),
        skipped: extraction.skipped,
        normalized,
        dest_path: config.dest_path.clone(),
        bytes: summary.bytes,
        sha256: summary.sha256,
        elapsed: start.elapsed(),
    };

    info!(
        count = result.count,
        skipped = result.skipped,
        normalized = result.normalized,
        bytes = result.bytes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "conversion complete"
    );

    progress.done(&result);
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
