//! JSON output: pretty-printed, UTF-8, written atomically.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use imsakia_shared::{DayRecord, ImsakiaError, Result};

/// What was written to the destination.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Size of the JSON document in bytes.
    pub bytes: usize,
    /// Hex SHA-256 of the JSON document.
    pub sha256: String,
}

/// Render records as a 2-space indented JSON array with literal non-ASCII text.
pub fn render_json(records: &[DayRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| ImsakiaError::Serialize(format!("JSON serialization failed: {e}")))
}

/// Write `records` to `dest` as a JSON array, replacing any existing file.
///
/// The document goes to `.<name>.tmp` next to `dest` first and is then renamed
/// over it. The destination directory must already exist.
#[instrument(skip_all, fields(dest = %dest.display(), records = records.len()))]
pub fn write_records(dest: &Path, records: &[DayRecord]) -> Result<WriteSummary> {
    let json = render_json(records)?;
    replace_via_temp(dest, |temp| std::fs::write(temp, &json))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(size = json.len(), %sha256, "wrote JSON file");

    Ok(WriteSummary {
        bytes: json.len(),
        sha256,
    })
}

/// Run `write` against the temp sibling of `dest`, then rename it into place.
/// The temp file is removed if either step fails.
fn replace_via_temp<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    let temp = temp_path(dest);
    let outcome = write(&temp).and_then(|()| std::fs::rename(&temp, dest));
    if let Err(e) = outcome {
        std::fs::remove_file(&temp).ok();
        return Err(ImsakiaError::destination(dest, e));
    }
    Ok(())
}

/// Hidden sibling of `dest` used while writing.
fn temp_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.json".to_string());
    dest.with_file_name(format!(".{name}.tmp"))
}
