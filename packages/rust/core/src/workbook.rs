//! Workbook access: open a spreadsheet and select its first sheet.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, instrument};

use imsakia_shared::{ImsakiaError, Result};

/// Open the workbook at `path` and return the used range of its first sheet.
///
/// The format is picked from the file extension (xlsx, xlsm, xlsb, xls, ods).
#[instrument(skip_all, fields(path = %path.display()))]
pub fn open_first_sheet(path: &Path) -> Result<Range<Data>> {
    if !path.exists() {
        return Err(ImsakiaError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ImsakiaError::SourceUnreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    debug!(sheets = sheet_names.len(), first = ?sheet_names.first(), "workbook opened");

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImsakiaError::NoSheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| ImsakiaError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        start = ?range.start(),
        end = ?range.end(),
        "first sheet loaded"
    );

    Ok(range)
}
