//! Row extraction: project sheet rows onto [`DayRecord`]s.
//!
//! Rows and columns are addressed by absolute sheet position. Row 1 is the
//! header and never becomes a record; column A is position 0.

use calamine::{Data, Range};
use tracing::{debug, instrument, trace};

use imsakia_shared::{CellValue, DayRecord, ImsakiaError, Result};

/// Number of positional columns mapped onto a record.
pub const RECORD_WIDTH: usize = 9;

/// 0-based index of the first data row (row 2 of the sheet).
const FIRST_DATA_ROW: u32 = 1;

/// Records pulled from a sheet, in row order.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One record per non-blank data row.
    pub records: Vec<DayRecord>,
    /// Data rows skipped because their first cell was empty.
    pub skipped: usize,
}

/// Convert a calamine cell into a [`CellValue`].
///
/// Whole floats become integers, matching how spreadsheet tools surface
/// numeric day counters. Date/time serials are rendered as ISO-8601 text.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let rendered = dt.as_datetime().map(|ndt| {
                if dt.as_f64() < 1.0 {
                    ndt.format("%H:%M:%S").to_string()
                } else if ndt.time() == chrono::NaiveTime::MIN {
                    ndt.format("%Y-%m-%d").to_string()
                } else {
                    ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
                }
            });
            match rendered {
                Some(text) => CellValue::Text(text),
                None => float_value(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn float_value(f: f64) -> CellValue {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        CellValue::Integer(f as i64)
    } else {
        CellValue::Number(f)
    }
}

/// Extract one [`DayRecord`] per data row of `range`.
///
/// - the header row (sheet row 1) is skipped
/// - rows whose first cell is falsy are skipped
/// - a kept row narrower than [`RECORD_WIDTH`] columns is a
///   [`ImsakiaError::MalformedRow`]
#[instrument(skip_all, fields(start = ?range.start(), end = ?range.end()))]
pub fn extract_records(range: &Range<Data>) -> Result<Extraction> {
    let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        debug!("sheet is empty");
        return Ok(Extraction::default());
    };

    // Width counted from column A, like a row tuple starting at the first column.
    let width = end_col as usize + 1;
    let mut extraction = Extraction::default();

    for row in start_row.max(FIRST_DATA_ROW)..=end_row {
        let first = cell_at(range, row, 0);
        if first.is_falsy() {
            trace!(row = row + 1, "skipping blank row");
            extraction.skipped += 1;
            continue;
        }

        if width < RECORD_WIDTH {
            return Err(ImsakiaError::MalformedRow {
                row: row + 1,
                columns: width,
            });
        }

        let cells: [CellValue; RECORD_WIDTH] =
            std::array::from_fn(|col| cell_at(range, row, col as u32));
        extraction.records.push(DayRecord::from_cells(cells));
    }

    debug!(
        records = extraction.records.len(),
        skipped = extraction.skipped,
        "rows extracted"
    );

    Ok(extraction)
}

/// Value at an absolute sheet position; positions outside the range are empty.
fn cell_at(range: &Range<Data>, row: u32, col: u32) -> CellValue {
    range
        .get_value((row, col))
        .map(cell_value)
        .unwrap_or(CellValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 9] = [
        "اليوم", "رمضان", "التاريخ", "الفجر", "الشروق", "الظهر", "العصر", "المغرب", "العشاء",
    ];

    fn header_range(last_row: u32) -> Range<Data> {
        let mut range = Range::new((0, 0), (last_row, 8));
        for (col, title) in HEADER.iter().enumerate() {
            range.set_value((0, col as u32), Data::String((*title).into()));
        }
        range
    }

    fn set_row(range: &mut Range<Data>, row: u32, day: &str, ordinal: f64, date: &str) {
        range.set_value((row, 0), Data::String(day.into()));
        range.set_value((row, 1), Data::Float(ordinal));
        range.set_value((row, 2), Data::String(date.into()));
        let times = ["05:15 ص", "06:40 ص", "12:10 م", "15:30 م", "17:45 م", "19:05 م"];
        for (i, t) in times.iter().enumerate() {
            range.set_value((row, 3 + i as u32), Data::String((*t).into()));
        }
    }

    #[test]
    fn maps_columns_by_position() {
        let mut range = header_range(1);
        set_row(&mut range, 1, "الأربعاء", 1.0, "18 فبراير، 2026");

        let extraction = extract_records(&range).expect("extract");
        assert_eq!(extraction.records.len(), 1);

        let record = &extraction.records[0];
        assert_eq!(record.day_name, CellValue::Text("الأربعاء".into()));
        assert_eq!(record.ramadan_date, CellValue::Integer(1));
        assert_eq!(record.gregorian_date, CellValue::Text("18 فبراير، 2026".into()));
        assert_eq!(record.fajr, CellValue::Text("05:15 ص".into()));
        assert_eq!(record.sunrise, CellValue::Text("06:40 ص".into()));
        assert_eq!(record.dhuhr, CellValue::Text("12:10 م".into()));
        assert_eq!(record.asr, CellValue::Text("15:30 م".into()));
        assert_eq!(record.maghrib, CellValue::Text("17:45 م".into()));
        assert_eq!(record.isha, CellValue::Text("19:05 م".into()));
    }

    #[test]
    fn header_only_yields_nothing() {
        let range = header_range(0);
        let extraction = extract_records(&range).expect("extract");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let range: Range<Data> = Range::empty();
        let extraction = extract_records(&range).expect("extract");
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn blank_rows_are_skipped_without_shifting() {
        let mut range = header_range(4);
        set_row(&mut range, 1, "الأربعاء", 1.0, "18 فبراير، 2026");
        // row 3 left blank
        set_row(&mut range, 3, "الخميس", 2.0, "19 فبراير، 2026");
        // row 5 has trailing data but no day name
        range.set_value((4, 3), Data::String("05:13 ص".into()));

        let extraction = extract_records(&range).expect("extract");
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.skipped, 2);
        assert_eq!(extraction.records[0].ramadan_date, CellValue::Integer(1));
        assert_eq!(extraction.records[1].day_name, CellValue::Text("الخميس".into()));
        assert_eq!(extraction.records[1].ramadan_date, CellValue::Integer(2));
    }

    #[test]
    fn preserves_row_order() {
        let days = ["الأربعاء", "الخميس", "الجمعة", "السبت"];
        let mut range = header_range(days.len() as u32);
        for (i, day) in days.iter().enumerate() {
            set_row(&mut range, i as u32 + 1, day, (i + 1) as f64, "x");
        }

        let extraction = extract_records(&range).expect("extract");
        let names: Vec<String> = extraction
            .records
            .iter()
            .map(|r| r.day_name.as_text())
            .collect();
        assert_eq!(names, days);
    }

    #[test]
    fn zero_first_cell_is_skipped() {
        let mut range = header_range(1);
        range.set_value((1, 0), Data::Float(0.0));
        range.set_value((1, 1), Data::Float(1.0));

        let extraction = extract_records(&range).expect("extract");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn header_is_skipped_even_when_range_starts_lower() {
        // Row 1 is empty, so the used range already starts on data.
        let mut range = Range::new((1, 0), (2, 8));
        range.set_value((1, 0), Data::String("الأربعاء".into()));
        range.set_value((2, 0), Data::String("الخميس".into()));

        let extraction = extract_records(&range).expect("extract");
        assert_eq!(extraction.records.len(), 2);
    }

    #[test]
    fn columns_are_absolute_from_column_a() {
        // Used range begins at column B: column A is empty for every row.
        let mut range = Range::new((0, 1), (1, 9));
        range.set_value((1, 1), Data::Float(1.0));
        range.set_value((1, 9), Data::String("ignored".into()));

        let extraction = extract_records(&range).expect("extract");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut range = Range::new((0, 0), (1, 11));
        range.set_value((1, 0), Data::String("الجمعة".into()));
        range.set_value((1, 8), Data::String("19:06 م".into()));
        range.set_value((1, 11), Data::String("note".into()));

        let extraction = extract_records(&range).expect("extract");
        let record = &extraction.records[0];
        assert_eq!(record.isha, CellValue::Text("19:06 م".into()));
        assert_eq!(record.fajr, CellValue::Null);
    }

    #[test]
    fn short_rows_are_malformed() {
        let mut range = Range::new((0, 0), (2, 5));
        range.set_value((0, 0), Data::String("اليوم".into()));
        range.set_value((2, 0), Data::String("الأربعاء".into()));

        let err = extract_records(&range).unwrap_err();
        match err {
            ImsakiaError::MalformedRow { row, columns } => {
                assert_eq!(row, 3);
                assert_eq!(columns, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_sheet_with_only_blank_rows_is_fine() {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("اليوم".into()));

        let extraction = extract_records(&range).expect("extract");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 3);
    }

    #[test]
    fn cell_value_conversions() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Null);
        assert_eq!(cell_value(&Data::Float(30.0)), CellValue::Integer(30));
        assert_eq!(cell_value(&Data::Float(1.25)), CellValue::Number(1.25));
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Integer(7));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            cell_value(&Data::DateTimeIso("2026-02-18".into())),
            CellValue::Text("2026-02-18".into())
        );
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Text("#DIV/0!".into())
        );
    }
}
