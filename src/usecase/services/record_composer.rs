use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::entities::cell::{CellValue, RawRow};
use crate::domain::entities::record::Record;

/// A row needs strictly more non-empty cells than this to be kept.
pub const ROW_VALIDITY_THRESHOLD: usize = 5;

/// Placeholder for positions the row has no value for.
pub const MISSING_VALUE: &str = "-";

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("Hardcode regex pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("Hardcode regex pattern"));

/// Reduces a raw header to a record key: drops punctuation and whitespace and
/// lower-cases the rest. Distinct headers can collapse to the same key
/// ("Qty (units)" and "qty-units" both give "qtyunits").
pub fn normalize_header(header: &str) -> String {
    let words = NON_WORD.replace_all(header, "");
    WHITESPACE.replace_all(&words, "").to_lowercase()
}

/// String form of a cell with the first comma turned into a period
/// ("12,5" -> "12.5"). Later commas are left alone.
pub fn sanitize_value(value: &CellValue) -> String {
    if value.is_absent() {
        return MISSING_VALUE.to_string();
    }
    value.to_string().replacen(',', ".", 1)
}

/// Holes do not count as cells; explicit empty strings count as empty.
pub fn is_row_valid(row: &[CellValue]) -> bool {
    row.iter()
        .filter(|cell| !cell.is_absent() && !cell.is_empty_text())
        .count()
        > ROW_VALIDITY_THRESHOLD
}

/// Turns raw data rows into records keyed by the normalized header row.
///
/// Headers stay at their column position; a position without a header
/// contributes nothing to the record.
#[derive(Debug, Clone)]
pub struct RecordComposer {
    headers: Vec<Option<String>>,
}

impl RecordComposer {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: headers.into_iter().map(Some).collect(),
        }
    }

    /// Headers read from the first row of a region. Holes leave their
    /// position unlabelled; the row ends at its last present cell.
    pub fn from_header_row(row: &[CellValue]) -> Self {
        let mut headers: Vec<Option<String>> = row
            .iter()
            .map(|cell| (!cell.is_absent()).then(|| cell.to_string()))
            .collect();
        while headers.last().is_some_and(Option::is_none) {
            headers.pop();
        }
        Self { headers }
    }

    /// Present headers in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().flatten().map(String::as_str)
    }

    /// One entry per header, in header order. Row values past the last
    /// header or under an unlabelled position are ignored; headers past the
    /// end of the row get the placeholder.
    pub fn to_record(&self, row: &[CellValue]) -> Record {
        let mut record = Record::new();
        for (index, header) in self.headers.iter().enumerate() {
            let Some(header) = header else {
                continue;
            };
            let value = row.get(index).unwrap_or(&CellValue::Absent);
            record.insert(normalize_header(header), sanitize_value(value));
        }
        record
    }

    pub fn compose(&self, rows: &[RawRow]) -> Vec<Record> {
        let records: Vec<Record> = rows
            .iter()
            .filter(|row| is_row_valid(row))
            .map(|row| self.to_record(row))
            .collect();

        debug!(
            rows = rows.len(),
            records = records.len(),
            dropped = rows.len() - records.len(),
            "composed records"
        );

        records
    }
}
