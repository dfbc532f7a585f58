use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::{debug, info};

use crate::domain::entities::address::{encode_cell, CellAddress, DIMENSION_KEY};
use crate::domain::entities::cell::{CellMap, CellValue};
use crate::domain::entities::region::Region;
use crate::usecase::ports::source::{SheetSource, SourceError};

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.to_string()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(v) => CellValue::Int(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Other(v.to_string()),
        Data::DateTimeIso(v) => CellValue::Other(v.to_string()),
        Data::DurationIso(v) => CellValue::Other(v.to_string()),
        Data::Error(v) => CellValue::Other(v.to_string()),
        Data::Empty => CellValue::Absent,
    }
}

/// One worksheet decoded by calamine.
pub struct CalamineSheet {
    name: String,
    range: Range<Data>,
}

impl CalamineSheet {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// Opens xlsx/xlsm/xlsb/xls/ods from disk and keeps one sheet: the named
    /// one, or the first.
    pub fn open(path: &Path, sheet: Option<&str>) -> Result<Self> {
        let workbook = open_workbook_auto(path).map_err(|err| SourceError::Open {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_workbook(workbook, sheet)
    }

    /// Same as [`CalamineSheet::open`] for a workbook already held in memory.
    pub fn from_bytes(bytes: Vec<u8>, sheet: Option<&str>) -> Result<Self> {
        let workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|err| SourceError::Open {
                path: "<memory>".to_string(),
                message: err.to_string(),
            })?;
        Self::from_workbook(workbook, sheet)
    }

    fn from_workbook<RS>(mut workbook: Sheets<RS>, sheet: Option<&str>) -> Result<Self>
    where
        RS: std::io::Read + std::io::Seek,
    {
        let sheet_names = workbook.sheet_names();
        let name = match sheet {
            Some(name) if sheet_names.iter().any(|candidate| candidate == name) => name.to_string(),
            Some(name) => return Err(SourceError::SheetNotFound(name.to_string()).into()),
            None => sheet_names.first().cloned().ok_or(SourceError::NoSheets)?,
        };

        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet: {name}"))?;
        info!(sheet = %name, sheets = sheet_names.len(), "loaded worksheet");

        Ok(Self::new(name, range))
    }
}

impl SheetSource for CalamineSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_map(&self) -> CellMap {
        let mut cells = CellMap::new();
        let Some((start_row, start_col)) = self.range.start() else {
            return cells;
        };

        for (row, col, data) in self.range.used_cells() {
            let address = CellAddress::new(start_row + row as u32, start_col + col as u32);
            cells.insert(encode_cell(address), cell_to_value(data));
        }

        if let Some(end) = self.range.end() {
            let declared = Region::spanning(
                CellAddress::new(start_row, start_col),
                CellAddress::new(end.0, end.1),
            );
            cells.insert(DIMENSION_KEY.to_string(), CellValue::Other(declared.to_range_string()));
        }

        debug!(sheet = %self.name, entries = cells.len(), "built sparse cell map");
        cells
    }

    fn value_at(&self, address: CellAddress) -> CellValue {
        self.range
            .get_value((address.row, address.col))
            .map(cell_to_value)
            .unwrap_or_default()
    }
}
