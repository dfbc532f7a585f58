use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::domain::entities::address::{encode_cell, CellAddress, DIMENSION_KEY};
use crate::domain::entities::cell::{CellMap, CellValue};
use crate::domain::entities::region::Region;
use crate::usecase::ports::source::SheetSource;

/// A delimited text file read as a single sheet. Every field is text; empty
/// fields are holes.
pub struct CsvSheet {
    name: String,
    records: Vec<StringRecord>,
}

impl CsvSheet {
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("failed to open csv: {}", path.display()))?;

        let records = reader
            .records()
            .collect::<csv::Result<Vec<_>>>()
            .with_context(|| format!("failed to parse csv records: {}", path.display()))?;

        let name = path
            .file_stem()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("sheet")
            .to_string();
        info!(sheet = %name, records = records.len(), "loaded csv");

        Ok(Self { name, records })
    }

    pub fn from_records(name: impl Into<String>, records: Vec<StringRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

impl SheetSource for CsvSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_map(&self) -> CellMap {
        let mut cells = CellMap::new();
        let mut width = 0;

        for (row, record) in self.records.iter().enumerate() {
            width = width.max(record.len());
            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                let address = CellAddress::new(row as u32, col as u32);
                cells.insert(encode_cell(address), CellValue::from(field));
            }
        }

        if !self.records.is_empty() && width > 0 {
            let declared = Region::spanning(
                CellAddress::new(0, 0),
                CellAddress::new(self.records.len() as u32 - 1, width as u32 - 1),
            );
            cells.insert(DIMENSION_KEY.to_string(), CellValue::Other(declared.to_range_string()));
        }

        debug!(sheet = %self.name, entries = cells.len(), "built sparse cell map");
        cells
    }

    fn value_at(&self, address: CellAddress) -> CellValue {
        self.records
            .get(address.row as usize)
            .and_then(|record| record.get(address.col as usize))
            .filter(|field| !field.is_empty())
            .map(CellValue::from)
            .unwrap_or_default()
    }
}
