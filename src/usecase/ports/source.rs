use thiserror::Error;

use crate::domain::entities::address::{decode_cell, CellAddress};
use crate::domain::entities::cell::{CellMap, CellValue, RawRow};
use crate::domain::entities::region::Region;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open workbook '{path}': {message}")]
    Open { path: String, message: String },

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("workbook has no sheets")]
    NoSheets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOptions {
    /// Leave out rows in which every position is a hole.
    pub skip_blank_rows: bool,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            skip_blank_rows: true,
        }
    }
}

/// A single decoded sheet.
pub trait SheetSource {
    fn name(&self) -> &str;

    /// Every populated cell keyed by its A1 address, plus metadata entries.
    fn cell_map(&self) -> CellMap;

    fn decode_address(&self, key: &str) -> Option<CellAddress> {
        decode_cell(key)
    }

    /// Value at an absolute position, [`CellValue::Absent`] when nothing is
    /// stored there.
    fn value_at(&self, address: CellAddress) -> CellValue;

    /// Rows of `region`, top to bottom, each exactly `region.width()` long.
    fn rows(&self, region: &Region, options: RowOptions) -> Vec<RawRow> {
        (region.start.row..=region.end.row)
            .map(|row| {
                (region.start.col..=region.end.col)
                    .map(|col| self.value_at(CellAddress::new(row, col)))
                    .collect::<RawRow>()
            })
            .filter(|row| !options.skip_blank_rows || !row.iter().all(CellValue::is_absent))
            .collect()
    }
}
