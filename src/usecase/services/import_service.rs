use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::cell::RawRow;
use crate::domain::entities::record::Record;
use crate::domain::entities::region::Region;
use crate::usecase::ports::sink::{RecordSink, SinkError};
use crate::usecase::ports::source::{RowOptions, SheetSource};
use crate::usecase::services::record_composer::RecordComposer;
use crate::usecase::services::region_detector::compute_region;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub sheet_name: String,
    /// Populated region of the sheet; `None` when the sheet had no data cells.
    pub region: Option<Region>,
    /// Data rows handed to the composer (header row and skipped blank rows
    /// excluded).
    pub rows_read: usize,
    pub record_count: usize,
}

/// Sheet -> region -> rows -> records -> sink.
pub struct ImportService {
    sink: Arc<dyn RecordSink>,
    row_options: RowOptions,
}

impl ImportService {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self {
            sink,
            row_options: RowOptions::default(),
        }
    }

    pub fn with_row_options(mut self, row_options: RowOptions) -> Self {
        self.row_options = row_options;
        self
    }

    /// Everything but the write: the records of `source` plus what was read.
    pub fn compose(&self, source: &dyn SheetSource) -> (ImportResult, Vec<Record>) {
        let cells = source.cell_map();
        let region = compute_region(&cells, |key: &str| source.decode_address(key));

        let mut result = ImportResult {
            sheet_name: source.name().to_string(),
            region,
            rows_read: 0,
            record_count: 0,
        };

        let Some(region) = region else {
            warn!(sheet = %source.name(), "sheet has no data cells");
            return (result, Vec::new());
        };
        info!(sheet = %source.name(), range = %region, "detected populated range");

        let mut rows = source.rows(&region, self.row_options).into_iter();
        let composer = rows
            .next()
            .map(|header_row| RecordComposer::from_header_row(&header_row))
            .unwrap_or_else(|| RecordComposer::new(Vec::new()));
        let data_rows: Vec<RawRow> = rows.collect();

        let records = composer.compose(&data_rows);

        result.rows_read = data_rows.len();
        result.record_count = records.len();
        (result, records)
    }

    pub fn import(&self, source: &dyn SheetSource) -> Result<ImportResult, SinkError> {
        let (result, records) = self.compose(source);
        self.sink.save(&records)?;

        info!(
            sheet = %result.sheet_name,
            rows = result.rows_read,
            records = result.record_count,
            "import finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::entities::address::{decode_cell, CellAddress};
    use crate::domain::entities::cell::{CellMap, CellValue};

    #[derive(Default)]
    struct MemorySink {
        saved: Mutex<Vec<Vec<Record>>>,
    }

    impl RecordSink for MemorySink {
        fn save(&self, records: &[Record]) -> Result<(), SinkError> {
            self.saved
                .lock()
                .map_err(|err| SinkError::Storage(err.to_string()))?
                .push(records.to_vec());
            Ok(())
        }
    }

    struct MapSheet {
        cells: CellMap,
    }

    impl MapSheet {
        fn new(entries: &[(&str, CellValue)]) -> Self {
            Self {
                cells: entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect(),
            }
        }
    }

    impl SheetSource for MapSheet {
        fn name(&self) -> &str {
            "map"
        }

        fn cell_map(&self) -> CellMap {
            self.cells.clone()
        }

        fn value_at(&self, address: CellAddress) -> CellValue {
            self.cells
                .iter()
                .find(|(key, _)| decode_cell(key) == Some(address))
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        }
    }

    fn product_sheet() -> MapSheet {
        let mut entries = vec![
            ("!ref", CellValue::Other("A1:H6".into())),
            ("B2", CellValue::from("Product Name")),
            ("C2", CellValue::from("Qty")),
            ("B3", CellValue::from("Widget")),
            ("C3", CellValue::from(10_i64)),
        ];
        for (col, extra) in ["D3", "E3", "F3", "G3"].into_iter().zip(1..) {
            entries.push((col, CellValue::from(format!("extra{extra}"))));
        }
        entries.push(("B5", CellValue::from("Gadget")));
        entries.push(("C5", CellValue::from("2,5")));
        MapSheet::new(&entries)
    }

    #[test]
    fn import_writes_only_valid_rows_to_sink() {
        let sink = Arc::new(MemorySink::default());
        let service = ImportService::new(sink.clone());

        let result = service.import(&product_sheet()).expect("import should succeed");

        assert_eq!(result.region, Region::parse("B2:G5"));
        assert_eq!(result.rows_read, 2);
        assert_eq!(result.record_count, 1);

        let saved = sink.saved.lock().expect("sink lock");
        let expected: Record = [("productname", "Widget"), ("qty", "10")].into_iter().collect();
        assert_eq!(*saved, vec![vec![expected]]);
    }

    #[test]
    fn header_hole_drops_its_column() {
        let sheet = MapSheet::new(&[
            ("B2", CellValue::from("Name")),
            ("D2", CellValue::from("Price")),
            ("E2", CellValue::from("A")),
            ("F2", CellValue::from("B")),
            ("G2", CellValue::from("C")),
            ("B3", CellValue::from("x")),
            ("C3", CellValue::from("secret")),
            ("D3", CellValue::from(1_i64)),
            ("E3", CellValue::from(2_i64)),
            ("F3", CellValue::from(3_i64)),
            ("G3", CellValue::from(4_i64)),
        ]);
        let service = ImportService::new(Arc::new(MemorySink::default()));

        let (_, records) = service.compose(&sheet);

        let expected: Record = [("name", "x"), ("price", "1"), ("a", "2"), ("b", "3"), ("c", "4")]
            .into_iter()
            .collect();
        assert_eq!(records, vec![expected]);
    }

    #[test]
    fn blank_rows_can_be_kept() {
        let service = ImportService::new(Arc::new(MemorySink::default()))
            .with_row_options(RowOptions { skip_blank_rows: false });

        let (result, records) = service.compose(&product_sheet());

        assert_eq!(result.rows_read, 3);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn sheet_without_data_saves_empty_batch() {
        let sink = Arc::new(MemorySink::default());
        let service = ImportService::new(sink.clone());
        let sheet = MapSheet::new(&[("!ref", CellValue::Other("A1".into()))]);

        let result = service.import(&sheet).expect("import should succeed");

        assert_eq!(result.region, None);
        assert_eq!(result.record_count, 0);
        assert_eq!(*sink.saved.lock().expect("sink lock"), vec![Vec::<Record>::new()]);
    }
}
