//! Spreadsheet ingestion: find the populated block of a sheet and turn its
//! rows into records keyed by normalized header names.
//!
//! Layout:
//! - `domain` holds plain data (addresses, regions, cell values, records).
//! - `usecase` holds the ports (`SheetSource`, `RecordSink`) and the services
//!   built on them (region detection, record composition, import).
//! - `infra` holds the calamine/csv readers and the JSON/SQLite writers.

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod usecase;

pub use crate::domain::entities::cell::{CellMap, CellValue, RawRow};
pub use crate::domain::entities::record::Record;
pub use crate::domain::entities::region::Region;
pub use crate::usecase::services::import_service::ImportResult;
pub use crate::usecase::services::record_composer::RecordComposer;
pub use crate::usecase::services::region_detector::compute_region;
