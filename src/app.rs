use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::{IngestConfig, InputFormat, SinkKind};
use crate::infra::import::csv::CsvSheet;
use crate::infra::import::xlsx::CalamineSheet;
use crate::infra::sink::json::JsonFileSink;
use crate::infra::sqlite::repo::SqliteRecordSink;
use crate::usecase::ports::sink::RecordSink;
use crate::usecase::ports::source::SheetSource;
use crate::usecase::services::import_service::{ImportResult, ImportService};

pub fn open_source(config: &IngestConfig) -> Result<Box<dyn SheetSource>> {
    match config.format {
        InputFormat::Workbook => Ok(Box::new(CalamineSheet::open(
            &config.input,
            config.sheet.as_deref(),
        )?)),
        InputFormat::Delimited { delimiter } => {
            if let Some(sheet) = &config.sheet {
                warn!(sheet = %sheet, "sheet selection is ignored for delimited input");
            }
            Ok(Box::new(CsvSheet::open(&config.input, delimiter)?))
        }
    }
}

pub fn build_sink(config: &IngestConfig) -> Arc<dyn RecordSink> {
    match config.sink {
        SinkKind::Json => Arc::new(JsonFileSink::new(&config.output)),
        SinkKind::Sqlite => Arc::new(SqliteRecordSink {
            db_path: config.output.clone(),
            dataset_name: config.dataset_name.clone(),
            source_path: config.input.to_string_lossy().into_owned(),
        }),
    }
}

/// Reads the configured sheet and hands its records to the configured sink.
pub fn run(config: &IngestConfig) -> Result<ImportResult> {
    let source = open_source(config)?;
    let service = ImportService::new(build_sink(config)).with_row_options(config.row_options);

    service
        .import(source.as_ref())
        .with_context(|| format!("failed to save records to {}", config.output.display()))
}
