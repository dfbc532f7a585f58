use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use tracing::info;

use crate::domain::entities::dataset::{DatasetId, DatasetMeta};
use crate::domain::entities::record::Record;
use crate::infra::sqlite::queries::{create_dataset_from_records, list_datasets, load_dataset};
use crate::usecase::ports::sink::{RecordSink, SinkError};

pub fn default_db_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "sheet-ingest", "sheet_ingest")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("datasets.sqlite"))
}

/// Stores each saved batch of records as one dataset.
pub struct SqliteRecordSink {
    pub db_path: PathBuf,
    pub dataset_name: String,
    pub source_path: String,
}

impl SqliteRecordSink {
    pub fn list_datasets(&self) -> Result<Vec<DatasetMeta>, SinkError> {
        list_datasets(&self.db_path).map_err(|err| SinkError::Storage(format!("{err:#}")))
    }

    pub fn load_dataset(&self, id: DatasetId) -> Result<Vec<Record>, SinkError> {
        load_dataset(&self.db_path, id.into()).map_err(|err| SinkError::Storage(format!("{err:#}")))
    }
}

impl RecordSink for SqliteRecordSink {
    fn save(&self, records: &[Record]) -> Result<(), SinkError> {
        let dataset_id = create_dataset_from_records(
            &self.db_path,
            &self.dataset_name,
            &self.source_path,
            records,
        )
        .map_err(|err| SinkError::Storage(format!("{err:#}")))?;

        info!(
            db = %self.db_path.display(),
            dataset_id,
            records = records.len(),
            "stored records"
        );
        Ok(())
    }
}
