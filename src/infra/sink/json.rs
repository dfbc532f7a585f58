use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::entities::record::Record;
use crate::usecase::ports::sink::{RecordSink, SinkError};

pub const DEFAULT_JSON_PATH: &str = "./data.json";

/// Writes all records as one pretty-printed JSON array, replacing the file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonFileSink {
    fn save(&self, records: &[Record]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;

        info!(path = %self.path.display(), records = records.len(), "saved records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("sheet-ingest-{prefix}-{nanos}"))
    }

    #[test]
    fn writes_pretty_array_with_two_space_indent() {
        let temp_dir = unique_test_dir("json-sink");
        let path = temp_dir.join("nested").join("data.json");
        let sink = JsonFileSink::new(&path);
        let records: Vec<Record> = vec![[("productname", "Widget"), ("qty", "10")]
            .into_iter()
            .collect()];

        sink.save(&records).expect("save should succeed");

        let written = std::fs::read_to_string(&path).expect("output should exist");
        assert_eq!(
            written,
            "[\n  {\n    \"productname\": \"Widget\",\n    \"qty\": \"10\"\n  }\n]"
        );

        std::fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn empty_input_writes_empty_array() {
        let temp_dir = unique_test_dir("json-sink-empty");
        let path = temp_dir.join("data.json");

        JsonFileSink::new(&path).save(&[]).expect("save should succeed");

        assert_eq!(std::fs::read_to_string(&path).expect("output should exist"), "[]");
        std::fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
