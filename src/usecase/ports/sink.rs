use thiserror::Error;

use crate::domain::entities::record::Record;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Storage(String),
}

/// Destination for composed records.
pub trait RecordSink: Send + Sync {
    fn save(&self, records: &[Record]) -> Result<(), SinkError>;
}
