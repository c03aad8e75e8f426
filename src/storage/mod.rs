pub mod dedup;

pub use dedup::{DedupGuard, DedupStore, RecordSet};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read state file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write state file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Malformed state file: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
