use std::path::PathBuf;

/// Tunables for the ingestion worker (spec §6 Configuration: `batch_size`,
/// `data_cap`).
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub input_path: PathBuf,
    /// Ingestion chunk size; also the unit the fetch-token channel gates.
    pub batch_size: usize,
    /// Optional cap on the number of accepted rows to ingest.
    pub data_cap:   Option<u64>
}

impl IngestConfig {
    pub fn new(input_path: impl Into<PathBuf>, batch_size: usize, data_cap: Option<u64>) -> Self {
        Self { input_path: input_path.into(), batch_size, data_cap }
    }
}
