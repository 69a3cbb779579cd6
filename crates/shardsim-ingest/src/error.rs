use shardsim_types::TransactionError;
use thiserror::Error;

/// Errors the ingestion worker can produce. `MalformedField` and
/// `Transaction` are both fatal: both only ever fire for a row that has
/// already passed the acceptance filter, so a failure here means the input
/// violated the assumption that it is otherwise well-formed (spec §7).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not open input file: {0}")]
    Open(#[source] std::io::Error),

    #[error("csv read failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {line}: field `{field}` is not a valid integer")]
    MalformedField { line: u64, field: &'static str },

    #[error("row {1}: {0}")]
    Transaction(#[source] TransactionError, u64)
}

impl IngestError {
    pub fn transaction(err: TransactionError, line: u64) -> Self {
        Self::Transaction(err, line)
    }
}
