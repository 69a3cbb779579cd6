use thiserror::Error;

/// Errors the sink can raise while setting up or writing its output.
/// Both are exit-code conditions (spec §6: "non-zero on I/O failure...
/// creating the output directory, or creating the output CSV").
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path:   String,
        #[source]
        source: std::io::Error
    },

    #[error("failed to create output csv {path}: {source}")]
    CreateFile {
        path:   String,
        #[source]
        source: std::io::Error
    },

    #[error("csv write failure: {0}")]
    Csv(#[from] csv::Error)
}
