use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    // Zero rows is not the same as rows that sum to zero; callers must not build a view.
    #[error("No data: the ledger export contains no rows")]
    EmptyDataset,

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}

impl EngineError {
    /// Process exit code used by the CLI when this error ends the session.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ConfigError(_) => 78,
            EngineError::CsvSystemError { .. } => 65,
            EngineError::IoError { .. } => 74,
            EngineError::EmptyDataset => 66,
            EngineError::ProcessingError(_) => 70,
        }
    }
}
