use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales pipeline.
#[derive(Error, Debug)]
pub enum SalesError {
    /// An explicitly named input file does not exist.
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file lacks one of the expected header columns.
    #[error("Missing required column `{column}` in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A row could not be decoded into a sales record.
    #[error("Malformed row at {path}:{line}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// A price field is not a valid decimal once `$` and `,` are stripped.
    #[error("Invalid price '{value}' at {path}:{line}")]
    PriceParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// `price * quantity` does not fit in a decimal.
    #[error("Sales amount overflows at {path}:{line}: {price} x {quantity}")]
    SalesOverflow {
        path: PathBuf,
        line: u64,
        price: String,
        quantity: u64,
    },

    /// The output artifact could not be written.
    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory to scan does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be produced or parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SalesError {
    /// `true` for failures to load or decode an input file.
    pub fn is_ingest(&self) -> bool {
        matches!(
            self,
            SalesError::FileNotFound(_)
                | SalesError::FileRead { .. }
                | SalesError::MissingColumn { .. }
                | SalesError::MalformedRow { .. }
                | SalesError::DataPathNotFound(_)
                | SalesError::NoDataFiles(_)
        )
    }

    /// `true` for a price that cannot be turned into a sales amount.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            SalesError::PriceParse { .. } | SalesError::SalesOverflow { .. }
        )
    }

    /// `true` for failures to persist the normalized artifact.
    pub fn is_output(&self) -> bool {
        matches!(self, SalesError::OutputWrite { .. })
    }
}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, SalesError>;
