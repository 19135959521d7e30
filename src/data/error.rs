use thiserror::Error;

/// Errors raised while building or querying a passenger dataset.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("dataset contains no passengers")]
    Empty,

    #[error("dataset has no passenger with a known age")]
    NoAges,

    #[error("unknown passenger class: {0} (expected First, Second or Third)")]
    UnknownClass(String),

    #[error("unknown sex: {0}")]
    UnknownSex(String),

    #[error("column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: String },
}
