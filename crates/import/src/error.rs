use thiserror::Error;

/// Why a single CSV row could not be turned into a record. Always scoped to
/// that row; the batch carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("No {0} found")]
    MissingField(&'static str),
    #[error("Could not parse timestamp: {0}")]
    MalformedTimestamp(String),
    #[error("Could not parse amount: {0}")]
    MalformedAmount(String),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported source type: {0}")]
    UnsupportedSource(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
