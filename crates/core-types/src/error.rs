use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Bucket '{label}' ends ({end}) before it starts ({start})")]
    InvertedBucket {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}
