use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubsetSumError {
    #[error("negative element at index={index}: {value}")]
    NegativeElement { index: usize, value: i64 },

    #[error("negative target: {0}")]
    NegativeTarget(i64),

    #[error("invalid query spec: {0}")]
    InvalidSpec(#[from] serde_json::Error),

    #[error("evaluation cancelled")]
    Cancelled,

    #[error("deadline exceeded ({0:?})")]
    DeadlineExceeded(Duration),

    #[error("worker failed: {0}")]
    Worker(String),
}
