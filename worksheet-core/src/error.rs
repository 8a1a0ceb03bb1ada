//! Error types for the worksheet-core library

use thiserror::Error;

/// Main error type for worksheet processing operations
#[derive(Error, Debug)]
pub enum WorksheetError {
    #[error("invalid image dimensions: {width}x{height} with {data_len} bytes (expected {width}*{height}*4)")]
    InvalidDimensions {
        width: u32,
        height: u32,
        data_len: usize,
    },

    #[error("invalid color count: {requested} (must be in [2, 128])")]
    InvalidK { requested: u32 },

    #[error("allocation failure: {message}")]
    AllocationFailure { message: String },

    #[error("processing cancelled")]
    Cancelled,
}

impl WorksheetError {
    /// Create a new allocation-failure error
    pub fn allocation_failure(message: impl Into<String>) -> Self {
        Self::AllocationFailure {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type WorksheetResult<T> = Result<T, WorksheetError>;
