use thiserror::Error;

/// Error types for the lutfit-rs library.
#[derive(Error, Debug)]
pub enum LutError {
    /// Array shapes that cannot be broadcast together, or parallel arrays of
    /// different lengths.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid grid, timeline or generator configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input that must hold at least one element was empty.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A measurement timestamp has no exact match in the driver timeline.
    #[error("Measurement {index} has timestamp {timestamp} which is not on the driver timeline")]
    UnmatchedTimestamp { index: usize, timestamp: f64 },

    /// Shape error raised by ndarray while reshaping.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for lutfit-rs operations.
pub type Result<T> = std::result::Result<T, LutError>;

impl From<String> for LutError {
    fn from(s: String) -> Self {
        LutError::Other(s)
    }
}

impl From<&str> for LutError {
    fn from(s: &str) -> Self {
        LutError::Other(s.to_string())
    }
}
