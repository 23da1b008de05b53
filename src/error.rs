/// Error types for caption scanning and word-list management

/// Result type for Caption Assist operations
pub type Result<T> = std::result::Result<T, CaptionError>;

#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid category key: {0}")]
    InvalidCategoryKey(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),

    #[error("Please enter at least one word")]
    EmptyWordList,

    #[error("F-word variants are handled automatically based on duration: {0}")]
    ReservedWord(String),

    #[error("Please fill in both URL and element selector")]
    IncompleteSiteConfig,

    #[error("No words found in category {0}")]
    CategoryNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
}
