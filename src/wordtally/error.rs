use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid day '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),

    #[error("Watch error: {0}")]
    Watch(String),

    /// Stored bytes are not UTF-8. `lossy` is the content with invalid
    /// sequences replaced, for logging and preservation fallbacks.
    #[error("Stored data is not valid UTF-8")]
    InvalidUtf8 { lossy: String },
}

impl From<notify::Error> for TallyError {
    fn from(err: notify::Error) -> Self {
        TallyError::Watch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
