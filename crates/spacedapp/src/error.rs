use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpacedError {
    /// A request field is absent or not of the expected type.
    #[error("Missing or invalid field: {0}")]
    MissingField(&'static str),

    #[error("Invalid rating: {0} (expected 0, 1 or 2)")]
    InvalidRating(String),

    /// The persisted document exists but could not be parsed.
    #[error("Store at {location} is corrupt: {reason}")]
    StoreCorrupt { location: String, reason: String },

    /// Persisting failed on any backend (filesystem, SQLite, ...).
    #[error("Failed to write store at {location}: {source}")]
    StoreWrite {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Another writer saved the document after it was loaded.
    #[error("Store was modified concurrently (expected revision {expected}, found {found})")]
    Conflict { expected: u64, found: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl SpacedError {
    /// Stable machine-readable code, used by structured output.
    pub fn code(&self) -> &'static str {
        match self {
            SpacedError::MissingField(_) => "MISSING_FIELD",
            SpacedError::InvalidRating(_) => "INVALID_RATING",
            SpacedError::StoreCorrupt { .. } => "STORE_CORRUPT",
            SpacedError::StoreWrite { .. } => "STORE_WRITE",
            SpacedError::Conflict { .. } => "CONFLICT",
            SpacedError::Io(_) => "IO_ERROR",
            SpacedError::Serialization(_) => "SERIALIZATION_ERROR",
            SpacedError::Database(_) => "DATABASE_ERROR",
            SpacedError::Config(_) => "CONFIG_ERROR",
            SpacedError::Store(_) => "STORE_ERROR",
        }
    }

    /// True for request errors rejected before the store is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SpacedError::MissingField(_) | SpacedError::InvalidRating(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SpacedError>;
