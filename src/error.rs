use thiserror::Error;

/// Errors raised by the decision-log store itself.
///
/// These are all recoverable: the store keeps its last committed state
/// whenever one of them is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Free tier limit reached. You can only have {limit} active decision logs.")]
    QuotaExceeded { limit: usize },

    #[error("Failed to save decision logs: {0}")]
    PersistenceFailure(String),

    #[error("Failed to load decision logs: {0}")]
    DeserializationFailure(String),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
}

/// Errors raised by a durable key-value slot.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage full: {needed} bytes needed, {capacity} bytes available")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Not in a resolve project. Run 'resolve init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .resolve/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Decision log not found: {0}")]
    LogNotFound(String),

    #[error("Ambiguous id '{prefix}' matches {count} decision logs")]
    AmbiguousId { prefix: String, count: usize },

    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Reminder(#[from] crate::reminder::ReminderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
