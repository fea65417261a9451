//! Error types for rolesync-core

/// Result type for rolesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rolesync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An include rule carries a pattern that is not a valid regex.
    /// Surfaced at predicate construction; fatal to startup.
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// Store error from rolesync-store
    #[error(transparent)]
    Store(#[from] rolesync_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
