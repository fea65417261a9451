//! Error types for rolesync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from rolesync-core
    #[error(transparent)]
    Core(#[from] rolesync_core::Error),

    /// Error from rolesync-store
    #[error(transparent)]
    Store(#[from] rolesync_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
