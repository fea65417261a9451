//! Error types for rolesync-store

/// Result type for role store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in role store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A role was addressed that does not exist in the store
    #[error("Role not found: {role}")]
    RoleNotFound { role: String },

    /// A role was created that already exists in the store
    #[error("Role already exists: {role}")]
    RoleAlreadyExists { role: String },

    /// Two serialized role files declare the same role name
    #[error("Duplicate serialized role {role} in {path}")]
    DuplicateRole { role: String, path: std::path::PathBuf },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
