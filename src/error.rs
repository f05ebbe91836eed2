use thiserror::Error;

/// Error kinds surfaced by the vault core.
///
/// The HTTP layer converts every one of these into a structured
/// `{success: false, error}` response; none of them is fatal to the process.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A required path was missing, empty, or outside the vault root.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The referenced file does not exist (or vanished under us).
    #[error("not found: {0}")]
    NotFound(String),
    /// A same-named file already sits at the destination. Never overwritten.
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// Any other read/write/move failure.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for VaultError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(value.to_string()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(value.to_string()),
            _ => Self::Io(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(value: serde_json::Error) -> Self {
        Self::Io(value.to_string())
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
