use std::fmt;

/// Errors that can occur during photo storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested photo file was not found.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The image payload is not valid base64 (optionally data-URL wrapped).
    InvalidEncoding(String),
    /// The decoded photo exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
}

impl StorageError {
    /// Whether the error was caused by the caller's input rather than the disk.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding(_) | Self::SizeLimitExceeded { .. }
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "photo not found: {path}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidEncoding(msg) => write!(f, "invalid image encoding: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "photo exceeds size limit ({actual} > {limit} bytes)")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
