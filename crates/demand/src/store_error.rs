// ---------------------------------------------------------------------------
// StoreError: error type for key-value persistence
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while reading or writing persisted settings.
///
/// Store failures are logged where they happen and never reach the panel;
/// the in-memory state stays authoritative for the running session.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Serializing a value to its stored text form failed.
    Encode(String),
    /// Stored text could not be parsed (corrupt or hand-edited).
    Decode(String),
    /// The backing store could not be reached at all.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            StoreError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}
