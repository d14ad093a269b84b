use std::fmt;

/// Result type for tally-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Error surface of the guide data-fetch collaborator.
///
/// Shared between the engine (which consumes `GuideSource`) and the feed
/// crate (which implements it), so it lives here rather than in either.
#[derive(Debug)]
pub enum SourceError {
    /// Reading the underlying snapshot or stream failed
    Io(std::io::Error),
    /// The payload was not valid JSON for the guide window shape
    Json(serde_json::Error),
    /// The payload decoded but violates a structural requirement
    InvalidPayload(String),
    /// The source has no data for the requested window
    Unavailable(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(err) => write!(f, "guide source IO error: {}", err),
            SourceError::Json(err) => write!(f, "guide payload decode error: {}", err),
            SourceError::InvalidPayload(msg) => write!(f, "invalid guide payload: {}", msg),
            SourceError::Unavailable(msg) => write!(f, "guide window unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(err) => Some(err),
            SourceError::Json(err) => Some(err),
            SourceError::InvalidPayload(_) | SourceError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Json(err)
    }
}
