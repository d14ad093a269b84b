use std::fmt;
use std::path::PathBuf;
use tally_types::SourceError;

/// Result type for tally-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the feed layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON parsing failed
    Json(serde_json::Error),

    /// Directory traversal failed
    WalkDir(walkdir::Error),

    /// Named snapshot does not exist
    MissingSnapshot(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::MissingSnapshot(path) => write!(f, "Snapshot not found: {}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::MissingSnapshot(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

/// Feed failures cross into the engine as source errors.
impl From<Error> for SourceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => SourceError::Io(err),
            Error::Json(err) => SourceError::Json(err),
            Error::WalkDir(err) => match err.into_io_error() {
                Some(io) => SourceError::Io(io),
                None => SourceError::Unavailable("directory traversal failed".to_string()),
            },
            Error::MissingSnapshot(path) => {
                SourceError::Unavailable(format!("snapshot not found: {}", path.display()))
            }
        }
    }
}
