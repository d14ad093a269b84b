pub mod error;
pub mod guide;

pub use error::{Error, Result, SourceError};
pub use guide::*;
