// Feed layer - where guide payloads come from.
// Two offline sources (stored snapshots, generated sample data) plus the
// snapshot store the CLI manages. The engine consumes all of them through
// the same GuideSource seam.

pub mod error;
pub mod sample;
pub mod snapshot;

pub use error::{Error, Result};
pub use sample::SampleSource;
pub use snapshot::{fingerprint, SnapshotEntry, SnapshotSource, SnapshotStore};
