// Engine module - the frozen-pane guide core (layout, lookup, interaction state)
// This layer sits between fetched guide payloads (types/feed) and host rendering

pub mod axis;
pub mod core;
pub mod error;
pub mod expand;
pub mod heights;
pub mod layout;
pub mod matrix;
pub mod report;
pub mod source;
pub mod sync;

pub use axis::DateAxis;
pub use self::core::{GuideCore, GuideOptions, GuideSessionState, TapOutcome};
pub use error::{Error, Result};
pub use expand::{ExpandedCell, ExpansionController, ExpansionTransition};
pub use heights::HeightTable;
pub use layout::{build_layout, GuideLayout};
pub use matrix::{CellCollision, GridMatrix};
pub use report::LoadReport;
pub use source::GuideSource;
pub use sync::{Axis, AxisBounds, RegionBounds, RegionId, RegionOffsets, RegionUpdate, ScrollSync, SharedAxes};

// Façade API - hosts drive a GuideCore and read through its queries.
// Rendering layers should use GuideCore instead of wiring the internal
// components together themselves; the components stay public for tests and
// for hosts with unusual layouts.
