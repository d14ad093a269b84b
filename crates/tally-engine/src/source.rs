use chrono::NaiveDate;
use tally_types::{GuideWindowPayload, SourceError};

/// Data-fetch collaborator the engine consumes and never implements.
///
/// Implementations own all fetching, caching, and persistence; the engine
/// calls this once per `load_window` with the inclusive window range and the
/// configured market, and expects an in-memory payload back. The payload may
/// contain episodes outside the range; the matrix drops those at build time.
pub trait GuideSource {
    fn fetch_guide_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        country: &str,
    ) -> std::result::Result<GuideWindowPayload, SourceError>;
}
