use chrono::NaiveDate;
use serde::Serialize;

use crate::matrix::CellCollision;

/// Data-quality accounting for one completed window load.
///
/// The engine resolves upstream contract violations silently and hands the
/// findings to the caller here; whether and how they get logged is the
/// host's decision.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub anchor: NaiveDate,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub columns: usize,
    pub providers_in_payload: usize,
    pub providers_empty: usize,
    pub tracks: usize,
    pub spans: usize,
    pub episodes_in_payload: usize,
    pub episodes_placed: usize,
    pub episodes_outside_window: usize,
    pub collisions: Vec<CellCollision>,
    /// True when the reload invalidated a previously expanded cell.
    pub expansion_dropped: bool,
    /// Height entries discarded because their track left the layout.
    pub heights_dropped: usize,
}

impl LoadReport {
    /// Share of payload episodes that survived placement unchanged.
    pub fn pass_rate(&self) -> f64 {
        if self.episodes_in_payload == 0 {
            return 1.0;
        }
        self.episodes_placed as f64 / self.episodes_in_payload as f64
    }

    /// No findings worth a warning.
    pub fn is_clean(&self) -> bool {
        self.collisions.is_empty() && self.providers_empty == 0 && !self.expansion_dropped
    }
}
