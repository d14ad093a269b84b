use std::collections::{HashMap, HashSet};
use tally_types::{GroupSpan, TrackKey};

use crate::layout::GuideLayout;

#[derive(Debug, Clone, Copy)]
struct HeightEntry {
    points: f32,
    stale: bool,
}

/// Measured row heights keyed by reload-stable track identity.
///
/// The only long-lived mutable state in the core. Entries are written lazily
/// as the host measures rows; writes are last-write-wins per key with no
/// merge logic (all writes arrive on the one UI thread). Invalidation marks
/// an entry stale rather than deleting it: until the re-measure lands,
/// geometry keeps serving the last known height so no frame mixes heights.
#[derive(Debug, Clone)]
pub struct HeightTable {
    default_row: f32,
    entries: HashMap<TrackKey, HeightEntry>,
}

impl HeightTable {
    pub fn new(default_row: f32) -> Self {
        Self {
            default_row: default_row.max(0.0),
            entries: HashMap::new(),
        }
    }

    pub fn default_row(&self) -> f32 {
        self.default_row
    }

    /// Record a measurement; clears any stale mark on the key.
    pub fn record(&mut self, key: TrackKey, points: f32) {
        self.entries.insert(
            key,
            HeightEntry {
                points: points.max(0.0),
                stale: false,
            },
        );
    }

    /// Mark a key for re-measurement without forgetting its last height.
    pub fn invalidate(&mut self, key: TrackKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.stale = true;
        }
    }

    /// Mark every entry stale; used when a reload may have changed any
    /// rendered row's content.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
    }

    /// True when the host should (re)measure this row.
    pub fn needs_measure(&self, key: TrackKey) -> bool {
        match self.entries.get(&key) {
            Some(entry) => entry.stale,
            None => true,
        }
    }

    /// Best currently-known height: last measurement (stale or not), else
    /// the collapsed default.
    pub fn effective(&self, key: TrackKey) -> f32 {
        self.entries
            .get(&key)
            .map(|e| e.points)
            .unwrap_or(self.default_row)
    }

    pub fn contains(&self, key: TrackKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Drop entries whose key no longer resolves; returns how many fell.
    pub fn retain_keys(&mut self, live: &HashSet<TrackKey>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| live.contains(key));
        before - self.entries.len()
    }

    // --- Geometry over a layout ---

    /// Entity-axis offset of the top edge of `track_index`.
    /// `track_index == layout.track_count()` gives the full content extent.
    pub fn row_offset(&self, layout: &GuideLayout, track_index: usize) -> f32 {
        layout
            .tracks
            .iter()
            .take(track_index)
            .map(|t| self.effective(t.key()))
            .sum()
    }

    /// Total entity-axis extent of the layout at current heights.
    pub fn content_height(&self, layout: &GuideLayout) -> f32 {
        self.row_offset(layout, layout.track_count())
    }

    /// Rendered height of a merged provider cell: the sum of its member
    /// rows' current heights, expansion included. The rail resizes in
    /// lockstep with the body because both read this one table.
    pub fn span_height(&self, layout: &GuideLayout, span: &GroupSpan) -> f32 {
        layout
            .tracks
            .iter()
            .skip(span.start_index)
            .take(span.show_count())
            .map(|t| self.effective(t.key()))
            .sum()
    }
}
