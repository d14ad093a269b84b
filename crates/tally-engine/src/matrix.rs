use chrono::NaiveDate;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tally_types::{Episode, GuideWindowPayload};

use crate::axis::DateAxis;
use crate::layout::GuideLayout;

/// One key collision observed while building the matrix: two episodes of the
/// same show resolved to the same (track, date) cell. The matrix keeps a
/// deterministic winner and records the loser here; reporting the condition
/// is the caller's responsibility, the matrix itself stays silent.
#[derive(Debug, Clone, Serialize)]
pub struct CellCollision {
    pub track_index: usize,
    pub ordinal: usize,
    pub date: NaiveDate,
    pub show_id: u64,
    pub kept_id: u64,
    pub kept_code: String,
    pub dropped_id: u64,
    pub dropped_code: String,
}

/// Sparse (track index, date ordinal) → episode lookup for one loaded window.
///
/// Built once per data load in O(total episodes); lookups are O(1).
/// Episodes airing outside the window are dropped at build time so retained
/// memory stays bounded by the window.
#[derive(Debug, Clone, Default)]
pub struct GridMatrix {
    cells: HashMap<(usize, usize), Episode>,
    collisions: Vec<CellCollision>,
    dropped_outside: usize,
}

impl GridMatrix {
    /// Scan every track's episodes and place them on the axis.
    ///
    /// `layout` must have been built from the same `payload`; tracks are
    /// re-walked in the exact order the layout builder consumed them so the
    /// two stay index-aligned.
    pub fn build(layout: &GuideLayout, axis: &DateAxis, payload: &GuideWindowPayload) -> Self {
        let mut matrix = GridMatrix::default();

        let schedules = payload
            .providers
            .iter()
            .filter(|p| !p.shows.is_empty())
            .flat_map(|p| &p.shows);

        for (track, schedule) in layout.tracks.iter().zip(schedules) {
            debug_assert_eq!(track.show.id, schedule.show.id);
            for episode in &schedule.episodes {
                let Some(ordinal) = axis.ordinal_of(episode.air_date) else {
                    matrix.dropped_outside += 1;
                    continue;
                };
                matrix.insert(track.index, ordinal, track.show.id, episode);
            }
        }

        matrix
    }

    /// When two episodes claim one cell the lower (season, episode, id)
    /// triple wins, so the outcome is stable regardless of payload order.
    fn insert(&mut self, track_index: usize, ordinal: usize, show_id: u64, episode: &Episode) {
        match self.cells.entry((track_index, ordinal)) {
            Entry::Vacant(slot) => {
                slot.insert(episode.clone());
            }
            Entry::Occupied(mut slot) => {
                let incumbent = slot.get();
                let challenger_wins = rank(episode) < rank(incumbent);
                let (kept, dropped) = if challenger_wins {
                    (episode, incumbent)
                } else {
                    (incumbent, episode)
                };
                self.collisions.push(CellCollision {
                    track_index,
                    ordinal,
                    date: episode.air_date,
                    show_id,
                    kept_id: kept.id,
                    kept_code: kept.code(),
                    dropped_id: dropped.id,
                    dropped_code: dropped.code(),
                });
                if challenger_wins {
                    slot.insert(episode.clone());
                }
            }
        }
    }

    pub fn cell(&self, track_index: usize, ordinal: usize) -> Option<&Episode> {
        self.cells.get(&(track_index, ordinal))
    }

    /// Every placed cell, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &Episode)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn collisions(&self) -> &[CellCollision] {
        &self.collisions
    }

    /// Episodes discarded because their air date fell outside the window.
    pub fn dropped_outside(&self) -> usize {
        self.dropped_outside
    }
}

fn rank(episode: &Episode) -> (u32, u32, u64) {
    (episode.season_number, episode.episode_number, episode.id)
}
