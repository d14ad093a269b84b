use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_types::TrackKey;

use crate::axis::DateAxis;
use crate::layout::GuideLayout;
use crate::matrix::GridMatrix;

/// The one cell currently expanded inline, identified by reload-stable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCell {
    pub key: TrackKey,
    pub date: NaiveDate,
    pub episode_id: u64,
}

/// Outcome of a toggle, telling the caller which rows changed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionTransition {
    /// The tapped cell expanded; `collapsed` is the cell it displaced, if any.
    Expanded {
        cell: ExpandedCell,
        collapsed: Option<ExpandedCell>,
    },
    /// The tapped cell was the expanded one and collapsed again.
    Collapsed { cell: ExpandedCell },
}

impl ExpansionTransition {
    /// Track keys whose row height must be re-measured after this transition.
    pub fn affected_keys(&self) -> impl Iterator<Item = TrackKey> {
        let (a, b) = match self {
            ExpansionTransition::Expanded { cell, collapsed } => {
                (Some(cell.key), collapsed.map(|c| c.key))
            }
            ExpansionTransition::Collapsed { cell } => (Some(cell.key), None),
        };
        a.into_iter().chain(b)
    }
}

/// Two-state machine: Collapsed (initial) or Expanded for at most one
/// (track, date) cell.
///
/// Toggles never queue; a second toggle before the first settles simply
/// wins. Data reloads revalidate the expanded reference and force Collapsed
/// when it went stale, so the controller never holds a dangling key.
#[derive(Debug, Clone, Default)]
pub struct ExpansionController {
    expanded: Option<ExpandedCell>,
}

impl ExpansionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<&ExpandedCell> {
        self.expanded.as_ref()
    }

    pub fn is_expanded(&self, key: TrackKey, date: NaiveDate) -> bool {
        self.expanded
            .as_ref()
            .is_some_and(|c| c.key == key && c.date == date)
    }

    /// Toggle the given cell. Expanding a new cell implicitly collapses the
    /// previous one; no intermediate state is observable.
    pub fn toggle(&mut self, cell: ExpandedCell) -> ExpansionTransition {
        match self.expanded.take() {
            Some(current) if current.key == cell.key && current.date == cell.date => {
                ExpansionTransition::Collapsed { cell: current }
            }
            displaced => {
                self.expanded = Some(cell);
                ExpansionTransition::Expanded {
                    cell,
                    collapsed: displaced,
                }
            }
        }
    }

    /// Collapse unconditionally, returning what was expanded.
    pub fn clear(&mut self) -> Option<ExpandedCell> {
        self.expanded.take()
    }

    /// After a reload: keep the expansion only if its key still resolves to
    /// the same episode on the same in-window date; otherwise force
    /// Collapsed. Returns the dropped cell so the caller can report it.
    pub fn revalidate(
        &mut self,
        layout: &GuideLayout,
        axis: &DateAxis,
        matrix: &GridMatrix,
    ) -> Option<ExpandedCell> {
        let Some(cell) = self.expanded else {
            return None;
        };

        let still_live = layout
            .track_index_of(cell.key)
            .zip(axis.ordinal_of(cell.date))
            .and_then(|(track_index, ordinal)| matrix.cell(track_index, ordinal))
            .is_some_and(|episode| episode.id == cell.episode_id);

        if still_live {
            None
        } else {
            self.expanded.take()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use tally_types::{Episode, GuideWindowPayload, Provider, ProviderSchedule, Show, ShowSchedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(provider_id: u64, show_id: u64) -> TrackKey {
        TrackKey {
            provider_id,
            show_id,
        }
    }

    fn cell(provider_id: u64, show_id: u64, d: NaiveDate, episode_id: u64) -> ExpandedCell {
        ExpandedCell {
            key: key(provider_id, show_id),
            date: d,
            episode_id,
        }
    }

    fn payload(show_id: u64, episodes: Vec<Episode>) -> GuideWindowPayload {
        GuideWindowPayload {
            providers: vec![ProviderSchedule {
                provider: Provider {
                    id: 1,
                    name: "Hulu".to_string(),
                    logo_ref: None,
                    brand_color: None,
                    text_color: None,
                },
                shows: vec![ShowSchedule {
                    show: Show {
                        id: show_id,
                        title: "Show".to_string(),
                        poster_ref: None,
                        overview: None,
                        vote_average: None,
                        first_air_date: None,
                    },
                    episodes,
                }],
            }],
        }
    }

    fn episode(id: u64, d: NaiveDate) -> Episode {
        Episode {
            id,
            season_number: 1,
            episode_number: 1,
            title: "Pilot".to_string(),
            air_date: d,
            overview: None,
            is_watched: false,
        }
    }

    #[test]
    fn toggle_same_cell_collapses_again() {
        let mut controller = ExpansionController::new();
        let c = cell(1, 10, date(2025, 1, 20), 100);

        assert!(matches!(
            controller.toggle(c),
            ExpansionTransition::Expanded { collapsed: None, .. }
        ));
        assert!(controller.is_expanded(c.key, c.date));

        assert!(matches!(
            controller.toggle(c),
            ExpansionTransition::Collapsed { .. }
        ));
        assert!(controller.expanded().is_none());
    }

    #[test]
    fn expanding_a_second_cell_displaces_the_first() {
        let mut controller = ExpansionController::new();
        let first = cell(1, 10, date(2025, 1, 20), 100);
        let second = cell(1, 11, date(2025, 1, 21), 200);

        controller.toggle(first);
        let transition = controller.toggle(second);

        match transition {
            ExpansionTransition::Expanded { cell, collapsed } => {
                assert_eq!(cell, second);
                assert_eq!(collapsed, Some(first));
            }
            other => panic!("expected expansion, got {:?}", other),
        }
        assert!(controller.is_expanded(second.key, second.date));
        assert!(!controller.is_expanded(first.key, first.date));
    }

    #[test]
    fn at_most_one_cell_is_expanded_after_any_sequence() {
        let mut controller = ExpansionController::new();
        let cells = [
            cell(1, 10, date(2025, 1, 20), 100),
            cell(1, 11, date(2025, 1, 21), 200),
            cell(2, 20, date(2025, 1, 22), 300),
        ];

        for i in [0usize, 1, 1, 2, 0, 0, 2, 1] {
            controller.toggle(cells[i]);
            let expanded: Vec<_> = cells
                .iter()
                .filter(|c| controller.is_expanded(c.key, c.date))
                .collect();
            assert!(expanded.len() <= 1);
        }
    }

    #[test]
    fn affected_keys_cover_both_rows_on_displacement() {
        let mut controller = ExpansionController::new();
        let first = cell(1, 10, date(2025, 1, 20), 100);
        let second = cell(2, 20, date(2025, 1, 21), 200);

        controller.toggle(first);
        let transition = controller.toggle(second);

        let mut keys: Vec<TrackKey> = transition.affected_keys().collect();
        keys.sort_by_key(|k| (k.provider_id, k.show_id));
        assert_eq!(keys, vec![key(1, 10), key(2, 20)]);
    }

    #[test]
    fn revalidate_keeps_a_still_resolving_expansion() {
        let air = date(2025, 1, 20);
        let axis = DateAxis::build(air, 3, 3);
        let p = payload(10, vec![episode(100, air)]);
        let layout = build_layout(&p.providers);
        let matrix = GridMatrix::build(&layout, &axis, &p);

        let mut controller = ExpansionController::new();
        controller.toggle(cell(1, 10, air, 100));

        assert_eq!(controller.revalidate(&layout, &axis, &matrix), None);
        assert!(controller.expanded().is_some());
    }

    #[test]
    fn revalidate_collapses_when_the_show_disappears() {
        let air = date(2025, 1, 20);
        let axis = DateAxis::build(air, 3, 3);
        let p = payload(99, vec![episode(500, air)]);
        let layout = build_layout(&p.providers);
        let matrix = GridMatrix::build(&layout, &axis, &p);

        let mut controller = ExpansionController::new();
        let stale = cell(1, 10, air, 100);
        controller.toggle(stale);

        assert_eq!(controller.revalidate(&layout, &axis, &matrix), Some(stale));
        assert!(controller.expanded().is_none());
    }

    #[test]
    fn revalidate_collapses_when_the_date_left_the_window() {
        let air = date(2025, 1, 20);
        let p = payload(10, vec![episode(100, air)]);
        let layout = build_layout(&p.providers);
        // New window no longer contains the expanded date.
        let axis = DateAxis::build(date(2025, 3, 1), 2, 2);
        let matrix = GridMatrix::build(&layout, &axis, &p);

        let mut controller = ExpansionController::new();
        controller.toggle(cell(1, 10, air, 100));

        assert!(controller.revalidate(&layout, &axis, &matrix).is_some());
        assert!(controller.expanded().is_none());
    }

    #[test]
    fn revalidate_collapses_when_a_different_episode_took_the_cell() {
        let air = date(2025, 1, 20);
        let axis = DateAxis::build(air, 3, 3);
        let p = payload(10, vec![episode(777, air)]);
        let layout = build_layout(&p.providers);
        let matrix = GridMatrix::build(&layout, &axis, &p);

        let mut controller = ExpansionController::new();
        controller.toggle(cell(1, 10, air, 100));

        assert!(controller.revalidate(&layout, &axis, &matrix).is_some());
        assert!(controller.expanded().is_none());
    }
}
