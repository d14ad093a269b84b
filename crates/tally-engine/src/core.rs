use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tally_types::{Episode, TrackKey};

use crate::axis::DateAxis;
use crate::error::Result;
use crate::expand::{ExpandedCell, ExpansionController, ExpansionTransition};
use crate::heights::HeightTable;
use crate::layout::{build_layout, GuideLayout};
use crate::matrix::GridMatrix;
use crate::report::LoadReport;
use crate::source::GuideSource;
use crate::sync::{
    Axis, RegionBounds, RegionId, RegionOffsets, RegionUpdate, ScrollSync, SharedAxes,
    OFFSET_EPSILON,
};

/// Tunables fixed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideOptions {
    /// Calendar days before the anchor.
    pub back_days: u32,
    /// Calendar days after the anchor.
    pub forward_days: u32,
    /// Market passed through to the data-fetch collaborator.
    pub country: String,
    /// Height assumed for rows that have never been measured.
    pub default_row_points: f32,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            back_days: 7,
            forward_days: 14,
            country: "US".to_string(),
            default_row_points: 1.0,
        }
    }
}

/// Cross-screen guide state owned by the host and injected at construction.
///
/// Replaces the process-wide singleton the feature historically leaned on:
/// the host decides where this value lives and for how long.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideSessionState {
    pub date_offset: f32,
    pub entity_offset: f32,
    pub last_anchor: Option<NaiveDate>,
}

/// Result of forwarding a tap to the expansion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Empty cell, unknown cell, or no window loaded yet.
    Ignored,
    Toggled(ExpansionTransition),
}

struct LoadedWindow {
    anchor: NaiveDate,
    axis: DateAxis,
    layout: GuideLayout,
    matrix: GridMatrix,
}

/// The guide core a host shell drives.
///
/// Owns the axis/layout/matrix of the current window, the scroll
/// coordinator, the expansion state, and the row-height table. All methods
/// run on the host's UI thread; the only I/O is the synchronous
/// `GuideSource` call inside `load_window`.
pub struct GuideCore {
    source: Box<dyn GuideSource>,
    options: GuideOptions,
    window: Option<LoadedWindow>,
    sync: ScrollSync,
    expansion: ExpansionController,
    heights: HeightTable,
    last_anchor: Option<NaiveDate>,
    /// Row to scroll into view once heights settle; a reload cancels it.
    pending_reveal: Option<TrackKey>,
    on_episode_activated: Option<Box<dyn Fn(&Episode)>>,
}

impl GuideCore {
    pub fn new(
        source: Box<dyn GuideSource>,
        options: GuideOptions,
        session: GuideSessionState,
    ) -> Self {
        let mut sync = ScrollSync::new();
        sync.seed(session.date_offset, session.entity_offset);
        let heights = HeightTable::new(options.default_row_points);
        Self {
            source,
            options,
            window: None,
            sync,
            expansion: ExpansionController::new(),
            heights,
            last_anchor: session.last_anchor,
            pending_reveal: None,
            on_episode_activated: None,
        }
    }

    /// Install the watch-progress intent callback. The core only ever emits
    /// the intent; committing it belongs to an external collaborator.
    pub fn set_on_episode_activated(&mut self, callback: Box<dyn Fn(&Episode)>) {
        self.on_episode_activated = Some(callback);
    }

    // --- Loading ---

    /// Fetch and rebuild the window around `anchor`.
    ///
    /// The swap is atomic: on success every derived structure reflects only
    /// the new payload and stale expansion/height references are dropped; on
    /// fetch failure nothing changes and the last-good window stays
    /// renderable while the host shows its retry affordance. Any in-flight
    /// reveal is cancelled either way the load lands.
    pub fn load_window(&mut self, anchor: NaiveDate) -> Result<LoadReport> {
        let axis = DateAxis::build(anchor, self.options.back_days, self.options.forward_days);
        let payload = self.source.fetch_guide_window(
            axis.start_date(),
            axis.end_date(),
            &self.options.country,
        )?;

        let layout = build_layout(&payload.providers);
        let matrix = GridMatrix::build(&layout, &axis, &payload);

        let providers_in_payload = payload.providers.len();
        let providers_empty = payload.providers.iter().filter(|p| p.shows.is_empty()).count();
        let episodes_in_payload = payload.episode_count();

        let expansion_dropped = self.expansion.revalidate(&layout, &axis, &matrix).is_some();
        let live: HashSet<TrackKey> = layout.tracks.iter().map(|t| t.key()).collect();
        let heights_dropped = self.heights.retain_keys(&live);
        // Surviving rows may still render differently under the new data.
        self.heights.invalidate_all();
        self.pending_reveal = None;

        let report = LoadReport {
            anchor,
            window_start: axis.start_date(),
            window_end: axis.end_date(),
            columns: axis.len(),
            providers_in_payload,
            providers_empty,
            tracks: layout.track_count(),
            spans: layout.spans.len(),
            episodes_in_payload,
            episodes_placed: matrix.len(),
            episodes_outside_window: matrix.dropped_outside(),
            collisions: matrix.collisions().to_vec(),
            expansion_dropped,
            heights_dropped,
        };

        self.window = Some(LoadedWindow {
            anchor,
            axis,
            layout,
            matrix,
        });
        self.last_anchor = Some(anchor);

        Ok(report)
    }

    // --- Interaction ---

    /// Forward a cell tap to the expansion controller. Taps on empty cells
    /// are ignored; a guide row without content has nothing to expand.
    pub fn on_cell_tap(&mut self, track_index: usize, ordinal: usize) -> TapOutcome {
        let cell = {
            let Some(win) = self.window.as_ref() else {
                return TapOutcome::Ignored;
            };
            let Some(episode) = win.matrix.cell(track_index, ordinal) else {
                return TapOutcome::Ignored;
            };
            let Some(track) = win.layout.track_at(track_index) else {
                return TapOutcome::Ignored;
            };
            let Some(date) = win.axis.date_at(ordinal) else {
                return TapOutcome::Ignored;
            };
            ExpandedCell {
                key: track.key(),
                date,
                episode_id: episode.id,
            }
        };

        let transition = self.expansion.toggle(cell);
        for key in transition.affected_keys() {
            self.heights.invalidate(key);
        }
        self.pending_reveal = match &transition {
            ExpansionTransition::Expanded { cell, .. } => Some(cell.key),
            ExpansionTransition::Collapsed { .. } => None,
        };

        TapOutcome::Toggled(transition)
    }

    /// Emit the watch-progress intent for the episode in a cell, if any.
    pub fn activate_episode(&self, track_index: usize, ordinal: usize) -> bool {
        let Some(win) = self.window.as_ref() else {
            return false;
        };
        let Some(episode) = win.matrix.cell(track_index, ordinal) else {
            return false;
        };
        if let Some(callback) = &self.on_episode_activated {
            callback(episode);
        }
        true
    }

    /// Forward a user-driven scroll report; see `ScrollSync::report_offset`.
    pub fn on_region_scroll(
        &mut self,
        region: &RegionId,
        axis: Axis,
        offset: f32,
    ) -> Vec<RegionUpdate> {
        self.sync.report_offset(region, axis, offset)
    }

    /// Push current row heights into the shared extents and consume the
    /// pending reveal, nudging `focus` so the affected row sits fully inside
    /// its viewport. Call after measurements from a toggle (or a load) have
    /// been committed.
    pub fn settle_layout(&mut self, focus: &RegionId) -> Vec<RegionUpdate> {
        let mut updates = Vec::new();
        let Some(win) = self.window.as_ref() else {
            return updates;
        };

        let content = self.heights.content_height(&win.layout);
        updates.extend(self.sync.resize_axis_content(Axis::Entity, content));

        if let Some(key) = self.pending_reveal.take() {
            if let Some(track_index) = win.layout.track_index_of(key) {
                let top = self.heights.row_offset(&win.layout, track_index);
                let bottom = top + self.heights.effective(key);
                if let (Some(bounds), Some(offsets)) =
                    (self.sync.bounds_of(focus), self.sync.offset_of(focus))
                {
                    let viewport = bounds.entity.viewport;
                    let current = offsets.entity;
                    let target = if top < current {
                        top
                    } else if bottom > current + viewport {
                        bottom - viewport
                    } else {
                        current
                    };
                    if (target - current).abs() > OFFSET_EPSILON {
                        updates.extend(self.sync.nudge(Axis::Entity, target));
                    }
                }
            }
        }

        updates
    }

    // --- Regions ---

    pub fn register_region(
        &mut self,
        id: RegionId,
        axes: SharedAxes,
        bounds: RegionBounds,
    ) -> RegionOffsets {
        self.sync.register_region(id, axes, bounds)
    }

    pub fn deregister_region(&mut self, id: &RegionId) {
        self.sync.deregister_region(id);
    }

    pub fn set_region_bounds(&mut self, id: &RegionId, bounds: RegionBounds) -> Vec<RegionUpdate> {
        self.sync.set_bounds(id, bounds)
    }

    pub fn region_offset(&self, id: &RegionId) -> Option<RegionOffsets> {
        self.sync.offset_of(id)
    }

    // --- Measurement ---

    pub fn commit_row_height(&mut self, key: TrackKey, points: f32) {
        self.heights.record(key, points);
    }

    pub fn needs_measure(&self, key: TrackKey) -> bool {
        self.heights.needs_measure(key)
    }

    /// Best-known height for a row right now.
    pub fn row_height(&self, key: TrackKey) -> f32 {
        self.heights.effective(key)
    }

    // --- Queries ---

    pub fn visible_cell(&self, track_index: usize, ordinal: usize) -> Option<&Episode> {
        self.window
            .as_ref()
            .and_then(|w| w.matrix.cell(track_index, ordinal))
    }

    pub fn expanded(&self) -> Option<&ExpandedCell> {
        self.expansion.expanded()
    }

    pub fn is_cell_expanded(&self, track_index: usize, ordinal: usize) -> bool {
        let Some(win) = self.window.as_ref() else {
            return false;
        };
        let Some(track) = win.layout.track_at(track_index) else {
            return false;
        };
        let Some(date) = win.axis.date_at(ordinal) else {
            return false;
        };
        self.expansion.is_expanded(track.key(), date)
    }

    pub fn is_loaded(&self) -> bool {
        self.window.is_some()
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.window.as_ref().map(|w| w.anchor)
    }

    pub fn axis(&self) -> Option<&DateAxis> {
        self.window.as_ref().map(|w| &w.axis)
    }

    pub fn layout(&self) -> Option<&GuideLayout> {
        self.window.as_ref().map(|w| &w.layout)
    }

    pub fn matrix(&self) -> Option<&GridMatrix> {
        self.window.as_ref().map(|w| &w.matrix)
    }

    pub fn heights(&self) -> &HeightTable {
        &self.heights
    }

    pub fn options(&self) -> &GuideOptions {
        &self.options
    }

    /// Snapshot for the host to carry across screens and hand back to
    /// `new()` later.
    pub fn session_state(&self) -> GuideSessionState {
        GuideSessionState {
            date_offset: self.sync.canonical(Axis::Date),
            entity_offset: self.sync.canonical(Axis::Entity),
            last_anchor: self.last_anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::AxisBounds;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tally_types::{
        GuideWindowPayload, Provider, ProviderSchedule, Show, ShowSchedule, SourceError,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provider(id: u64, name: &str) -> Provider {
        Provider {
            id,
            name: name.to_string(),
            logo_ref: None,
            brand_color: None,
            text_color: None,
        }
    }

    fn show(id: u64, title: &str) -> Show {
        Show {
            id,
            title: title.to_string(),
            poster_ref: None,
            overview: None,
            vote_average: None,
            first_air_date: None,
        }
    }

    fn episode(id: u64, number: u32, air: NaiveDate) -> Episode {
        Episode {
            id,
            season_number: 1,
            episode_number: number,
            title: format!("Episode {}", number),
            air_date: air,
            overview: None,
            is_watched: false,
        }
    }

    /// Payload with one provider and `show_ids.len()` shows, each airing one
    /// episode on `air`. Episode ids are show id * 10.
    fn flat_payload(show_ids: &[u64], air: NaiveDate) -> GuideWindowPayload {
        GuideWindowPayload {
            providers: vec![ProviderSchedule {
                provider: provider(1, "Hulu"),
                shows: show_ids
                    .iter()
                    .map(|&id| ShowSchedule {
                        show: show(id, &format!("show-{}", id)),
                        episodes: vec![episode(id * 10, 1, air)],
                    })
                    .collect(),
            }],
        }
    }

    struct ScriptedSource {
        payload: Rc<RefCell<GuideWindowPayload>>,
        fail: Rc<Cell<bool>>,
    }

    impl GuideSource for ScriptedSource {
        fn fetch_guide_window(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
            _country: &str,
        ) -> std::result::Result<GuideWindowPayload, SourceError> {
            if self.fail.get() {
                return Err(SourceError::Unavailable("scripted outage".to_string()));
            }
            Ok(self.payload.borrow().clone())
        }
    }

    struct Rig {
        core: GuideCore,
        payload: Rc<RefCell<GuideWindowPayload>>,
        fail: Rc<Cell<bool>>,
    }

    fn rig(payload: GuideWindowPayload, default_row: f32) -> Rig {
        let shared = Rc::new(RefCell::new(payload));
        let fail = Rc::new(Cell::new(false));
        let source = ScriptedSource {
            payload: shared.clone(),
            fail: fail.clone(),
        };
        let options = GuideOptions {
            back_days: 7,
            forward_days: 14,
            country: "US".to_string(),
            default_row_points: default_row,
        };
        Rig {
            core: GuideCore::new(Box::new(source), options, GuideSessionState::default()),
            payload: shared,
            fail,
        }
    }

    fn key(provider_id: u64, show_id: u64) -> TrackKey {
        TrackKey {
            provider_id,
            show_id,
        }
    }

    #[test]
    fn load_builds_window_and_reconciling_report() {
        let anchor = date(2025, 1, 15);
        let mut payload = flat_payload(&[10, 11, 12], anchor);
        // One empty provider and one out-of-window episode for the report.
        payload.providers.push(ProviderSchedule {
            provider: provider(2, "Empty"),
            shows: Vec::new(),
        });
        payload.providers[0].shows[0]
            .episodes
            .push(episode(999, 9, date(2025, 6, 1)));
        let mut r = rig(payload, 2.0);

        let report = r.core.load_window(anchor).unwrap();

        assert!(r.core.is_loaded());
        assert_eq!(report.columns, 22);
        assert_eq!(report.window_start, date(2025, 1, 8));
        assert_eq!(report.window_end, date(2025, 1, 29));
        assert_eq!(report.tracks, 3);
        assert_eq!(report.providers_empty, 1);
        assert_eq!(report.episodes_placed, 3);
        assert_eq!(report.episodes_outside_window, 1);
        assert_eq!(
            report.episodes_placed + report.episodes_outside_window + report.collisions.len(),
            report.episodes_in_payload
        );
        assert!(report.pass_rate() < 1.0);
    }

    #[test]
    fn failed_fetch_leaves_last_good_window_visible() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();
        assert!(r.core.visible_cell(0, ordinal).is_some());

        r.fail.set(true);
        let err = r.core.load_window(date(2025, 2, 1));

        assert!(err.is_err());
        // Old window still renders and still carries its anchor.
        assert_eq!(r.core.anchor(), Some(anchor));
        assert!(r.core.visible_cell(0, ordinal).is_some());
    }

    #[test]
    fn tap_toggles_and_marks_rows_for_remeasure() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10, 11], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();
        // Loading marks everything stale; measure both rows first.
        r.core.commit_row_height(key(1, 10), 2.0);
        r.core.commit_row_height(key(1, 11), 2.0);

        let outcome = r.core.on_cell_tap(0, ordinal);

        assert!(matches!(
            outcome,
            TapOutcome::Toggled(ExpansionTransition::Expanded { .. })
        ));
        assert!(r.core.is_cell_expanded(0, ordinal));
        assert!(r.core.needs_measure(key(1, 10)));
        assert!(!r.core.needs_measure(key(1, 11)));

        // Same cell again: collapse.
        let outcome = r.core.on_cell_tap(0, ordinal);
        assert!(matches!(
            outcome,
            TapOutcome::Toggled(ExpansionTransition::Collapsed { .. })
        ));
        assert!(r.core.expanded().is_none());
    }

    #[test]
    fn tapping_an_empty_cell_is_ignored() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10], anchor), 2.0);
        r.core.load_window(anchor).unwrap();

        assert_eq!(r.core.on_cell_tap(0, 0), TapOutcome::Ignored);
        assert_eq!(r.core.on_cell_tap(7, 7), TapOutcome::Ignored);
        assert!(r.core.expanded().is_none());
    }

    #[test]
    fn settle_reveals_an_expanded_row_below_the_fold() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10, 11, 12, 13, 14], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let body = RegionId::from("body");
        r.core.register_region(
            body.clone(),
            SharedAxes::both(),
            RegionBounds {
                date: AxisBounds::new(100.0, 40.0),
                entity: AxisBounds::new(10.0, 6.0),
            },
        );
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();

        // Expand the last row (top 8.0 at default heights) and give it its
        // measured expanded height.
        r.core.on_cell_tap(4, ordinal);
        for id in [10u64, 11, 12, 13] {
            r.core.commit_row_height(key(1, id), 2.0);
        }
        r.core.commit_row_height(key(1, 14), 7.0);

        let updates = r.core.settle_layout(&body);

        // Content grew to 15; the nudge lands the row's bottom at the
        // viewport bottom: 15 - 6 = 9.
        let body_update = updates
            .iter()
            .filter(|u| u.region == body && u.axis == Axis::Entity)
            .next_back()
            .expect("body should be nudged");
        assert_eq!(body_update.offset, 9.0);
        assert_eq!(r.core.region_offset(&body).unwrap().entity, 9.0);

        // The reveal is consumed; settling again moves nothing.
        assert!(r.core.settle_layout(&body).is_empty());
    }

    #[test]
    fn reload_without_the_show_collapses_and_drops_its_height() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10, 11, 12, 13], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();

        r.core.on_cell_tap(3, ordinal);
        r.core.commit_row_height(key(1, 13), 9.0);
        assert!(r.core.expanded().is_some());

        *r.payload.borrow_mut() = flat_payload(&[10, 11, 12], anchor);
        let report = r.core.load_window(anchor).unwrap();

        assert!(report.expansion_dropped);
        assert_eq!(report.heights_dropped, 1);
        assert!(r.core.expanded().is_none());
        assert!(!r.core.heights().contains(key(1, 13)));
        assert_eq!(r.core.row_height(key(1, 13)), 2.0);
    }

    #[test]
    fn reload_cancels_a_pending_reveal() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10, 11], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let body = RegionId::from("body");
        r.core.register_region(
            body.clone(),
            SharedAxes::both(),
            RegionBounds {
                date: AxisBounds::new(100.0, 40.0),
                entity: AxisBounds::new(4.0, 2.0),
            },
        );
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();

        r.core.on_cell_tap(1, ordinal);
        r.core.load_window(anchor).unwrap();
        let updates = r.core.settle_layout(&body);

        // A reveal would have nudged the body to 2.0; the reload cancelled it.
        assert!(updates.is_empty());
        assert_eq!(r.core.region_offset(&body).unwrap().entity, 0.0);
    }

    #[test]
    fn activation_emits_the_intent_callback() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10], anchor), 2.0);
        let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        r.core
            .set_on_episode_activated(Box::new(move |ep| sink.borrow_mut().push(ep.id)));
        r.core.load_window(anchor).unwrap();
        let ordinal = r.core.axis().unwrap().ordinal_of(anchor).unwrap();

        assert!(r.core.activate_episode(0, ordinal));
        assert!(!r.core.activate_episode(0, 0));

        assert_eq!(*seen.borrow(), vec![100]);
    }

    #[test]
    fn session_state_round_trips_into_a_new_core() {
        let anchor = date(2025, 1, 15);
        let mut r = rig(flat_payload(&[10, 11, 12], anchor), 2.0);
        r.core.load_window(anchor).unwrap();
        let body = RegionId::from("body");
        r.core.register_region(
            body.clone(),
            SharedAxes::both(),
            RegionBounds {
                date: AxisBounds::new(300.0, 40.0),
                entity: AxisBounds::new(6.0, 2.0),
            },
        );
        r.core.on_region_scroll(&body, Axis::Date, 120.0);
        r.core.on_region_scroll(&body, Axis::Entity, 3.0);

        let saved = r.core.session_state();
        assert_eq!(saved.date_offset, 120.0);
        assert_eq!(saved.entity_offset, 3.0);
        assert_eq!(saved.last_anchor, Some(anchor));

        // A fresh core on the next screen resumes where the user left off.
        let shared = Rc::new(RefCell::new(flat_payload(&[10, 11, 12], anchor)));
        let source = ScriptedSource {
            payload: shared,
            fail: Rc::new(Cell::new(false)),
        };
        let mut next = GuideCore::new(Box::new(source), GuideOptions::default(), saved);
        let seeded = next.register_region(
            RegionId::from("body"),
            SharedAxes::both(),
            RegionBounds {
                date: AxisBounds::new(300.0, 40.0),
                entity: AxisBounds::new(6.0, 2.0),
            },
        );
        assert_eq!(seeded.date, 120.0);
        assert_eq!(seeded.entity, 3.0);
    }
}
