use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Offsets closer than this are treated as equal when deciding whether a
/// region still needs an update or whether a report is the echo of one.
pub(crate) const OFFSET_EPSILON: f32 = 1e-3;

/// The two logical dimensions of the grid. Which visual direction each maps
/// to is the host's choice; both guide orientations share this coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Date,
    Entity,
}

impl Axis {
    fn slot(self) -> usize {
        match self {
            Axis::Date => 0,
            Axis::Entity => 1,
        }
    }
}

/// Which axes a region keeps in sync with the rest of the grid.
///
/// A pinned header shares only the date axis, a pinned rail only the entity
/// axis, the body both. Motion on a non-shared axis stays private to the
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedAxes {
    pub date: bool,
    pub entity: bool,
}

impl SharedAxes {
    pub fn date_only() -> Self {
        Self {
            date: true,
            entity: false,
        }
    }

    pub fn entity_only() -> Self {
        Self {
            date: false,
            entity: true,
        }
    }

    pub fn both() -> Self {
        Self {
            date: true,
            entity: true,
        }
    }

    pub fn shares(&self, axis: Axis) -> bool {
        match axis {
            Axis::Date => self.date,
            Axis::Entity => self.entity,
        }
    }
}

/// Scrollable extent of one region on one axis, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Total content extent.
    pub content: f32,
    /// Visible extent.
    pub viewport: f32,
}

impl AxisBounds {
    pub fn new(content: f32, viewport: f32) -> Self {
        Self { content, viewport }
    }

    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }
}

/// Per-axis bounds of one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub date: AxisBounds,
    pub entity: AxisBounds,
}

impl RegionBounds {
    pub fn axis(&self, axis: Axis) -> AxisBounds {
        match axis {
            Axis::Date => self.date,
            Axis::Entity => self.entity,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisBounds {
        match axis {
            Axis::Date => &mut self.date,
            Axis::Entity => &mut self.entity,
        }
    }
}

/// Host-chosen identifier of a scrollable region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Current offsets of one region on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionOffsets {
    pub date: f32,
    pub entity: f32,
}

/// Programmatic offset instruction for one region, produced by propagation.
/// Hosts apply these directly; applying one must not come back through
/// `report_offset` as if the user had scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionUpdate {
    pub region: RegionId,
    pub axis: Axis,
    pub offset: f32,
}

#[derive(Debug, Clone)]
struct RegionState {
    axes: SharedAxes,
    bounds: RegionBounds,
    offsets: [f32; 2],
    /// Offset we last pushed to this region and have not seen echoed back.
    pending_echo: [Option<f32>; 2],
}

impl RegionState {
    fn offsets(&self) -> RegionOffsets {
        RegionOffsets {
            date: self.offsets[Axis::Date.slot()],
            entity: self.offsets[Axis::Entity.slot()],
        }
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < OFFSET_EPSILON
}

/// Keeps 2-4 independently scrollable regions consistent on the axes they
/// share.
///
/// Exactly one propagation source exists per input: the region the user is
/// actually moving. Everything the coordinator pushes out is programmatic,
/// and a programmatic offset echoed back in is recognized and absorbed
/// rather than re-propagated, so no feedback loop can form.
#[derive(Debug, Clone)]
pub struct ScrollSync {
    regions: BTreeMap<RegionId, RegionState>,
    /// Source-of-truth offset per axis, set by user motion and nudges.
    canonical: [f32; 2],
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSync {
    pub fn new() -> Self {
        Self {
            regions: BTreeMap::new(),
            canonical: [0.0, 0.0],
        }
    }

    /// Restore canonical offsets (e.g., from a persisted session) before any
    /// region registers.
    pub fn seed(&mut self, date_offset: f32, entity_offset: f32) {
        self.canonical = [date_offset.max(0.0), entity_offset.max(0.0)];
    }

    pub fn canonical(&self, axis: Axis) -> f32 {
        self.canonical[axis.slot()]
    }

    /// Register a region and seed it with the current offsets on its shared
    /// axes, clamped to its own range, so a region created mid-scroll never
    /// paints a stale position. The returned offsets are what its first
    /// paint should use.
    pub fn register_region(
        &mut self,
        id: RegionId,
        axes: SharedAxes,
        bounds: RegionBounds,
    ) -> RegionOffsets {
        let mut state = RegionState {
            axes,
            bounds,
            offsets: [0.0, 0.0],
            pending_echo: [None, None],
        };
        for axis in [Axis::Date, Axis::Entity] {
            if axes.shares(axis) {
                let seeded = bounds.axis(axis).clamp(self.canonical[axis.slot()]);
                state.offsets[axis.slot()] = seeded;
                state.pending_echo[axis.slot()] = Some(seeded);
            }
        }
        let offsets = state.offsets();
        self.regions.insert(id, state);
        offsets
    }

    pub fn deregister_region(&mut self, id: &RegionId) {
        self.regions.remove(id);
    }

    pub fn has_region(&self, id: &RegionId) -> bool {
        self.regions.contains_key(id)
    }

    pub fn region_ids(&self) -> impl Iterator<Item = &RegionId> {
        self.regions.keys()
    }

    pub fn offset_of(&self, id: &RegionId) -> Option<RegionOffsets> {
        self.regions.get(id).map(|s| s.offsets())
    }

    pub fn bounds_of(&self, id: &RegionId) -> Option<RegionBounds> {
        self.regions.get(id).map(|s| s.bounds)
    }

    /// Replace a region's bounds (viewport resize, content change) and
    /// re-clamp its current offsets; emits updates for offsets that moved.
    pub fn set_bounds(&mut self, id: &RegionId, bounds: RegionBounds) -> Vec<RegionUpdate> {
        let mut updates = Vec::new();
        let Some(state) = self.regions.get_mut(id) else {
            return updates;
        };
        state.bounds = bounds;
        for axis in [Axis::Date, Axis::Entity] {
            let slot = axis.slot();
            let clamped = bounds.axis(axis).clamp(state.offsets[slot]);
            if !approx_eq(clamped, state.offsets[slot]) {
                state.offsets[slot] = clamped;
                state.pending_echo[slot] = Some(clamped);
                updates.push(RegionUpdate {
                    region: id.clone(),
                    axis,
                    offset: clamped,
                });
            }
        }
        updates
    }

    /// Grow or shrink the content extent of every region sharing `axis`,
    /// keeping viewports as they are. Used when row heights settle.
    pub fn resize_axis_content(&mut self, axis: Axis, content: f32) -> Vec<RegionUpdate> {
        let mut updates = Vec::new();
        let slot = axis.slot();
        for (id, state) in self.regions.iter_mut() {
            if !state.axes.shares(axis) {
                continue;
            }
            state.bounds.axis_mut(axis).content = content;
            let clamped = state.bounds.axis(axis).clamp(state.offsets[slot]);
            if !approx_eq(clamped, state.offsets[slot]) {
                state.offsets[slot] = clamped;
                state.pending_echo[slot] = Some(clamped);
                updates.push(RegionUpdate {
                    region: id.clone(),
                    axis,
                    offset: clamped,
                });
            }
        }
        updates
    }

    /// User-driven scroll report from `id`. Adopts the offset (clamped to the
    /// source's own range) as canonical and returns the minimal update set
    /// for the other regions sharing the axis, each clamped to its own range.
    ///
    /// Reports for unknown regions are ignored; a guide must keep rendering
    /// around a host wiring bug, not crash on it.
    pub fn report_offset(&mut self, id: &RegionId, axis: Axis, offset: f32) -> Vec<RegionUpdate> {
        let slot = axis.slot();
        let Some(state) = self.regions.get_mut(id) else {
            return Vec::new();
        };

        let clamped = state.bounds.axis(axis).clamp(offset);

        if let Some(expected) = state.pending_echo[slot] {
            state.pending_echo[slot] = None;
            if approx_eq(expected, clamped) {
                // The echo of our own push: absorb, never re-propagate.
                state.offsets[slot] = clamped;
                return Vec::new();
            }
            // Offset differs: the user grabbed this region mid-settle, so
            // it is a genuine source again.
        }

        state.offsets[slot] = clamped;

        if !state.axes.shares(axis) {
            // Private axis: remember the position, nothing to sync.
            return Vec::new();
        }

        self.canonical[slot] = clamped;
        self.propagate(axis, clamped, Some(id))
    }

    /// Programmatic motion (scroll-into-view, restore): moves every region
    /// sharing `axis`. Updates delivered this way are echo-absorbed exactly
    /// like propagated user motion.
    pub fn nudge(&mut self, axis: Axis, offset: f32) -> Vec<RegionUpdate> {
        let slot = axis.slot();
        let target = offset.max(0.0);
        self.canonical[slot] = target;
        self.propagate(axis, target, None)
    }

    fn propagate(
        &mut self,
        axis: Axis,
        offset: f32,
        source: Option<&RegionId>,
    ) -> Vec<RegionUpdate> {
        let slot = axis.slot();
        let mut updates = Vec::new();
        for (id, state) in self.regions.iter_mut() {
            if source.is_some_and(|src| src == id) {
                continue;
            }
            if !state.axes.shares(axis) {
                continue;
            }
            let clamped = state.bounds.axis(axis).clamp(offset);
            if approx_eq(clamped, state.offsets[slot]) {
                continue;
            }
            state.offsets[slot] = clamped;
            state.pending_echo[slot] = Some(clamped);
            updates.push(RegionUpdate {
                region: id.clone(),
                axis,
                offset: clamped,
            });
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(date_max: f32, entity_max: f32) -> RegionBounds {
        // viewport 100 on each axis keeps max_offset readable in tests
        RegionBounds {
            date: AxisBounds::new(date_max + 100.0, 100.0),
            entity: AxisBounds::new(entity_max + 100.0, 100.0),
        }
    }

    fn grid() -> (ScrollSync, RegionId, RegionId, RegionId) {
        let mut sync = ScrollSync::new();
        let body = RegionId::from("body");
        let header = RegionId::from("header");
        let rail = RegionId::from("rail");
        sync.register_region(body.clone(), SharedAxes::both(), bounds(300.0, 400.0));
        sync.register_region(header.clone(), SharedAxes::date_only(), bounds(300.0, 0.0));
        sync.register_region(rail.clone(), SharedAxes::entity_only(), bounds(0.0, 400.0));
        (sync, body, header, rail)
    }

    #[test]
    fn user_motion_propagates_to_sharing_regions_in_one_step() {
        let (mut sync, body, header, rail) = grid();

        let updates = sync.report_offset(&body, Axis::Date, 120.0);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].region, header);
        assert_eq!(updates[0].offset, 120.0);
        assert_eq!(sync.offset_of(&header).unwrap().date, 120.0);
        // The rail does not share the date axis and must not move.
        assert_eq!(sync.offset_of(&rail).unwrap().entity, 0.0);
    }

    #[test]
    fn targets_clamp_to_their_own_range_without_error() {
        let mut sync = ScrollSync::new();
        let body = RegionId::from("body");
        let header = RegionId::from("header");
        sync.register_region(body.clone(), SharedAxes::both(), bounds(300.0, 0.0));
        // Narrower header: max date offset 80.
        sync.register_region(header.clone(), SharedAxes::date_only(), bounds(80.0, 0.0));

        let updates = sync.report_offset(&body, Axis::Date, 250.0);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].offset, 80.0);
        assert_eq!(sync.offset_of(&body).unwrap().date, 250.0);
        assert_eq!(sync.offset_of(&header).unwrap().date, 80.0);
    }

    #[test]
    fn echoed_updates_never_re_propagate() {
        let (mut sync, body, header, _) = grid();

        let updates = sync.report_offset(&body, Axis::Date, 90.0);
        assert_eq!(updates.len(), 1);

        // Host applies the update and its scroll machinery reports it back.
        let echo = sync.report_offset(&header, Axis::Date, 90.0);
        assert!(echo.is_empty());
        // And nothing drifted in the meantime.
        assert_eq!(sync.offset_of(&body).unwrap().date, 90.0);
    }

    #[test]
    fn user_grab_overrides_a_pending_echo() {
        let (mut sync, body, header, _) = grid();
        sync.report_offset(&body, Axis::Date, 90.0);

        // Instead of the echo, the user starts dragging the header itself.
        let updates = sync.report_offset(&header, Axis::Date, 55.0);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].region, body);
        assert_eq!(updates[0].offset, 55.0);
        assert_eq!(sync.canonical(Axis::Date), 55.0);
    }

    #[test]
    fn late_registration_is_seeded_before_first_paint() {
        let mut sync = ScrollSync::new();
        let body = RegionId::from("body");
        sync.register_region(body.clone(), SharedAxes::both(), bounds(300.0, 400.0));
        sync.report_offset(&body, Axis::Entity, 260.0);

        let rail = RegionId::from("rail");
        let seeded =
            sync.register_region(rail.clone(), SharedAxes::entity_only(), bounds(0.0, 180.0));

        // Clamped to the narrower rail range.
        assert_eq!(seeded.entity, 180.0);
        assert_eq!(sync.offset_of(&rail).unwrap().entity, 180.0);
        // Seeds behave like pushed offsets: echoing one is absorbed.
        assert!(sync.report_offset(&rail, Axis::Entity, 180.0).is_empty());
    }

    #[test]
    fn nudge_moves_every_sharing_region_programmatically() {
        let (mut sync, body, _, rail) = grid();

        let updates = sync.nudge(Axis::Entity, 210.0);

        let mut regions: Vec<&str> = updates.iter().map(|u| u.region.as_str()).collect();
        regions.sort();
        assert_eq!(regions, vec!["body", "rail"]);
        assert_eq!(sync.offset_of(&body).unwrap().entity, 210.0);
        assert_eq!(sync.offset_of(&rail).unwrap().entity, 210.0);

        // Echoes of the nudge are absorbed; no propagation storm.
        assert!(sync.report_offset(&body, Axis::Entity, 210.0).is_empty());
        assert!(sync.report_offset(&rail, Axis::Entity, 210.0).is_empty());
    }

    #[test]
    fn offsets_clamp_at_zero_and_at_max() {
        let (mut sync, body, _, _) = grid();

        sync.report_offset(&body, Axis::Date, -50.0);
        assert_eq!(sync.offset_of(&body).unwrap().date, 0.0);

        sync.report_offset(&body, Axis::Date, 5000.0);
        assert_eq!(sync.offset_of(&body).unwrap().date, 300.0);
    }

    #[test]
    fn shrinking_content_reclamps_stranded_offsets() {
        let (mut sync, body, _, rail) = grid();
        sync.report_offset(&body, Axis::Entity, 350.0);

        // Content collapses to max offset 120 on the entity axis.
        let updates = sync.resize_axis_content(Axis::Entity, 220.0);

        assert!(updates.iter().any(|u| u.region == body && u.offset == 120.0));
        assert!(updates.iter().any(|u| u.region == rail));
        assert_eq!(sync.offset_of(&body).unwrap().entity, 120.0);
    }

    #[test]
    fn unknown_region_reports_are_ignored() {
        let (mut sync, _, _, _) = grid();

        let updates = sync.report_offset(&RegionId::from("ghost"), Axis::Date, 42.0);

        assert!(updates.is_empty());
        assert!(sync.offset_of(&RegionId::from("ghost")).is_none());
    }

    #[test]
    fn seeded_session_offsets_apply_to_new_regions() {
        let mut sync = ScrollSync::new();
        sync.seed(140.0, 60.0);

        let body = RegionId::from("body");
        let seeded = sync.register_region(body, SharedAxes::both(), bounds(300.0, 400.0));

        assert_eq!(seeded.date, 140.0);
        assert_eq!(seeded.entity, 60.0);
    }
}
