use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashSet;
use std::path::PathBuf;

use super::GuideEvent;
use crate::presentation::presenters::GuideFrameInputs;
use crate::presentation::views::text::wrap_text;
use crate::presentation::views::tui::{
    BASE_ROW_POINTS, COL_WIDTH, EXPANDED_TEXT_WIDTH, HEADER_ROWS, MAX_OVERVIEW_LINES, RAIL_WIDTH,
    STATUS_ROWS,
};
use tally_engine::{
    Axis, AxisBounds, GuideCore, RegionBounds, RegionId, SharedAxes, TapOutcome,
};
use tally_feed::fingerprint;

pub(crate) enum AppSignal {
    Continue,
    Quit,
}

/// UI state of the guide screen. Owns the engine core; every mutation runs
/// on the render thread, so the single-thread contract of `GuideCore` holds
/// even in watch mode (filesystem events arrive as messages, not calls).
pub struct GuideApp {
    core: GuideCore,
    anchor: NaiveDate,
    source_label: String,
    watch: bool,
    last_fingerprint: Option<String>,
    cursor: (usize, usize),
    watched_overlay: HashSet<u64>,
    message: String,
    body: RegionId,
    header: RegionId,
    rail: RegionId,
    /// Body viewport in points, captured on the last `sync_viewport`.
    viewport: (f32, f32),
}

impl GuideApp {
    pub fn new(
        core: GuideCore,
        anchor: NaiveDate,
        source_label: String,
        watch: bool,
        snapshot_path: Option<&PathBuf>,
    ) -> Self {
        let mut app = Self {
            core,
            anchor,
            source_label,
            watch,
            last_fingerprint: snapshot_path.and_then(|path| fingerprint(path).ok()),
            cursor: (0, 0),
            watched_overlay: HashSet::new(),
            message: String::new(),
            body: RegionId::new("body"),
            header: RegionId::new("header"),
            rail: RegionId::new("rail"),
            viewport: (0.0, 0.0),
        };

        app.core.register_region(
            app.body.clone(),
            SharedAxes::both(),
            RegionBounds::default(),
        );
        app.core.register_region(
            app.header.clone(),
            SharedAxes::date_only(),
            RegionBounds::default(),
        );
        app.core.register_region(
            app.rail.clone(),
            SharedAxes::entity_only(),
            RegionBounds::default(),
        );

        if let Some(ordinal) = app.core.axis().and_then(|axis| axis.anchor_ordinal()) {
            app.cursor.1 = ordinal;
        }
        app
    }

    pub fn body_region(&self) -> &RegionId {
        &self.body
    }

    /// Refresh region bounds from the current terminal size. Content
    /// extents come from the engine; the engine clamps offsets in response.
    pub fn sync_viewport(&mut self, width: u16, height: u16) {
        let body_w = f32::from(width.saturating_sub(RAIL_WIDTH).max(1));
        let body_h = f32::from(
            height
                .saturating_sub(HEADER_ROWS + STATUS_ROWS)
                .max(1),
        );
        self.viewport = (body_w, body_h);

        let columns = self.core.axis().map(|axis| axis.len()).unwrap_or(0);
        let date_content = columns as f32 * f32::from(COL_WIDTH);
        let entity_content = self
            .core
            .layout()
            .map(|layout| self.core.heights().content_height(layout))
            .unwrap_or(0.0);

        self.core.set_region_bounds(
            &self.body,
            RegionBounds {
                date: AxisBounds::new(date_content, body_w),
                entity: AxisBounds::new(entity_content, body_h),
            },
        );
        self.core.set_region_bounds(
            &self.header,
            RegionBounds {
                date: AxisBounds::new(date_content, body_w),
                entity: AxisBounds::default(),
            },
        );
        self.core.set_region_bounds(
            &self.rail,
            RegionBounds {
                date: AxisBounds::default(),
                entity: AxisBounds::new(entity_content, body_h),
            },
        );
    }

    /// Commit heights for every row the engine marked for re-measure, then
    /// settle so a pending expansion reveal can consume the new extents.
    pub fn measure_dirty(&mut self) {
        let expanded_key = self.core.expanded().map(|cell| cell.key);
        let mut pending = Vec::new();
        if let Some(layout) = self.core.layout() {
            for track in &layout.tracks {
                let key = track.key();
                if !self.core.needs_measure(key) {
                    continue;
                }
                let points = if expanded_key == Some(key) {
                    self.expanded_points(track.index)
                } else {
                    BASE_ROW_POINTS
                };
                pending.push((key, points));
            }
        }
        if pending.is_empty() {
            return;
        }
        for (key, points) in pending {
            self.core.commit_row_height(key, points);
        }
        self.core.settle_layout(&self.body);
    }

    fn expanded_points(&self, track_index: usize) -> f32 {
        let episode = self
            .core
            .expanded()
            .and_then(|cell| self.core.axis().and_then(|axis| axis.ordinal_of(cell.date)))
            .and_then(|ordinal| self.core.visible_cell(track_index, ordinal));
        let Some(episode) = episode else {
            return BASE_ROW_POINTS;
        };
        let overview_block = episode
            .overview
            .as_deref()
            .map(|text| 1 + wrap_text(text, EXPANDED_TEXT_WIDTH).len().min(MAX_OVERVIEW_LINES))
            .unwrap_or(0);
        (3 + overview_block) as f32
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> AppSignal {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppSignal::Quit,
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::Char('w') => self.mark_seen(),
            KeyCode::Char('r') => self.reload("reloaded"),
            KeyCode::Char('a') => self.jump_to_anchor(),
            KeyCode::PageUp => self.page_rows(-1.0),
            KeyCode::PageDown => self.page_rows(1.0),
            KeyCode::Char('[') => self.page_dates(-7.0),
            KeyCode::Char(']') => self.page_dates(7.0),
            _ => {}
        }
        AppSignal::Continue
    }

    pub fn handle_event(&mut self, event: GuideEvent) {
        match event {
            GuideEvent::EpisodeActivated { id, code } => {
                self.watched_overlay.insert(id);
                self.message = format!("marked {} as seen", code);
            }
            GuideEvent::SnapshotChanged(path) => match fingerprint(&path) {
                Ok(fp) if self.last_fingerprint.as_deref() == Some(fp.as_str()) => {
                    self.message = "snapshot touched but unchanged, skipped reload".to_string();
                }
                Ok(fp) => {
                    self.last_fingerprint = Some(fp);
                    self.reload("snapshot changed, reloaded");
                }
                Err(err) => {
                    self.message = format!("snapshot unreadable: {}", err);
                }
            },
        }
    }

    fn move_cursor(&mut self, row_delta: i64, col_delta: i64) {
        let tracks = self.core.layout().map(|layout| layout.track_count()).unwrap_or(0);
        let columns = self.core.axis().map(|axis| axis.len()).unwrap_or(0);
        if tracks == 0 || columns == 0 {
            return;
        }
        let track = (self.cursor.0 as i64 + row_delta).clamp(0, tracks as i64 - 1) as usize;
        let ordinal = (self.cursor.1 as i64 + col_delta).clamp(0, columns as i64 - 1) as usize;
        self.cursor = (track, ordinal);
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        let Some(offsets) = self.core.region_offset(&self.body) else {
            return;
        };
        let (view_w, view_h) = self.viewport;

        let cell_left = self.cursor.1 as f32 * f32::from(COL_WIDTH);
        let cell_right = cell_left + f32::from(COL_WIDTH);
        let mut date_target = offsets.date;
        if cell_left < offsets.date {
            date_target = cell_left;
        } else if cell_right > offsets.date + view_w {
            date_target = cell_right - view_w;
        }
        if date_target != offsets.date {
            self.core
                .on_region_scroll(&self.body, Axis::Date, date_target);
        }

        let (row_top, row_height) = match self.core.layout() {
            Some(layout) => {
                let top = self.core.heights().row_offset(layout, self.cursor.0);
                let height = layout
                    .track_at(self.cursor.0)
                    .map(|track| self.core.heights().effective(track.key()))
                    .unwrap_or(BASE_ROW_POINTS);
                (top, height)
            }
            None => return,
        };
        let row_bottom = row_top + row_height;
        let mut entity_target = offsets.entity;
        if row_top < offsets.entity {
            entity_target = row_top;
        } else if row_bottom > offsets.entity + view_h {
            entity_target = row_bottom - view_h;
        }
        if entity_target != offsets.entity {
            self.core
                .on_region_scroll(&self.body, Axis::Entity, entity_target);
        }
    }

    fn toggle_at_cursor(&mut self) {
        let code = self
            .core
            .visible_cell(self.cursor.0, self.cursor.1)
            .map(|episode| episode.code());
        match self.core.on_cell_tap(self.cursor.0, self.cursor.1) {
            TapOutcome::Ignored => {
                self.message = "no episode in this cell".to_string();
            }
            TapOutcome::Toggled(_) => {
                let expanded_now = self.core.is_cell_expanded(self.cursor.0, self.cursor.1);
                self.message = match (expanded_now, code) {
                    (true, Some(code)) => format!("expanded {}", code),
                    (false, Some(code)) => format!("collapsed {}", code),
                    (_, None) => String::new(),
                };
            }
        }
    }

    fn mark_seen(&mut self) {
        if !self.core.activate_episode(self.cursor.0, self.cursor.1) {
            self.message = "no episode in this cell".to_string();
        }
    }

    fn reload(&mut self, reason: &str) {
        match self.core.load_window(self.anchor) {
            Ok(report) => {
                let mut message = format!(
                    "{}: placed {}/{} episodes",
                    reason, report.episodes_placed, report.episodes_in_payload
                );
                if !report.collisions.is_empty() {
                    message.push_str(&format!(", {} collision(s)", report.collisions.len()));
                }
                if report.expansion_dropped {
                    message.push_str(", expansion collapsed");
                }
                self.message = message;
                self.clamp_cursor();
            }
            Err(err) => {
                self.message = format!("reload failed ({}), keeping the last window", err);
            }
        }
    }

    fn jump_to_anchor(&mut self) {
        let Some(ordinal) = self.core.axis().and_then(|axis| axis.anchor_ordinal()) else {
            return;
        };
        self.cursor.1 = ordinal;
        let center =
            ordinal as f32 * f32::from(COL_WIDTH) + f32::from(COL_WIDTH) / 2.0 - self.viewport.0 / 2.0;
        self.core
            .on_region_scroll(&self.body, Axis::Date, center.max(0.0));
        self.ensure_cursor_visible();
    }

    fn page_rows(&mut self, pages: f32) {
        let Some(offsets) = self.core.region_offset(&self.body) else {
            return;
        };
        let target = offsets.entity + pages * self.viewport.1;
        self.core
            .on_region_scroll(&self.body, Axis::Entity, target.max(0.0));
    }

    fn page_dates(&mut self, days: f32) {
        let Some(offsets) = self.core.region_offset(&self.body) else {
            return;
        };
        let target = offsets.date + days * f32::from(COL_WIDTH);
        self.core
            .on_region_scroll(&self.body, Axis::Date, target.max(0.0));
    }

    fn clamp_cursor(&mut self) {
        let tracks = self.core.layout().map(|layout| layout.track_count()).unwrap_or(0);
        let columns = self.core.axis().map(|axis| axis.len()).unwrap_or(0);
        self.cursor.0 = self.cursor.0.min(tracks.saturating_sub(1));
        self.cursor.1 = self.cursor.1.min(columns.saturating_sub(1));
    }

    pub fn view_inputs(&self) -> GuideFrameInputs<'_> {
        GuideFrameInputs {
            core: &self.core,
            body: &self.body,
            header: &self.header,
            rail: &self.rail,
            cursor: self.cursor,
            watched_overlay: &self.watched_overlay,
            message: &self.message,
            source_label: &self.source_label,
            watch: self.watch,
        }
    }
}
