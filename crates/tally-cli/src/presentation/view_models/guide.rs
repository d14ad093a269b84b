//! TUI ViewModels for the guide screen.
//!
//! The complete data contract for one frame: the renderer draws the screen
//! from this and nothing else. Offsets are in points (one point is one
//! terminal cell); translating them to screen positions belongs to the
//! views.

use chrono::NaiveDate;
use serde::Serialize;

/// Complete screen state for one frame of the guide TUI.
#[derive(Debug, Clone, Serialize)]
pub struct GuideScreenViewModel {
    pub header: HeaderViewModel,
    pub rail: RailViewModel,
    pub grid: GridViewModel,
    pub status: StatusBarViewModel,
}

/// Frozen date strip along the top.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderViewModel {
    pub days: Vec<DayColumnViewModel>,
    /// Date-axis offset of the header region.
    pub date_offset: f32,
    pub col_width: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayColumnViewModel {
    pub date: NaiveDate,
    pub ordinal: usize,
    pub is_anchor: bool,
    pub is_today: bool,
}

/// Frozen show rail along the left.
#[derive(Debug, Clone, Serialize)]
pub struct RailViewModel {
    pub rows: Vec<RailRowViewModel>,
    /// Entity-axis offset of the rail region.
    pub entity_offset: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RailRowViewModel {
    pub track_index: usize,
    pub show_title: String,
    pub provider_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    /// First track of its provider span (draws the group divider).
    pub span_start: bool,
    /// Top edge in points, from the height table.
    pub top: f32,
    pub height: f32,
    pub expanded: bool,
}

/// Scrollable episode grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridViewModel {
    pub date_offset: f32,
    pub entity_offset: f32,
    pub col_width: u16,
    pub columns: usize,
    pub content_height: f32,
    pub rows: Vec<GridRowViewModel>,
    pub cursor: CursorViewModel,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRowViewModel {
    pub track_index: usize,
    pub top: f32,
    pub height: f32,
    /// Occupied cells only, ordered by ordinal.
    pub cells: Vec<CellViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellViewModel {
    pub ordinal: usize,
    pub episode_id: u64,
    pub code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub air_date: NaiveDate,
    pub watched: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CursorViewModel {
    pub track: usize,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBarViewModel {
    pub source: String,
    pub anchor: NaiveDate,
    pub message: String,
    pub watch: bool,
    /// Code of the currently expanded episode, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_code: Option<String>,
}
