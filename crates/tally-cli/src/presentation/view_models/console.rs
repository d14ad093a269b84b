//! ViewModels for the console commands (init, window, schedule, export).
//!
//! Every field is raw data; the plain views decide presentation and the
//! JSON path serializes these structs as-is.

use chrono::NaiveDate;
use serde::Serialize;
use tally_engine::LoadReport;

#[derive(Debug, Clone, Serialize)]
pub struct InitViewModel {
    pub data_dir: String,
    pub config_path: String,
    pub config_created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<String>,
    pub snapshot_created: bool,
    pub episodes_seeded: usize,
}

/// Output of `tally window`: the assembled layout plus the load's
/// data-quality report.
#[derive(Debug, Clone, Serialize)]
pub struct WindowReportViewModel {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_ordinal: Option<usize>,
    pub spans: Vec<SpanViewModel>,
    pub tracks: Vec<TrackSummaryViewModel>,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpanViewModel {
    pub provider: String,
    pub start_index: usize,
    pub end_index: usize,
    pub shows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackSummaryViewModel {
    pub index: usize,
    pub show: String,
    pub provider: String,
    /// Episodes placed in the window for this track.
    pub episodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_air: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleViewModel {
    pub source: String,
    pub anchor: NaiveDate,
    /// One entry per axis column, empty days included.
    pub days: Vec<ScheduleDayViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDayViewModel {
    pub date: NaiveDate,
    pub ordinal: usize,
    pub is_anchor: bool,
    pub entries: Vec<ScheduleEntryViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntryViewModel {
    pub provider: String,
    pub show: String,
    pub code: String,
    pub title: String,
    pub episode_id: u64,
    pub watched: bool,
}

/// One placed cell, flattened for CSV headers and JSON export alike.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRowViewModel {
    pub date: NaiveDate,
    pub provider: String,
    pub show: String,
    pub season: u32,
    pub episode: u32,
    pub code: String,
    pub title: String,
    pub episode_id: u64,
    pub watched: bool,
}
