use crate::presentation::view_models::{
    SpanViewModel, TrackSummaryViewModel, WindowReportViewModel,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tally_engine::{GuideCore, LoadReport};

pub fn present_window(source: &str, core: &GuideCore, report: LoadReport) -> WindowReportViewModel {
    let mut spans = Vec::new();
    let mut tracks = Vec::new();

    // Per-track placement stats out of the matrix.
    let mut placed: HashMap<usize, (usize, NaiveDate, NaiveDate)> = HashMap::new();
    if let Some(matrix) = core.matrix() {
        for (&(track_index, _), episode) in matrix.iter() {
            placed
                .entry(track_index)
                .and_modify(|(count, first, last)| {
                    *count += 1;
                    *first = (*first).min(episode.air_date);
                    *last = (*last).max(episode.air_date);
                })
                .or_insert((1, episode.air_date, episode.air_date));
        }
    }

    if let Some(layout) = core.layout() {
        for span in &layout.spans {
            spans.push(SpanViewModel {
                provider: span.provider.name.clone(),
                start_index: span.start_index,
                end_index: span.end_index,
                shows: span.show_count(),
            });
        }
        for track in &layout.tracks {
            let stats = placed.get(&track.index).copied();
            tracks.push(TrackSummaryViewModel {
                index: track.index,
                show: track.show.title.clone(),
                provider: track.provider.name.clone(),
                episodes: stats.map(|(count, _, _)| count).unwrap_or(0),
                first_air: stats.map(|(_, first, _)| first),
                last_air: stats.map(|(_, _, last)| last),
            });
        }
    }

    WindowReportViewModel {
        source: source.to_string(),
        anchor_ordinal: core.axis().and_then(|axis| axis.anchor_ordinal()),
        spans,
        tracks,
        report,
    }
}
