use crate::presentation::view_models::{
    ScheduleDayViewModel, ScheduleEntryViewModel, ScheduleViewModel,
};
use tally_engine::GuideCore;

/// One ViewModel day per axis column; empty days stay in the list so the
/// JSON shape covers the whole window.
pub fn present_schedule(source: &str, core: &GuideCore) -> ScheduleViewModel {
    let anchor = core.anchor().unwrap_or_default();
    let mut days = Vec::new();

    if let (Some(axis), Some(layout), Some(matrix)) = (core.axis(), core.layout(), core.matrix()) {
        for column in axis.columns() {
            let mut entries = Vec::new();
            for track in &layout.tracks {
                let Some(episode) = matrix.cell(track.index, column.ordinal) else {
                    continue;
                };
                entries.push(ScheduleEntryViewModel {
                    provider: track.provider.name.clone(),
                    show: track.show.title.clone(),
                    code: episode.code(),
                    title: episode.title.clone(),
                    episode_id: episode.id,
                    watched: episode.is_watched,
                });
            }
            days.push(ScheduleDayViewModel {
                date: column.date,
                ordinal: column.ordinal,
                is_anchor: column.date == axis.anchor(),
                entries,
            });
        }
    }

    ScheduleViewModel {
        source: source.to_string(),
        anchor,
        days,
    }
}
