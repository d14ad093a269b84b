use crate::presentation::view_models::ExportRowViewModel;
use tally_engine::GuideCore;

/// Flatten every placed cell, ordered by (date, track). The matrix iterates
/// in hash order, so the sort is what makes exports reproducible.
pub fn present_export_rows(core: &GuideCore) -> Vec<ExportRowViewModel> {
    let mut rows = Vec::new();
    let (Some(layout), Some(matrix)) = (core.layout(), core.matrix()) else {
        return rows;
    };

    let mut cells: Vec<_> = matrix.iter().collect();
    cells.sort_by_key(|&(&(track_index, ordinal), _)| (ordinal, track_index));

    for (&(track_index, _), episode) in cells {
        let Some(track) = layout.track_at(track_index) else {
            continue;
        };
        rows.push(ExportRowViewModel {
            date: episode.air_date,
            provider: track.provider.name.clone(),
            show: track.show.title.clone(),
            season: episode.season_number,
            episode: episode.episode_number,
            code: episode.code(),
            title: episode.title.clone(),
            episode_id: episode.id,
            watched: episode.is_watched,
        });
    }

    rows
}
