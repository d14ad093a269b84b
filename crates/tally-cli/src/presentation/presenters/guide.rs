use crate::presentation::view_models::{
    CellViewModel, CursorViewModel, DayColumnViewModel, GridRowViewModel, GridViewModel,
    GuideScreenViewModel, HeaderViewModel, RailRowViewModel, RailViewModel, StatusBarViewModel,
};
use crate::presentation::views::tui::COL_WIDTH;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use tally_engine::{GuideCore, RegionId};

/// Everything the guide screen is built from on one frame. The app hands
/// these in; the presenter only reads.
pub struct GuideFrameInputs<'a> {
    pub core: &'a GuideCore,
    pub body: &'a RegionId,
    pub header: &'a RegionId,
    pub rail: &'a RegionId,
    pub cursor: (usize, usize),
    pub watched_overlay: &'a HashSet<u64>,
    pub message: &'a str,
    pub source_label: &'a str,
    pub watch: bool,
}

pub fn build_screen_view_model(inputs: GuideFrameInputs<'_>) -> GuideScreenViewModel {
    let core = inputs.core;
    let today = Local::now().date_naive();
    let anchor = core.anchor().unwrap_or(today);

    let body_offsets = core.region_offset(inputs.body).unwrap_or_default();
    let header_offset = core
        .region_offset(inputs.header)
        .map(|offsets| offsets.date)
        .unwrap_or(body_offsets.date);
    let rail_offset = core
        .region_offset(inputs.rail)
        .map(|offsets| offsets.entity)
        .unwrap_or(body_offsets.entity);

    let header = HeaderViewModel {
        days: build_days(core, anchor, today),
        date_offset: header_offset,
        col_width: COL_WIDTH,
    };

    let rail = RailViewModel {
        rows: build_rail_rows(core),
        entity_offset: rail_offset,
    };

    let grid = GridViewModel {
        date_offset: body_offsets.date,
        entity_offset: body_offsets.entity,
        col_width: COL_WIDTH,
        columns: core.axis().map(|axis| axis.len()).unwrap_or(0),
        content_height: core
            .layout()
            .map(|layout| core.heights().content_height(layout))
            .unwrap_or(0.0),
        rows: build_grid_rows(core, inputs.watched_overlay),
        cursor: CursorViewModel {
            track: inputs.cursor.0,
            ordinal: inputs.cursor.1,
        },
    };

    let status = StatusBarViewModel {
        source: inputs.source_label.to_string(),
        anchor,
        message: inputs.message.to_string(),
        watch: inputs.watch,
        expanded_code: core.expanded().and_then(|cell| {
            core.layout()
                .and_then(|layout| layout.track_index_of(cell.key))
                .and_then(|index| {
                    core.axis()
                        .and_then(|axis| axis.ordinal_of(cell.date))
                        .and_then(|ordinal| core.visible_cell(index, ordinal))
                })
                .map(|episode| episode.code())
        }),
    };

    GuideScreenViewModel {
        header,
        rail,
        grid,
        status,
    }
}

fn build_days(core: &GuideCore, anchor: NaiveDate, today: NaiveDate) -> Vec<DayColumnViewModel> {
    let Some(axis) = core.axis() else {
        return Vec::new();
    };
    axis.columns()
        .iter()
        .map(|column| DayColumnViewModel {
            date: column.date,
            ordinal: column.ordinal,
            is_anchor: column.date == anchor,
            is_today: column.date == today,
        })
        .collect()
}

fn build_rail_rows(core: &GuideCore) -> Vec<RailRowViewModel> {
    let Some(layout) = core.layout() else {
        return Vec::new();
    };
    let heights = core.heights();
    layout
        .tracks
        .iter()
        .map(|track| {
            let key = track.key();
            RailRowViewModel {
                track_index: track.index,
                show_title: track.show.title.clone(),
                provider_name: track.provider.name.clone(),
                brand_color: track.provider.brand_color.clone(),
                span_start: layout
                    .span_of(track.index)
                    .map(|span| span.start_index == track.index)
                    .unwrap_or(false),
                top: heights.row_offset(layout, track.index),
                height: heights.effective(key),
                expanded: core
                    .expanded()
                    .map(|cell| cell.key == key)
                    .unwrap_or(false),
            }
        })
        .collect()
}

fn build_grid_rows(core: &GuideCore, overlay: &HashSet<u64>) -> Vec<GridRowViewModel> {
    let (Some(layout), Some(matrix), Some(axis)) = (core.layout(), core.matrix(), core.axis())
    else {
        return Vec::new();
    };
    let heights = core.heights();

    layout
        .tracks
        .iter()
        .map(|track| {
            let key = track.key();
            let mut cells = Vec::new();
            for column in axis.columns() {
                let Some(episode) = matrix.cell(track.index, column.ordinal) else {
                    continue;
                };
                cells.push(CellViewModel {
                    ordinal: column.ordinal,
                    episode_id: episode.id,
                    code: episode.code(),
                    title: episode.title.clone(),
                    overview: episode.overview.clone(),
                    air_date: episode.air_date,
                    watched: episode.is_watched || overlay.contains(&episode.id),
                    expanded: core.is_cell_expanded(track.index, column.ordinal),
                });
            }
            GridRowViewModel {
                track_index: track.index,
                top: heights.row_offset(layout, track.index),
                height: heights.effective(key),
                cells,
            }
        })
        .collect()
}
