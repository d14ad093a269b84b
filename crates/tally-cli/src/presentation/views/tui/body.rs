use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{clip_span, Component, EXPANDED_TEXT_WIDTH, MAX_OVERVIEW_LINES};
use crate::presentation::view_models::{CellViewModel, GuideScreenViewModel};
use crate::presentation::views::text::{truncate, wrap_text};

/// The scrollable episode grid. Both axes move; each placed cell is drawn
/// at (ordinal x column width, row top) minus the region offsets.
pub(crate) struct BodyComponent;

impl Component for BodyComponent {
    fn render(&self, f: &mut Frame, area: Rect, vm: &GuideScreenViewModel) {
        let grid = &vm.grid;
        for row in &grid.rows {
            let row_pos = row.top - grid.entity_offset;
            let row_height = row.height.round().max(1.0) as u16;
            let Some((row_start, row_visible, row_clipped)) =
                clip_span(area.height, row_pos, row_height)
            else {
                continue;
            };

            for cell in &row.cells {
                let col_pos = cell.ordinal as f32 * f32::from(grid.col_width) - grid.date_offset;
                // An expanded cell spills past its column so the detail
                // text has room; collapsed cells keep a one-cell gutter.
                let cell_width = if cell.expanded {
                    (EXPANDED_TEXT_WIDTH as u16 + 2).max(grid.col_width)
                } else {
                    grid.col_width - 1
                };
                let Some((col_start, col_visible, col_clipped)) =
                    clip_span(area.width, col_pos, cell_width)
                else {
                    continue;
                };

                let under_cursor =
                    row.track_index == grid.cursor.track && cell.ordinal == grid.cursor.ordinal;
                let rect = Rect {
                    x: area.x + col_start,
                    y: area.y + row_start,
                    width: col_visible,
                    height: row_visible,
                };
                let lines = cell_lines(cell, cell_width as usize);
                let paragraph = Paragraph::new(lines)
                    .style(cell_style(cell, under_cursor))
                    .scroll((row_clipped, col_clipped));
                f.render_widget(paragraph, rect);
            }
        }
    }
}

fn cell_style(cell: &CellViewModel, under_cursor: bool) -> Style {
    let mut style = Style::default();
    if cell.watched {
        style = style.fg(Color::Green);
    }
    if cell.expanded {
        style = style.bg(Color::Rgb(30, 30, 46)).add_modifier(Modifier::BOLD);
    }
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn cell_lines(cell: &CellViewModel, width: usize) -> Vec<Line<'static>> {
    let check = if cell.watched { " \u{2713}" } else { "" };
    if !cell.expanded {
        return vec![
            Line::from(format!("{}{}", cell.code, check)),
            Line::from(truncate(&cell.title, width)),
        ];
    }

    let mut lines = vec![
        Line::from(format!("{} \u{00b7} {}{}", cell.code, cell.air_date, check)),
        Line::from(truncate(&cell.title, width)),
    ];
    if let Some(overview) = &cell.overview {
        lines.push(Line::from(""));
        for wrapped in wrap_text(overview, EXPANDED_TEXT_WIDTH)
            .into_iter()
            .take(MAX_OVERVIEW_LINES)
        {
            lines.push(Line::from(wrapped));
        }
    }
    lines
}
