use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::presentation::view_models::GuideScreenViewModel;
use crate::presentation::views::tui::{
    BodyComponent, Component, HeaderComponent, RailComponent, StatusComponent, HEADER_ROWS,
    RAIL_WIDTH, STATUS_ROWS,
};

pub(crate) fn draw(f: &mut Frame, vm: &GuideScreenViewModel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(0),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    render_corner(f, top[0], vm);
    HeaderComponent.render(f, top[1], vm);
    RailComponent.render(f, middle[0], vm);
    BodyComponent.render(f, middle[1], vm);
    StatusComponent.render(f, rows[2], vm);
}

/// Fixed top-left corner where the frozen panes meet.
fn render_corner(f: &mut Frame, area: Rect, vm: &GuideScreenViewModel) {
    let lines = vec![
        Line::styled(
            " tally",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!(" {} tracks", vm.rail.rows.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
