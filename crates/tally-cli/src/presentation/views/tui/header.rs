use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{clip_span, Component};
use crate::presentation::view_models::GuideScreenViewModel;

/// Frozen date strip: scrolls with the date axis only.
pub(crate) struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&self, f: &mut Frame, area: Rect, vm: &GuideScreenViewModel) {
        let header = &vm.header;
        for day in &header.days {
            let pos = day.ordinal as f32 * f32::from(header.col_width) - header.date_offset;
            let Some((start, visible, clipped)) = clip_span(area.width, pos, header.col_width)
            else {
                continue;
            };

            let style = if day.is_anchor {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if day.is_today {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            let marker = if day.is_anchor { "*" } else { " " };
            let lines = vec![
                Line::styled(format!("{}{}", day.date.format("%a %b %d"), marker), style),
                Line::styled(
                    format!("{}", day.date.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            let rect = Rect {
                x: area.x + start,
                y: area.y,
                width: visible,
                height: area.height,
            };
            f.render_widget(Paragraph::new(lines).scroll((0, clipped)), rect);
        }
    }
}
