use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{clip_span, parse_hex_color, Component};
use crate::presentation::view_models::GuideScreenViewModel;
use crate::presentation::views::text::truncate;

/// Frozen show rail: scrolls with the entity axis only. Provider names
/// appear on the first track of their span, tinted with the brand color.
pub(crate) struct RailComponent;

impl Component for RailComponent {
    fn render(&self, f: &mut Frame, area: Rect, vm: &GuideScreenViewModel) {
        let width = area.width as usize;
        for row in &vm.rail.rows {
            let pos = row.top - vm.rail.entity_offset;
            let height = row.height.round().max(1.0) as u16;
            let Some((start, visible, clipped)) = clip_span(area.height, pos, height) else {
                continue;
            };

            let provider_style = row
                .brand_color
                .as_deref()
                .and_then(parse_hex_color)
                .map(|color| Style::default().fg(color).add_modifier(Modifier::BOLD))
                .unwrap_or_else(|| Style::default().fg(Color::DarkGray));

            let marker = if row.expanded { "\u{25be} " } else { "  " };
            let mut lines = vec![Line::from(format!(
                "{}{}",
                marker,
                truncate(&row.show_title, width.saturating_sub(2))
            ))];
            if row.span_start {
                lines.push(Line::styled(
                    format!("  {}", truncate(&row.provider_name, width.saturating_sub(2))),
                    provider_style,
                ));
            }

            let rect = Rect {
                x: area.x,
                y: area.y + start,
                width: area.width,
                height: visible,
            };
            f.render_widget(Paragraph::new(lines).scroll((clipped, 0)), rect);
        }
    }
}
