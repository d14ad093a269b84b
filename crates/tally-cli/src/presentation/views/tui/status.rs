use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::Component;
use crate::presentation::view_models::GuideScreenViewModel;

const KEYMAP_HINT: &str = "q quit  \u{2190}\u{2191}\u{2192}\u{2193} move  enter expand  w seen  r reload  a anchor";

pub(crate) struct StatusComponent;

impl Component for StatusComponent {
    fn render(&self, f: &mut Frame, area: Rect, vm: &GuideScreenViewModel) {
        let status = &vm.status;

        let mut spans = vec![Span::raw(format!("{} \u{00b7} anchor {}", status.source, status.anchor))];
        if status.watch {
            spans.push(Span::styled("  [watching]", Style::default().fg(Color::Cyan)));
        }
        if let Some(code) = &status.expanded_code {
            spans.push(Span::styled(
                format!("  expanded {}", code),
                Style::default().fg(Color::Yellow),
            ));
        }
        if !status.message.is_empty() {
            spans.push(Span::styled(
                format!("  | {}", status.message),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            format!("   {}", KEYMAP_HINT),
            Style::default().fg(Color::DarkGray),
        ));

        let widget = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(widget, area);
    }
}
