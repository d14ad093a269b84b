//! Widgets of the guide screen. Stateless: each component draws one region
//! of the frozen-pane grid from the frame's `GuideScreenViewModel`.
//!
//! Geometry contract: one engine point is one terminal cell, so the region
//! offsets coming out of the scroll coordinator translate directly to
//! row/column positions here.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

use crate::presentation::view_models::GuideScreenViewModel;

pub(crate) mod body;
pub(crate) mod header;
pub(crate) mod rail;
pub(crate) mod status;

pub(crate) use body::BodyComponent;
pub(crate) use header::HeaderComponent;
pub(crate) use rail::RailComponent;
pub(crate) use status::StatusComponent;

/// Terminal cells per date column, gutter included.
pub const COL_WIDTH: u16 = 14;
/// Cells reserved for the show rail on the left.
pub const RAIL_WIDTH: u16 = 26;
/// Rows of the frozen date strip.
pub const HEADER_ROWS: u16 = 2;
/// Rows of the status bar (top border plus one text line).
pub const STATUS_ROWS: u16 = 2;
/// Measured height of a collapsed row: two text lines plus a spacer.
pub const BASE_ROW_POINTS: f32 = 3.0;
/// Wrap budget for expanded-cell overview text.
pub const EXPANDED_TEXT_WIDTH: usize = 36;
/// Overview lines an expanded cell may occupy at most.
pub const MAX_OVERVIEW_LINES: usize = 6;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, vm: &GuideScreenViewModel);
}

/// Place a span of `len` cells at fractional position `pos` (points from
/// the region origin) inside a region `extent` cells long. Returns the
/// visible start, the visible length, and how many leading cells were
/// clipped away, or None when fully outside.
pub(crate) fn clip_span(extent: u16, pos: f32, len: u16) -> Option<(u16, u16, u16)> {
    let start = pos.round() as i32;
    let end = start + len as i32;
    let visible_start = start.max(0);
    let visible_end = end.min(extent as i32);
    if visible_end <= visible_start {
        return None;
    }
    Some((
        visible_start as u16,
        (visible_end - visible_start) as u16,
        (visible_start - start) as u16,
    ))
}

/// "#1CE783" style brand colors from the feed.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_a_fully_visible_span() {
        assert_eq!(clip_span(80, 10.0, 14), Some((10, 14, 0)));
    }

    #[test]
    fn clip_trims_the_leading_edge() {
        // Span starts 5 cells left of the region.
        assert_eq!(clip_span(80, -5.0, 14), Some((0, 9, 5)));
    }

    #[test]
    fn clip_trims_the_trailing_edge() {
        assert_eq!(clip_span(20, 12.0, 14), Some((12, 8, 0)));
    }

    #[test]
    fn clip_drops_offscreen_spans() {
        assert_eq!(clip_span(20, 25.0, 14), None);
        assert_eq!(clip_span(20, -14.0, 14), None);
    }

    #[test]
    fn brand_hex_parses_to_rgb() {
        assert_eq!(parse_hex_color("#1CE783"), Some(Color::Rgb(0x1C, 0xE7, 0x83)));
        assert_eq!(parse_hex_color("1CE783"), None);
        assert_eq!(parse_hex_color("#XYZ123"), None);
    }
}
