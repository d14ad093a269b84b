use super::options::FormatOptions;
use super::text::truncate;
use crate::presentation::view_models::WindowReportViewModel;
use owo_colors::OwoColorize;
use std::fmt;

/// Plain rendering of `tally window`.
pub struct WindowView<'a> {
    pub vm: &'a WindowReportViewModel,
    pub options: &'a FormatOptions,
}

impl fmt::Display for WindowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.vm.report;

        let headline = format!(
            "Guide window {}..{} ({} days, anchor {})",
            report.window_start, report.window_end, report.columns, report.anchor
        );
        if self.options.enable_color {
            writeln!(f, "{}", headline.bold())?;
        } else {
            writeln!(f, "{}", headline)?;
        }
        writeln!(f, "Source: {}", self.vm.source)?;
        writeln!(f)?;

        for span in &self.vm.spans {
            let plural = if span.shows == 1 { "show" } else { "shows" };
            let line = format!(
                "{} - tracks {}-{} ({} {})",
                span.provider, span.start_index, span.end_index, span.shows, plural
            );
            if self.options.enable_color {
                writeln!(f, "{}", line.bold())?;
            } else {
                writeln!(f, "{}", line)?;
            }

            for track in &self.vm.tracks {
                if track.index < span.start_index || track.index > span.end_index {
                    continue;
                }
                if track.episodes == 0 {
                    writeln!(f, "  {:>3}  {:<28} -", track.index, truncate(&track.show, 28))?;
                    continue;
                }
                let plural = if track.episodes == 1 { "episode " } else { "episodes" };
                let dates = match (track.first_air, track.last_air) {
                    (Some(first), Some(last)) if first != last => format!("{}..{}", first, last),
                    (Some(first), _) => first.to_string(),
                    _ => String::new(),
                };
                writeln!(
                    f,
                    "  {:>3}  {:<28} {:>2} {}  {}",
                    track.index,
                    truncate(&track.show, 28),
                    track.episodes,
                    plural,
                    dates
                )?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Placed {}/{} episodes, {} collision(s), {} outside the window",
            report.episodes_placed,
            report.episodes_in_payload,
            report.collisions.len(),
            report.episodes_outside_window
        )?;
        Ok(())
    }
}
