use super::options::FormatOptions;
use super::text::truncate;
use crate::presentation::view_models::ScheduleViewModel;
use owo_colors::OwoColorize;
use std::fmt;

/// Plain rendering of `tally schedule`: days with at least one placement,
/// the anchor day starred.
pub struct ScheduleView<'a> {
    pub vm: &'a ScheduleViewModel,
    pub options: &'a FormatOptions,
}

impl fmt::Display for ScheduleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Schedule for {} days around {} (source: {})",
            self.vm.days.len(),
            self.vm.anchor,
            self.vm.source
        )?;

        let mut printed_any = false;
        for day in &self.vm.days {
            if day.entries.is_empty() {
                continue;
            }
            printed_any = true;

            let marker = if day.is_anchor { " *" } else { "" };
            let heading = format!("{} {}{}", day.date.format("%a"), day.date, marker);
            writeln!(f)?;
            if self.options.enable_color && day.is_anchor {
                writeln!(f, "{}", heading.bold())?;
            } else {
                writeln!(f, "{}", heading)?;
            }

            for entry in &day.entries {
                let watched = if entry.watched { "  [seen]" } else { "" };
                writeln!(
                    f,
                    "  {:<12} {:<28} {}  {}{}",
                    truncate(&entry.provider, 12),
                    truncate(&entry.show, 28),
                    entry.code,
                    truncate(&entry.title, 32),
                    watched
                )?;
            }
        }

        if !printed_any {
            writeln!(f)?;
            writeln!(f, "No episodes in this window.")?;
        }
        Ok(())
    }
}
