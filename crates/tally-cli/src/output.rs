use crate::types::LogLevel;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io;
use tally_engine::LoadReport;

/// Level-gated stderr diagnostics. All operational chatter goes through
/// here so stdout stays parseable when piped; color drops automatically on
/// non-terminal stderr.
pub struct Diagnostics {
    level: LogLevel,
    color: bool,
}

impl Diagnostics {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            color: io::stderr().is_terminal(),
        }
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Warn, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Info, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Debug, message.as_ref());
    }

    fn emit(&self, level: LogLevel, message: &str) {
        if level > self.level {
            return;
        }
        let tag = if self.color {
            match level {
                LogLevel::Error => format!("{}", "error:".red().bold()),
                LogLevel::Warn => format!("{}", "warning:".yellow().bold()),
                LogLevel::Info => format!("{}", "info:".green()),
                LogLevel::Debug => format!("{}", "debug:".bright_black()),
            }
        } else {
            match level {
                LogLevel::Error => "error:".to_string(),
                LogLevel::Warn => "warning:".to_string(),
                LogLevel::Info => "info:".to_string(),
                LogLevel::Debug => "debug:".to_string(),
            }
        };
        eprintln!("{} {}", tag, message);
    }
}

/// Narrate a load's data-quality findings: dropped data at warn, the
/// placement summary at info. A clean load stays quiet below info.
pub fn report_findings(diag: &Diagnostics, report: &LoadReport) {
    for collision in &report.collisions {
        diag.warn(format!(
            "collision on {} (show {}): kept {}, dropped {}",
            collision.date, collision.show_id, collision.kept_code, collision.dropped_code
        ));
    }
    if report.providers_empty > 0 {
        diag.warn(format!(
            "{} provider(s) in the payload carried no shows and were skipped",
            report.providers_empty
        ));
    }
    if report.episodes_outside_window > 0 {
        diag.warn(format!(
            "{} episode(s) aired outside {}..{} and were dropped",
            report.episodes_outside_window, report.window_start, report.window_end
        ));
    }
    if report.expansion_dropped {
        diag.warn("the expanded cell did not survive the reload and was collapsed");
    }
    diag.info(format!(
        "placed {}/{} episodes across {} tracks in {} columns (pass rate {:.1}%)",
        report.episodes_placed,
        report.episodes_in_payload,
        report.tracks,
        report.columns,
        report.pass_rate() * 100.0
    ));
}
