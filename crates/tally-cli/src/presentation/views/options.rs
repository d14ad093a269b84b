use is_terminal::IsTerminal;
use std::io;

/// Rendering knobs for the plain console views.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub enable_color: bool,
    /// Character budget for one output line.
    pub width: usize,
}

impl FormatOptions {
    /// Detect from the attached terminal; piped output gets no color and a
    /// fixed width so the text stays stable.
    pub fn detect() -> Self {
        Self {
            enable_color: io::stdout().is_terminal(),
            width: terminal_size::terminal_size()
                .map(|(w, _)| w.0 as usize)
                .unwrap_or(100),
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            enable_color: false,
            width: 100,
        }
    }
}
