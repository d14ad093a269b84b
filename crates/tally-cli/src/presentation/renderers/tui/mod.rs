use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

pub(crate) mod app;
mod ui;

pub use app::GuideApp;

use app::AppSignal;
use crate::presentation::presenters::build_screen_view_model;

/// Messages draining into the render loop between frames. Keyboard input
/// arrives through crossterm directly; everything asynchronous (the
/// snapshot watcher, the engine's activation callback) comes through here.
#[derive(Debug, Clone)]
pub enum GuideEvent {
    SnapshotChanged(PathBuf),
    EpisodeActivated { id: u64, code: String },
}

/// Owns the terminal for the lifetime of the guide screen.
pub struct GuideTui {
    tick_rate: Duration,
}

impl Default for GuideTui {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideTui {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    pub fn run(&self, app: &mut GuideApp, rx: Receiver<GuideEvent>) -> Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        // Restore the terminal even on Ctrl+C, which raw mode delivers as
        // a signal rather than a key event.
        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(0);
        })?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        loop {
            let size = terminal.size()?;
            app.sync_viewport(size.width, size.height);
            app.measure_dirty();

            let vm = build_screen_view_model(app.view_inputs());
            terminal.draw(|f| ui::draw(f, &vm))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if let AppSignal::Quit = app.handle_key(key) {
                        break;
                    }
                }
            }

            while let Ok(event) = rx.try_recv() {
                app.handle_event(event);
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
