// NOTE: Crate Organization
//
// The binary is a thin shell around the engine:
//
//   args/commands  - clap surface and dispatch
//   config/context - data-dir resolution, config.toml, lazy shared state
//   handlers       - one module per command; owns the GuideCore and decides
//                    what happens, never how it looks
//   presentation   - handler -> presenter -> view model -> view/renderer;
//                    console output and the ratatui guide screen both render
//                    from the same raw-data view models
//   output         - level-gated stderr diagnostics (there is no logging
//                    framework; operational chatter stays out of stdout so
//                    piped output remains machine-readable)
//   watch          - notify-backed snapshot watcher feeding the TUI loop
//
// Scroll synchronization, expansion state, and row heights all live behind
// tally_engine::GuideCore; nothing in this crate duplicates that logic.

mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod output;
pub mod presentation;
pub mod types;
mod watch;

pub use args::{Cli, Commands, WindowArgs};
pub use commands::run;
