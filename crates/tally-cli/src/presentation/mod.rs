//! # Presentation Layer
//!
//! User-interface logic for the CLI, an adaptation of **MVVM**:
//!
//! ```text
//! Console:  [ Handler ] -> [ Presenter ] -> [ ViewModel ] ==(json)==> serde_json -> stdout
//!                                                         ==(plain)=> [ View ] -> stdout
//!
//! Guide TUI: [ GuideApp (state) ] -> [ Presenter ] -> [ GuideScreenViewModel ]
//!                                                            |
//!                                                   [ Component ] -> [ ratatui Frame ]
//! ```
//!
//! Rules that keep this layer honest:
//!
//! 1. **ViewModels carry raw data, not formatted strings.** JSON output is
//!    an API; clients need numbers and dates, not prose.
//! 2. **`--format json` dumps the complete ViewModel.** Density choices
//!    only affect plain rendering.
//! 3. **Views never touch the engine.** Everything they draw arrives
//!    through a ViewModel built by a presenter; the TUI rebuilds its screen
//!    model every frame from `GuideCore` queries.

pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;
