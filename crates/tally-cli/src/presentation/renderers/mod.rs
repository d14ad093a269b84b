pub mod tui;

pub use tui::{GuideApp, GuideEvent, GuideTui};
