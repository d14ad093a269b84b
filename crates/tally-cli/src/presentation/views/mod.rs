pub mod init;
pub mod options;
pub mod schedule;
pub mod text;
pub mod tui;
pub mod window;

pub use init::InitView;
pub use options::FormatOptions;
pub use schedule::ScheduleView;
pub use window::WindowView;
