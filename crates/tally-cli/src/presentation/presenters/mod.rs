pub mod export;
pub mod guide;
pub mod init;
pub mod schedule;
pub mod window;

pub use export::present_export_rows;
pub use guide::{build_screen_view_model, GuideFrameInputs};
pub use init::present_init;
pub use schedule::present_schedule;
pub use window::present_window;
