pub mod console;
pub mod guide;

pub use console::*;
pub use guide::*;
