pub mod export;
pub mod guide;
pub mod init;
pub mod schedule;
pub mod window;
