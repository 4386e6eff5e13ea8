//! Frame storage and grayscale I/O helpers.

pub mod frame;
pub mod io;

pub use frame::Frame;
pub use io::{load_frame, write_json_file};
