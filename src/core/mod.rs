pub mod error;
pub mod file_io;
pub mod logging;
pub mod memory;
pub mod profile;
pub mod stopwatch;
