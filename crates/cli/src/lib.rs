//! Gray4 fonts CLI library.

pub mod cli;
pub mod commands;
pub mod io;
pub mod parallel;

pub use commands::{FontJob, generate_batch, generate_font, show_info};
