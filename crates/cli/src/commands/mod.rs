//! CLI command implementations.

mod batch;
mod generate;
mod info;

pub use batch::generate_batch;
pub use generate::{FontJob, generate_font};
pub use info::show_info;
