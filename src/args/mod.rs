//! Command-line argument parsing and handling.

pub mod definition;
pub mod output;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, ExportArg, FeaturedArg};
pub use utils::{criteria_from_args, determine_log_level, sort_from_args};
