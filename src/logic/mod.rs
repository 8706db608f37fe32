//! Core non-UI catalog logic split into modular submodules.

pub mod export;
pub mod filter;
pub mod manager;
pub mod sort;

// Re-export public APIs so callers can use `crate::logic::...`
pub use export::{SerializeError, export_file_name, export_games};
pub use filter::{apply_filters, matches};
pub use manager::FilterSortManager;
pub use sort::sort_games;
