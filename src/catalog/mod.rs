//! Catalog document loading and normalization.
//!
//! The catalog is read once at startup and handed to
//! [`FilterSortManager`](crate::logic::FilterSortManager) as a read-only working set.

mod loader;

pub use loader::{CatalogError, load_catalog, normalize_items, parse_catalog};
