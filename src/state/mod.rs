//! Catalog and view state value types.
//!
//! Everything here is plain data: the filter/sort manager, the filter panel and
//! the exporters all pass these types around by value or reference.

pub mod types;

pub use types::{
    ALL, BASE_LANGUAGE, CatalogItem, ExportFormat, FeaturedFilter, FilterCriteria, FilterOptions,
    FilterStats, LocalizedText, RatingRange, SortDirection, SortField, SortSpec,
    derive_popularity,
};
