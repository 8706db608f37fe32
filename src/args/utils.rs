//! Shared utilities for argument processing.

use crate::args::Args;
use crate::state::{FilterCriteria, RatingRange, SortDirection, SortField, SortSpec};

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Build filter criteria from the filter flags.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Criteria; absent flags keep their defaults.
///
/// Details:
/// - Tags may be given comma-separated (`--tag a,b`) or repeated.
pub fn criteria_from_args(args: &Args) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    if let Some(category) = &args.category {
        category.trim().clone_into(&mut criteria.category);
    }
    criteria.tags = args
        .tags
        .iter()
        .flat_map(|t| t.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect();
    criteria.rating = RatingRange::new(
        args.min_rating.unwrap_or(RatingRange::FLOOR),
        args.max_rating.unwrap_or(RatingRange::CEILING),
    );
    if let Some(difficulty) = &args.difficulty {
        difficulty.trim().clone_into(&mut criteria.difficulty);
    }
    if let Some(age) = args.min_age {
        criteria.min_age = age;
    }
    if let Some(featured) = args.featured {
        criteria.featured = featured.into();
    }
    if let Some(query) = &args.query {
        query.trim().clone_into(&mut criteria.query);
    }
    criteria
}

/// What: Build the sort from the sort flags.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `base`: Sort used for absent or invalid flags.
///
/// Output:
/// - Sort spec; invalid values are logged and ignored.
pub fn sort_from_args(args: &Args, base: SortSpec) -> SortSpec {
    let mut spec = base;
    if let Some(field) = &args.sort {
        match SortField::from_key(field) {
            Some(f) => spec.field = f,
            None => tracing::warn!(field = %field, "Unknown sort field; keeping default"),
        }
    }
    if let Some(order) = &args.order {
        match SortDirection::from_key(order) {
            Some(d) => spec.direction = d,
            None => tracing::warn!(order = %order, "Unknown sort order; keeping default"),
        }
    }
    spec
}
