//! Filter/sort state manager: the single source of truth for the catalog view.

use std::collections::BTreeSet;

use crate::logic::{export, filter, sort};
use crate::state::{
    BASE_LANGUAGE, CatalogItem, ExportFormat, FilterCriteria, FilterOptions, FilterStats,
    RatingRange, SortDirection, SortField, SortSpec,
};

/// Holds the catalog working set, the active criteria and sort, and the derived view.
#[derive(Debug, Clone)]
pub struct FilterSortManager {
    /// Full catalog in load order; never mutated after construction.
    games: Vec<CatalogItem>,
    /// Items passing `filters`, ordered by `sort`.
    filtered: Vec<CatalogItem>,
    /// Active filter criteria.
    filters: FilterCriteria,
    /// Active sort.
    sort: SortSpec,
    /// Language for title ordering, search and CSV titles.
    language: String,
}

impl FilterSortManager {
    /// What: Create a manager over a loaded catalog with default criteria and sort.
    ///
    /// Inputs:
    /// - `games`: Catalog items in load order
    ///
    /// Output:
    /// - Manager whose view holds every game ordered by popularity, descending
    #[must_use]
    pub fn new(games: Vec<CatalogItem>) -> Self {
        Self::with_sort(games, SortSpec::default())
    }

    /// What: Create a manager with a custom initial sort (e.g., from settings).
    ///
    /// Inputs:
    /// - `games`: Catalog items in load order
    /// - `sort`: Initial sort spec
    ///
    /// Output:
    /// - Manager with default criteria and the view computed
    #[must_use]
    pub fn with_sort(games: Vec<CatalogItem>, sort: SortSpec) -> Self {
        let mut mgr = Self {
            games,
            filtered: Vec::new(),
            filters: FilterCriteria::default(),
            sort,
            language: BASE_LANGUAGE.to_string(),
        };
        mgr.recompute();
        mgr
    }

    /// What: Enumerate the legal facet values of the catalog.
    ///
    /// Output:
    /// - Sorted, de-duplicated categories, tags and difficulties; ascending non-zero ages
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut difficulties = BTreeSet::new();
        let mut ages = BTreeSet::new();
        for g in &self.games {
            categories.insert(g.category.clone());
            tags.extend(g.tags.iter().cloned());
            if let Some(d) = &g.difficulty {
                difficulties.insert(d.clone());
            }
            if g.min_age > 0 {
                ages.insert(g.min_age);
            }
        }
        FilterOptions {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
            difficulties: difficulties.into_iter().collect(),
            min_ages: ages.into_iter().collect(),
        }
    }

    /// Copy of the active filter criteria.
    #[must_use]
    pub fn current_filters(&self) -> FilterCriteria {
        self.filters.clone()
    }

    /// Active sort spec.
    #[must_use]
    pub const fn current_sort(&self) -> SortSpec {
        self.sort
    }

    /// Counts after and before filtering.
    #[must_use]
    pub fn filter_stats(&self) -> FilterStats {
        FilterStats {
            filtered: self.filtered.len(),
            total: self.games.len(),
        }
    }

    /// Filtered and sorted view.
    #[must_use]
    pub fn filtered_games(&self) -> &[CatalogItem] {
        &self.filtered
    }

    /// Full catalog in load order.
    #[must_use]
    pub fn all_games(&self) -> &[CatalogItem] {
        &self.games
    }

    /// Language used for title ordering and text search.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// What: Replace the active criteria and recompute the view.
    ///
    /// Inputs:
    /// - `criteria`: New criteria; rating bounds are normalized to `min <= max` within 0–5
    ///
    /// Output:
    /// - Updates the view; the sort spec is left unchanged
    pub fn set_filters(&mut self, mut criteria: FilterCriteria) {
        criteria.rating = RatingRange::new(criteria.rating.min, criteria.rating.max);
        self.filters = criteria;
        self.recompute();
        tracing::debug!(
            filtered = self.filtered.len(),
            total = self.games.len(),
            "[Manager] Filters updated"
        );
    }

    /// What: Change the sort field and direction.
    ///
    /// Inputs:
    /// - `field`: Field key (see [`SortField::from_key`])
    /// - `direction`: Sort direction
    ///
    /// Output:
    /// - `true` when the sort was applied; `false` (no change) for an unknown field
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> bool {
        let Some(field) = SortField::from_key(field) else {
            tracing::debug!(field = %field, "[Manager] Ignoring unknown sort field");
            return false;
        };
        self.set_sort_spec(SortSpec { field, direction });
        true
    }

    /// Change the sort using an already-validated spec.
    pub fn set_sort_spec(&mut self, spec: SortSpec) {
        self.sort = spec;
        sort::sort_games(&mut self.filtered, self.sort, &self.language);
        tracing::debug!(
            field = spec.field.as_key(),
            direction = spec.direction.as_key(),
            "[Manager] Sort updated"
        );
    }

    /// Restore default criteria and recompute the view.
    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
        self.recompute();
    }

    /// Restore the default sort (popularity, descending).
    pub fn reset_sort(&mut self) {
        self.set_sort_spec(SortSpec::default());
    }

    /// What: Switch the language used for titles and search.
    ///
    /// Inputs:
    /// - `lang`: Language code
    ///
    /// Output:
    /// - Recomputes the view when the language changed (title order and search hits can differ)
    pub fn set_language(&mut self, lang: &str) {
        if self.language != lang {
            lang.clone_into(&mut self.language);
            self.recompute();
        }
    }

    /// What: Serialize the current filtered and sorted view.
    ///
    /// Inputs:
    /// - `format`: JSON or CSV
    ///
    /// Output:
    /// - Serialized document
    ///
    /// # Errors
    /// - Returns `Err` when JSON or CSV serialization fails
    pub fn export_filtered_games(
        &self,
        format: ExportFormat,
    ) -> Result<String, export::SerializeError> {
        export::export_games(&self.filtered, format, &self.language)
    }

    fn recompute(&mut self) {
        self.filtered = filter::apply_filters(&self.games, &self.filters, &self.language);
        sort::sort_games(&mut self.filtered, self.sort, &self.language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FeaturedFilter, RatingRange};
    use crate::test_utils::sample_games;

    fn ids(mgr: &FilterSortManager) -> Vec<&str> {
        mgr.filtered_games().iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    /// What: Facet enumeration
    ///
    /// - Input: Sample games
    /// - Output: Sorted categories, tags, difficulties and ages
    fn filter_options_are_sorted_and_unique() {
        let mgr = FilterSortManager::new(sample_games());
        let opts = mgr.filter_options();
        assert_eq!(opts.categories, vec!["action", "arcade", "casual", "puzzle"]);
        assert_eq!(
            opts.tags,
            vec!["blocks", "classic", "new", "relaxing", "retro", "shooter"]
        );
        assert_eq!(opts.difficulties, vec!["easy", "hard", "medium"]);
        assert_eq!(opts.min_ages, vec![6, 8, 12]);
    }

    #[test]
    /// What: Filters do not touch the sort, and stats follow the view
    ///
    /// - Input: Rating sort asc, then a featured-only filter
    /// - Output: Sort kept; stats 2/4
    fn set_filters_keeps_sort() {
        let mut mgr = FilterSortManager::new(sample_games());
        assert!(mgr.set_sort("rating", SortDirection::Asc));
        mgr.set_filters(FilterCriteria {
            featured: FeaturedFilter::Featured,
            ..FilterCriteria::default()
        });
        assert_eq!(mgr.current_sort().field, SortField::Rating);
        assert_eq!(ids(&mgr), vec!["game001", "game003"]);
        assert_eq!(
            mgr.filter_stats(),
            FilterStats {
                filtered: 2,
                total: 4
            }
        );
    }

    #[test]
    /// What: Unknown sort field is a no-op
    ///
    /// - Input: `set_sort("developer", Asc)`
    /// - Output: Returns false; sort and order unchanged
    fn unknown_sort_field_is_ignored() {
        let mut mgr = FilterSortManager::new(sample_games());
        let before: Vec<String> = ids(&mgr).into_iter().map(String::from).collect();
        assert!(!mgr.set_sort("developer", SortDirection::Asc));
        assert_eq!(mgr.current_sort(), SortSpec::default());
        assert_eq!(ids(&mgr), before);
    }

    #[test]
    /// What: Reset always yields the documented defaults
    ///
    /// - Input: Several different prior states
    /// - Output: Default criteria and sort each time
    fn reset_restores_defaults_from_any_state() {
        let mut mgr = FilterSortManager::new(sample_games());
        let states = [
            FilterCriteria {
                category: "puzzle".into(),
                ..FilterCriteria::default()
            },
            FilterCriteria {
                tags: ["retro".to_string()].into_iter().collect(),
                rating: RatingRange::new(1.0, 2.0),
                min_age: 12,
                featured: FeaturedFilter::NotFeatured,
                difficulty: "hard".into(),
                query: "x".into(),
                ..FilterCriteria::default()
            },
        ];
        for criteria in states {
            mgr.set_filters(criteria);
            mgr.set_sort("title", SortDirection::Asc);
            mgr.reset_filters();
            mgr.reset_sort();
            assert_eq!(mgr.current_filters(), FilterCriteria::default());
            assert_eq!(mgr.current_sort(), SortSpec::default());
            assert_eq!(mgr.filter_stats().filtered, 4);
        }
    }

    #[test]
    /// What: Inverted rating bounds are normalized on entry
    ///
    /// - Input: Criteria built with min > max
    /// - Output: Stored criteria have min <= max
    fn set_filters_normalizes_rating() {
        let mut mgr = FilterSortManager::new(sample_games());
        mgr.set_filters(FilterCriteria {
            rating: RatingRange { min: 4.6, max: 4.1 },
            ..FilterCriteria::default()
        });
        let r = mgr.current_filters().rating;
        assert!(r.min <= r.max);
        assert_eq!(ids(&mgr), vec!["game001", "game002"]);
    }

    #[test]
    /// What: JSON export mirrors the view
    ///
    /// - Input: Title sort ascending, export JSON
    /// - Output: Parsed ids equal the in-memory order
    fn export_matches_in_memory_view() {
        let mut mgr = FilterSortManager::new(sample_games());
        mgr.set_sort("title", SortDirection::Asc);
        let json = mgr
            .export_filtered_games(ExportFormat::Json)
            .expect("export json");
        let parsed: Vec<CatalogItem> = serde_json::from_str(&json).expect("parse json");
        let exported: Vec<&str> = parsed.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(exported, ids(&mgr));
    }
}
