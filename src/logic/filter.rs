//! Facet predicates applied to the catalog working set.

use crate::state::{ALL, CatalogItem, FilterCriteria};

/// What: Decide whether one item passes every active facet.
///
/// Inputs:
/// - `item`: Catalog item under test
/// - `criteria`: Active filter criteria
/// - `lang`: Language used for the text search
///
/// Output:
/// - `true` when all facets accept the item
///
/// Details:
/// - Category and difficulty accept everything when set to `"all"`.
/// - Tags use OR semantics: an empty selection accepts everything, otherwise any shared tag passes.
/// - Rating bounds are inclusive.
/// - A selected age of 0 accepts everything; any other value requires an exact match.
#[must_use]
pub fn matches(item: &CatalogItem, criteria: &FilterCriteria, lang: &str) -> bool {
    category_matches(item, &criteria.category)
        && tags_match(item, criteria)
        && criteria.rating.contains(item.rating)
        && difficulty_matches(item, &criteria.difficulty)
        && age_matches(item, criteria.min_age)
        && criteria.featured.accepts(item.featured)
        && query_matches(item, &criteria.query, lang)
}

/// What: Filter `games` into a new vector preserving input order.
///
/// Inputs:
/// - `games`: Full working set
/// - `criteria`: Active filter criteria
/// - `lang`: Language used for the text search
///
/// Output:
/// - Cloned items that pass [`matches`], in their original relative order
#[must_use]
pub fn apply_filters(games: &[CatalogItem], criteria: &FilterCriteria, lang: &str) -> Vec<CatalogItem> {
    let mut filtered: Vec<CatalogItem> = Vec::with_capacity(games.len());
    for it in games {
        if matches(it, criteria, lang) {
            filtered.push(it.clone());
        }
    }
    tracing::trace!(
        total = games.len(),
        filtered = filtered.len(),
        "[Filter] Applied filter criteria"
    );
    filtered
}

fn category_matches(item: &CatalogItem, category: &str) -> bool {
    category == ALL || item.category == category
}

fn tags_match(item: &CatalogItem, criteria: &FilterCriteria) -> bool {
    criteria.tags.is_empty() || item.tags.iter().any(|t| criteria.tags.contains(t))
}

/// Items without a declared difficulty only pass the `"all"` selector.
fn difficulty_matches(item: &CatalogItem, difficulty: &str) -> bool {
    difficulty == ALL || item.difficulty.as_deref() == Some(difficulty)
}

const fn age_matches(item: &CatalogItem, min_age: u32) -> bool {
    min_age == 0 || item.min_age == min_age
}

fn query_matches(item: &CatalogItem, query: &str, lang: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    item.title.get(lang).to_lowercase().contains(&q)
        || item.description.get(lang).to_lowercase().contains(&q)
        || item.tags.iter().any(|t| t.to_lowercase().contains(&q))
}
