//! Stable ordering of the catalog view.

use std::cmp::Ordering;

use crate::state::{CatalogItem, SortDirection, SortField, SortSpec};

/// What: Compare two items on one field in ascending order.
///
/// Inputs:
/// - `a`, `b`: Items to compare
/// - `field`: Field to compare on
/// - `lang`: Language used for title comparison
///
/// Output:
/// - Ascending `Ordering` on the field alone (no tiebreak)
///
/// Details:
/// - Title and category compare case-insensitively.
/// - Ratings use a total order so NaN never poisons the sort.
#[must_use]
pub fn compare_by_field(a: &CatalogItem, b: &CatalogItem, field: SortField, lang: &str) -> Ordering {
    match field {
        SortField::PopularityScore => a.popularity().cmp(&b.popularity()),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::PlayCount => a.play_count.cmp(&b.play_count),
        SortField::Title => a
            .title
            .get(lang)
            .to_lowercase()
            .cmp(&b.title.get(lang).to_lowercase()),
        SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortField::AddedDate => a.added_date.cmp(&b.added_date),
    }
}

/// What: Apply a sort spec to `games` in-place.
///
/// Inputs:
/// - `games`: Filtered view to reorder
/// - `spec`: Field and direction
/// - `lang`: Language used for title comparison
///
/// Output:
/// - Reorders `games`; equal keys keep their relative input order in both directions.
pub fn sort_games(games: &mut [CatalogItem], spec: SortSpec, lang: &str) {
    if games.len() < 2 {
        return;
    }
    // `sort_by` is stable; descending reverses the comparison, not the slice
    match spec.direction {
        SortDirection::Asc => games.sort_by(|a, b| compare_by_field(a, b, spec.field, lang)),
        SortDirection::Desc => games.sort_by(|a, b| compare_by_field(b, a, spec.field, lang)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{game, sample_games};

    fn ids(games: &[CatalogItem]) -> Vec<String> {
        games.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    /// What: Default popularity sort keeps ties in input order
    ///
    /// - Input: Sample games with game002 and game004 both scoring 88
    /// - Output: 95, 92, then game002 before game004
    fn popularity_desc_is_stable() {
        let mut games = sample_games();
        sort_games(&mut games, SortSpec::default(), "en");
        assert_eq!(ids(&games), vec!["game001", "game003", "game002", "game004"]);
    }

    #[test]
    /// What: Stability in ascending order too
    ///
    /// - Input: Three items with equal ratings in a known order
    /// - Output: Order unchanged for both directions
    fn equal_keys_retain_input_order_both_directions() {
        let base = vec![
            game("c", "C", "arcade", 3.0, &[]),
            game("a", "A", "arcade", 3.0, &[]),
            game("b", "B", "arcade", 3.0, &[]),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut games = base.clone();
            sort_games(
                &mut games,
                SortSpec {
                    field: SortField::Rating,
                    direction,
                },
                "en",
            );
            assert_eq!(ids(&games), vec!["c", "a", "b"]);
        }
    }

    #[test]
    /// What: Title sort is case-insensitive
    ///
    /// - Input: Titles "bubble pop", "Snake", "Space Shooter", "Tetris"
    /// - Output: Alphabetical ignoring case
    fn title_sort_ignores_case() {
        let mut games = sample_games();
        sort_games(
            &mut games,
            SortSpec {
                field: SortField::Title,
                direction: SortDirection::Asc,
            },
            "en",
        );
        assert_eq!(ids(&games), vec!["game004", "game001", "game003", "game002"]);
    }

    #[test]
    /// What: Numeric and date fields
    ///
    /// - Input: Rating asc; play count desc; added date asc with distinct dates
    /// - Output: Expected orders
    fn numeric_and_date_fields() {
        let mut games = sample_games();
        sort_games(
            &mut games,
            SortSpec {
                field: SortField::Rating,
                direction: SortDirection::Asc,
            },
            "en",
        );
        assert_eq!(ids(&games), vec!["game004", "game002", "game001", "game003"]);

        sort_games(
            &mut games,
            SortSpec {
                field: SortField::PlayCount,
                direction: SortDirection::Desc,
            },
            "en",
        );
        assert_eq!(ids(&games), vec!["game004", "game001", "game002", "game003"]);

        games[0].added_date = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default();
        sort_games(
            &mut games,
            SortSpec {
                field: SortField::AddedDate,
                direction: SortDirection::Desc,
            },
            "en",
        );
        assert_eq!(games[0].id, "game004");
    }
}
