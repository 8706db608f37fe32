//! Filter, sort and export behavior over the bundled sample catalog.

use std::path::PathBuf;

use gamehub::catalog::load_catalog;
use gamehub::logic::{FilterSortManager, export::CSV_HEADER};
use gamehub::state::{
    CatalogItem, ExportFormat, FilterCriteria, RatingRange, SortDirection, SortField, SortSpec,
};

fn catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("games.json")
}

async fn bundled_games() -> Vec<CatalogItem> {
    load_catalog(&catalog_path(), 0)
        .await
        .expect("bundled catalog loads")
}

fn ids(games: &[CatalogItem]) -> Vec<&str> {
    games.iter().map(|g| g.id.as_str()).collect()
}

#[tokio::test]
/// What: Bundled catalog normalization
///
/// - Input: `config/games.json`
/// - Output: Eight games, each with a popularity score
async fn bundled_catalog_loads_and_derives_popularity() {
    let games = bundled_games().await;
    assert_eq!(games.len(), 8);
    assert!(games.iter().all(|g| g.popularity_score.is_some()));
    assert_eq!(games[0].popularity_score, Some(95));
}

#[tokio::test]
/// What: Combined facets with rating sort
///
/// - Input: Puzzle games rated 4.0..=5.0, rating descending
/// - Output: [game005, game002]; stats 2 of 8
async fn puzzle_games_sorted_by_rating() {
    let mut mgr = FilterSortManager::new(bundled_games().await);
    mgr.set_filters(FilterCriteria {
        category: "puzzle".into(),
        rating: RatingRange::new(4.0, 5.0),
        ..FilterCriteria::default()
    });
    assert!(mgr.set_sort("rating", SortDirection::Desc));
    assert_eq!(ids(mgr.filtered_games()), vec!["game005", "game002"]);
    let stats = mgr.filter_stats();
    assert_eq!((stats.filtered, stats.total), (2, 8));
}

#[tokio::test]
/// What: Tag, age and difficulty semantics
///
/// - Input: Tags retro|logic; exact age 10; difficulty easy
/// - Output: Tags match any; age matches exactly; undeclared difficulty only passes `all`
async fn facet_semantics() {
    let games = bundled_games().await;
    let mut mgr = FilterSortManager::with_sort(
        games,
        SortSpec {
            field: SortField::Title,
            direction: SortDirection::Asc,
        },
    );

    let mut criteria = FilterCriteria::default();
    criteria.tags.extend(["retro".to_string(), "logic".to_string()]);
    mgr.set_filters(criteria);
    assert_eq!(ids(mgr.filtered_games()), vec!["game006", "game001", "game005"]);

    mgr.set_filters(FilterCriteria {
        min_age: 10,
        ..FilterCriteria::default()
    });
    assert_eq!(ids(mgr.filtered_games()), vec!["game008", "game005"]);

    mgr.set_filters(FilterCriteria {
        difficulty: "easy".into(),
        ..FilterCriteria::default()
    });
    assert_eq!(ids(mgr.filtered_games()), vec!["game004", "game001"]);
    assert!(!ids(mgr.filtered_games()).contains(&"game007"));
}

#[tokio::test]
/// What: Stable ordering for equal keys
///
/// - Input: Category ascending straight from load order
/// - Output: Ties keep catalog order
async fn category_sort_is_stable() {
    let mgr = FilterSortManager::with_sort(
        bundled_games().await,
        SortSpec {
            field: SortField::Category,
            direction: SortDirection::Asc,
        },
    );
    assert_eq!(
        ids(mgr.filtered_games()),
        vec![
            "game003", "game008", "game001", "game006", "game004", "game007", "game002",
            "game005"
        ]
    );
}

#[tokio::test]
/// What: Exports mirror the view
///
/// - Input: Arcade games, exported as JSON and CSV
/// - Output: Same ids in the same order; CSV header plus one row per game
async fn exports_mirror_the_filtered_view() {
    let mut mgr = FilterSortManager::new(bundled_games().await);
    mgr.set_filters(FilterCriteria {
        category: "arcade".into(),
        ..FilterCriteria::default()
    });

    let json = mgr
        .export_filtered_games(ExportFormat::Json)
        .expect("json export");
    let parsed: Vec<CatalogItem> = serde_json::from_str(&json).expect("json parses");
    assert_eq!(ids(&parsed), ids(mgr.filtered_games()));

    let csv = mgr
        .export_filtered_games(ExportFormat::Csv)
        .expect("csv export");
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 1 + mgr.filtered_games().len());
    assert!(lines[1].starts_with(mgr.filtered_games()[0].id.as_str()));
}

#[tokio::test]
/// What: Search follows the manager language
///
/// - Input: Query "serpent" in English, then in French
/// - Output: No hit in English; game001 in French
async fn query_uses_active_language() {
    let mut mgr = FilterSortManager::new(bundled_games().await);
    mgr.set_filters(FilterCriteria {
        query: "serpent".into(),
        ..FilterCriteria::default()
    });
    assert!(mgr.filtered_games().is_empty());
    mgr.set_language("fr");
    assert_eq!(ids(mgr.filtered_games()), vec!["game001"]);
}
