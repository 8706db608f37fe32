//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

#[cfg(test)]
use chrono::NaiveDate;

#[cfg(test)]
use crate::state::{CatalogItem, LocalizedText};

#[cfg(test)]
/// What: Build one catalog item with the fields most tests care about.
///
/// Inputs:
/// - `id`, `title`, `category`, `rating`, `tags`: Item identity and facets
///
/// Output:
/// - `CatalogItem` with zero plays, no flags and a fixed added date
pub fn game(id: &str, title: &str, category: &str, rating: f64, tags: &[&str]) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: LocalizedText::from_pairs([("en", title)]),
        description: LocalizedText::from_pairs([("en", format!("{title} description"))]),
        category: category.to_string(),
        rating,
        play_count: 0,
        featured: false,
        is_new: false,
        hot: false,
        tags: tags.iter().map(ToString::to_string).collect(),
        added_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        popularity_score: None,
        difficulty: None,
        min_age: 0,
        thumbnail: None,
        url: None,
    }
}

#[cfg(test)]
/// What: Provide the four-game baseline catalog used by filter and sort tests.
///
/// Inputs: None
///
/// Output:
/// - `game001`..`game004` rated 4.5/4.2/4.8/4.0 in arcade/puzzle/action/casual
pub fn sample_games() -> Vec<CatalogItem> {
    let mut g1 = game("game001", "Snake", "arcade", 4.5, &["classic", "retro"]);
    g1.play_count = 15_000;
    g1.featured = true;
    g1.hot = true;
    g1.difficulty = Some("easy".into());
    g1.min_age = 6;
    g1.popularity_score = Some(95);

    let mut g2 = game("game002", "Tetris", "puzzle", 4.2, &["classic", "blocks"]);
    g2.play_count = 12_000;
    g2.difficulty = Some("medium".into());
    g2.min_age = 8;
    g2.popularity_score = Some(88);

    let mut g3 = game("game003", "Space Shooter", "action", 4.8, &["shooter", "new"]);
    g3.play_count = 9_000;
    g3.featured = true;
    g3.is_new = true;
    g3.difficulty = Some("hard".into());
    g3.min_age = 12;
    g3.popularity_score = Some(92);

    let mut g4 = game("game004", "bubble pop", "casual", 4.0, &["relaxing"]);
    g4.play_count = 20_000;
    g4.difficulty = Some("easy".into());
    g4.min_age = 6;
    g4.popularity_score = Some(88);

    vec![g1, g2, g3, g4]
}
