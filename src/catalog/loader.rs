use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::state::{CatalogItem, RatingRange, derive_popularity};

/// Delay before the first retry; each further retry waits one more step.
const RETRY_STEP: Duration = Duration::from_millis(200);

/// Errors raised while reading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The document could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Catalog location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not a valid catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but contained no usable item.
    #[error("catalog contains no games")]
    Empty,
}

/// Accepted top-level shapes of a catalog document.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    /// Bare array of games.
    List(Vec<CatalogItem>),
    /// Object wrapping the array under `games`.
    Wrapped {
        /// Games.
        games: Vec<CatalogItem>,
    },
}

/// What: Parse and normalize a catalog document.
///
/// Inputs:
/// - `json`: Document text; either an array of games or `{"games": [...]}`
///
/// Output:
/// - Normalized items in document order
///
/// # Errors
/// - Returns `Err(Parse)` when the JSON does not match the catalog shape
/// - Returns `Err(Empty)` when no usable item remains after normalization
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(json)?;
    let items = match doc {
        CatalogDocument::List(items) | CatalogDocument::Wrapped { games: items } => items,
    };
    let items = normalize_items(items);
    if items.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(items)
}

/// What: Enforce catalog invariants on raw items.
///
/// Inputs:
/// - `items`: Items as parsed
///
/// Output:
/// - Items with unique non-empty ids, ratings clamped to 0–5 and rounded to one decimal,
///   de-duplicated tags and a popularity score filled in
///
/// Details:
/// - The first occurrence of a duplicated id wins; later ones are dropped with a warning.
#[must_use]
pub fn normalize_items(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for mut item in items {
        let id = item.id.trim().to_string();
        if id.is_empty() {
            tracing::warn!("[Catalog] Skipping game without id");
            continue;
        }
        if !seen.insert(id.clone()) {
            tracing::warn!(id = %id, "[Catalog] Skipping duplicate game id");
            continue;
        }
        item.id = id;
        if !(RatingRange::FLOOR..=RatingRange::CEILING).contains(&item.rating) {
            tracing::warn!(id = %item.id, rating = item.rating, "[Catalog] Rating out of range, clamping");
        }
        item.rating = if item.rating.is_nan() {
            RatingRange::FLOOR
        } else {
            (item.rating.clamp(RatingRange::FLOOR, RatingRange::CEILING) * 10.0).round() / 10.0
        };
        let mut tag_seen = HashSet::new();
        item.tags.retain(|t| !t.trim().is_empty() && tag_seen.insert(t.clone()));
        if item.popularity_score.is_none() {
            item.popularity_score = Some(derive_popularity(item.rating, item.play_count));
        }
        out.push(item);
    }
    out
}

/// What: Read a catalog file, retrying transient read failures.
///
/// Inputs:
/// - `path`: Catalog document location
/// - `retries`: Additional attempts after the first failed read
///
/// Output:
/// - Normalized items
///
/// # Errors
/// - Returns `Err(Io)` when every read attempt fails
/// - Returns `Err(Parse)`/`Err(Empty)` for an invalid document (not retried)
///
/// Details:
/// - Waits `200ms * attempt` between attempts.
pub async fn load_catalog(path: &Path, retries: u32) -> Result<Vec<CatalogItem>, CatalogError> {
    let mut attempt = 0u32;
    let contents = loop {
        match tokio::fs::read_to_string(path).await {
            Ok(s) => break s,
            Err(e) if attempt < retries => {
                attempt += 1;
                tracing::warn!(
                    path = %path.display(),
                    attempt,
                    error = %e,
                    "[Catalog] Read failed, retrying"
                );
                tokio::time::sleep(RETRY_STEP * attempt).await;
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    };
    let items = parse_catalog(&contents)?;
    tracing::info!(
        path = %path.display(),
        games = items.len(),
        "[Catalog] Loaded catalog"
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"[
        {"id": "game001", "title": {"en": "Snake", "zh": "贪吃蛇"}, "category": "arcade",
         "rating": 4.54, "playCount": 100, "tags": ["classic", "classic", "retro"],
         "addedDate": "2024-01-15"},
        {"id": "game001", "title": "Duplicate", "category": "arcade", "rating": 1.0,
         "addedDate": "2024-01-15"},
        {"id": "game002", "title": "Tetris", "category": "puzzle", "rating": 7.0,
         "popularityScore": 88, "featured": true, "new": true, "minAge": 8,
         "difficulty": "medium", "addedDate": "2024-02-01"}
    ]"#;

    #[test]
    /// What: Normalization of a raw catalog
    ///
    /// - Input: Duplicate id, out-of-range rating, duplicate tags, missing score
    /// - Output: First id kept, rating clamped/rounded, tags unique, score derived
    fn parse_catalog_normalizes_items() {
        let items = parse_catalog(DOC).expect("catalog should parse");
        assert_eq!(items.len(), 2);
        let snake = &items[0];
        assert_eq!(snake.title.get("zh"), "贪吃蛇");
        assert!((snake.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(snake.tags, vec!["classic", "retro"]);
        assert_eq!(snake.popularity_score, Some(derive_popularity(4.5, 100)));

        let tetris = &items[1];
        assert!((tetris.rating - 5.0).abs() < f64::EPSILON);
        assert_eq!(tetris.popularity_score, Some(88));
        assert!(tetris.featured && tetris.is_new);
        assert_eq!(tetris.min_age, 8);
    }

    #[test]
    /// What: Wrapped documents and empty catalogs
    ///
    /// - Input: `{"games": [...]}`; `[]`; malformed JSON
    /// - Output: Parsed; `Empty`; `Parse`
    fn parse_catalog_shapes_and_errors() {
        let wrapped = r#"{"games": [{"id": "a", "title": "A", "category": "c",
            "rating": 3, "addedDate": "2023-05-05"}]}"#;
        assert_eq!(parse_catalog(wrapped).expect("wrapped").len(), 1);
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
        assert!(matches!(parse_catalog("{oops"), Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    /// What: Missing file after retries
    ///
    /// - Input: Nonexistent path, one retry
    /// - Output: `Io` error naming the path
    async fn load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let err = load_catalog(&path, 1).await.expect_err("should fail");
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    async fn load_catalog_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("games.json");
        std::fs::write(&path, DOC).expect("write catalog");
        let items = load_catalog(&path, 0).await.expect("load");
        assert_eq!(items.len(), 2);
    }
}
