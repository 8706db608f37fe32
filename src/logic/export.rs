//! Serialization of the filtered view into downloadable documents.

use chrono::NaiveDate;
use serde::Serialize;

use crate::state::{CatalogItem, ExportFormat};

/// CSV column header, in output order.
pub const CSV_HEADER: &str =
    "id,title,category,rating,playCount,popularityScore,featured,new,hot,tags,addedDate";

/// Errors raised while serializing the view.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// CSV serialization failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// The CSV buffer was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One flattened CSV line; field order follows [`CSV_HEADER`].
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    rating: String,
    play_count: u64,
    popularity_score: u32,
    featured: bool,
    new: bool,
    hot: bool,
    tags: String,
    added_date: String,
}

impl<'a> CsvRow<'a> {
    fn new(g: &'a CatalogItem, lang: &str) -> Self {
        Self {
            id: &g.id,
            title: g.title.get(lang),
            category: &g.category,
            rating: format!("{:.1}", g.rating),
            play_count: g.play_count,
            popularity_score: g.popularity(),
            featured: g.featured,
            new: g.is_new,
            hot: g.hot,
            tags: g.tags.join(";"),
            added_date: g.added_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// What: Serialize games in the requested format.
///
/// Inputs:
/// - `games`: Filtered and sorted items
/// - `format`: JSON or CSV
/// - `lang`: Language used for CSV titles
///
/// Output:
/// - Serialized document
///
/// # Errors
/// - Returns `Err` when JSON or CSV serialization fails
pub fn export_games(
    games: &[CatalogItem],
    format: ExportFormat,
    lang: &str,
) -> Result<String, SerializeError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(games)?),
        ExportFormat::Csv => to_csv(games, lang),
    }
}

/// What: Flatten games into a CSV table.
///
/// Inputs:
/// - `games`: Items to write
/// - `lang`: Language used for titles
///
/// Output:
/// - CSV text with [`CSV_HEADER`] and one line per item, `\n` terminated
///
/// # Errors
/// - Returns `Err` when the writer fails
///
/// Details:
/// - The header is written even for an empty view.
/// - Tags are joined with `;`; dates are ISO `YYYY-MM-DD`.
pub fn to_csv(games: &[CatalogItem], lang: &str) -> Result<String, SerializeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(64 * (games.len() + 1)));
    writer.write_record(CSV_HEADER.split(','))?;
    for g in games {
        writer.serialize(CsvRow::new(g, lang))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Download file name for an export made on `date` (e.g., `games-export-2026-01-31.csv`).
#[must_use]
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "games-export-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
