//! Plain-text rendering of the catalog view for the terminal.

use crate::i18n::TextLookup;
use crate::state::CatalogItem;
use crate::ui::FilterPanelView;

/// What: Render the filtered view as a table.
///
/// Inputs:
/// - `heading`: Translated heading line
/// - `games`: Filtered, sorted items
/// - `lang`: Language for titles
/// - `stats_text`: Translated "N of M" line
///
/// Output:
/// - Text ready to print, one game per line
pub fn render_listing(heading: &str, games: &[CatalogItem], lang: &str, stats_text: &str) -> String {
    let rule = "-".repeat(heading.chars().count().max(8));
    let rows = games.iter().map(|g| {
        let flags: Vec<&str> = [(g.featured, "*"), (g.is_new, "new"), (g.hot, "hot")]
            .into_iter()
            .filter_map(|(on, flag)| on.then_some(flag))
            .collect();
        format!(
            "{:<10} {:<24} {:<10} {:>3.1} {:>4} {}",
            g.id,
            g.title.get(lang),
            g.category,
            g.rating,
            g.popularity(),
            flags.join(",")
        )
    });
    let mut lines = vec![heading.to_string(), rule];
    lines.extend(rows);
    lines.push(stats_text.to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// What: Render the panel's choices for `--options`.
///
/// Inputs:
/// - `view`: Panel view model
///
/// Output:
/// - Pretty JSON of the view
///
/// # Errors
/// - Returns `Err` when serialization fails
pub fn render_options(view: &FilterPanelView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

/// What: Translate the heading for a listing.
///
/// Inputs:
/// - `texts`: Active translations
///
/// Output:
/// - `games.heading` text, or the English default
pub fn listing_heading(texts: &impl TextLookup) -> String {
    texts.text("games.heading", Some("Games"))
}
