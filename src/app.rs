//! Command-line session: wires settings, translations, the catalog and the
//! filter panel together, then prints or exports the view.

use std::path::PathBuf;

use chrono::Local;

use crate::args::output::{listing_heading, render_listing, render_options};
use crate::args::{Args, criteria_from_args, sort_from_args};
use crate::catalog::{CatalogError, load_catalog};
use crate::config::{Settings, config_dir, load_settings, preferences_path, settings_path};
use crate::i18n::{FileBundleSource, I18nError, I18nManager, TextLookup, find_locales_dir};
use crate::logic::FilterSortManager;
use crate::prefs::FilePreferenceStore;
use crate::state::{BASE_LANGUAGE, ExportFormat};
use crate::ui::{
    DirectoryTarget, ExportError, FilterPanel, FixedPrompt, Page, PanelLabels,
};

/// Container id the filter panel binds to.
pub const PANEL_CONTAINER: &str = "filter-panel";

/// Errors that end a command-line session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A requested language could not be activated.
    #[error(transparent)]
    Language(#[from] I18nError),
    /// The export could not be produced.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// The options view could not be serialized.
    #[error("failed to render options: {0}")]
    Render(#[from] serde_json::Error),
}

type Translations = I18nManager<FileBundleSource, FilePreferenceStore>;

/// What: Pick the catalog file.
///
/// Inputs:
/// - `args`: `--catalog` flag
/// - `settings`: `catalog_path` setting
///
/// Output:
/// - Flag, then setting, then the bundled sample catalog
fn catalog_path(args: &Args, settings: &Settings) -> PathBuf {
    args.catalog
        .clone()
        .or_else(|| settings.catalog_path.clone())
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("config")
                .join("games.json")
        })
}

/// What: Build the language manager from settings.
///
/// Inputs:
/// - `settings`: Languages and locales directory
///
/// Output:
/// - Uninitialized manager persisting the language choice under the config dir
fn translations(settings: &Settings) -> Translations {
    let dir = settings
        .locales_dir
        .clone()
        .or_else(find_locales_dir)
        .unwrap_or_else(|| config_dir().join("locales"));
    tracing::debug!(dir = %dir.display(), "[I18n] Using locales directory");
    I18nManager::new(
        settings.i18n_config(),
        FileBundleSource::new(dir),
        FilePreferenceStore::new(preferences_path()),
    )
}

/// What: Run one command-line session.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` after printing the requested output
///
/// # Errors
/// - Returns `Err` when `--lang` names an unusable language, the catalog cannot be
///   loaded, or the export fails
///
/// Details:
/// - A failed initial language load is not fatal; output falls back to untranslated text.
pub async fn run(args: &Args) -> Result<(), AppError> {
    let settings = load_settings(&settings_path());
    let mut i18n = translations(&settings);
    let mut page = Page::site_shell();

    if let Err(e) = i18n.init(&mut page).await {
        tracing::warn!(error = %e, "[I18n] Continuing without translations");
    }
    if let Some(lang) = &args.lang {
        i18n.switch_language(lang, &mut page).await?;
    }
    if let Some(key) = &args.text {
        println!("{}", i18n.get_text(key, None));
        return Ok(());
    }

    let path = catalog_path(args, &settings);
    let games = load_catalog(&path, settings.catalog_retries).await?;

    let lang = i18n
        .current_language()
        .unwrap_or(BASE_LANGUAGE)
        .to_string();
    let mut manager = FilterSortManager::with_sort(games, sort_from_args(args, settings.sort));
    manager.set_language(&lang);
    apply_filter_flags(&mut manager, args);

    let mut panel = FilterPanel::new(manager);
    panel.init(&page, PANEL_CONTAINER);
    panel.set_language(&lang, PanelLabels::resolve(&i18n));

    if args.options {
        println!("{}", render_options(&panel.render())?);
    } else if args.stats {
        println!("{}", panel.render().stats_text);
    } else if let Some(format) = args.export {
        export(&panel, format.into(), args, &settings)?;
    } else {
        print_listing(&panel, &i18n, &lang);
    }
    Ok(())
}

/// What: Apply the filter flags to the manager before the panel takes it over.
///
/// Inputs:
/// - `manager`: Freshly loaded manager
/// - `args`: Parsed flags
///
/// Details:
/// - Tags unknown to the catalog are kept, so they match nothing.
fn apply_filter_flags(manager: &mut FilterSortManager, args: &Args) {
    let criteria = criteria_from_args(args);
    let known = manager.filter_options().tags;
    for tag in criteria.tags.iter().filter(|t| !known.contains(t)) {
        tracing::warn!(tag = %tag, "Tag not present in the catalog; no game will match it");
    }
    manager.set_filters(criteria);
}

fn export(
    panel: &FilterPanel,
    format: ExportFormat,
    args: &Args,
    settings: &Settings,
) -> Result<(), AppError> {
    let dir = args
        .out
        .clone()
        .or_else(|| settings.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let mut target = DirectoryTarget::new(dir);
    let today = Local::now().date_naive();
    if let Some(path) = panel.export_results(&mut FixedPrompt(Some(format)), &mut target, today)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_listing(panel: &FilterPanel, texts: &impl TextLookup, lang: &str) {
    let view = panel.render();
    print!(
        "{}",
        render_listing(
            &listing_heading(texts),
            panel.manager().filtered_games(),
            lang,
            &view.stats_text,
        )
    );
}
