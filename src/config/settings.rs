//! `settings.conf` model and parser.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::parsing::{parse_key_value, skip_comment_or_empty, strip_inline_comment};
use crate::config::paths::resolve_config_path;
use crate::i18n::{I18nConfig, is_valid_language_code};
use crate::state::{SortDirection, SortField, SortSpec};

/// Default number of catalog load retries after the first attempt.
pub const DEFAULT_CATALOG_RETRIES: u32 = 2;

/// User settings; every field has a working default.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Language used when nothing else resolves.
    pub default_language: String,
    /// Languages offered.
    pub supported_languages: Vec<String>,
    /// Directory holding `{code}.json` language files.
    pub locales_dir: Option<PathBuf>,
    /// Catalog document.
    pub catalog_path: Option<PathBuf>,
    /// Where exports are written.
    pub export_dir: Option<PathBuf>,
    /// Initial sort of the catalog view.
    pub sort: SortSpec,
    /// Catalog load retries after the first attempt.
    pub catalog_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let config = I18nConfig::default();
        Self {
            default_language: config.default_language,
            supported_languages: config.supported_languages,
            locales_dir: None,
            catalog_path: None,
            export_dir: None,
            sort: SortSpec::default(),
            catalog_retries: DEFAULT_CATALOG_RETRIES,
        }
    }
}

impl Settings {
    /// What: Language configuration derived from these settings.
    ///
    /// Output:
    /// - `I18nConfig` whose supported list always contains the default language
    #[must_use]
    pub fn i18n_config(&self) -> I18nConfig {
        let mut supported = self.supported_languages.clone();
        if !supported.contains(&self.default_language) {
            supported.insert(0, self.default_language.clone());
        }
        I18nConfig {
            default_language: self.default_language.clone(),
            supported_languages: supported,
        }
    }
}

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: File text
/// - `base`: Directory relative paths are resolved against
///
/// Output:
/// - Settings; unknown keys and invalid values leave the defaults in place
pub fn parse_settings(content: &str, base: &Path) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, raw_val)) = parse_key_value(line) else {
            continue;
        };
        let key = raw_key.to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(&raw_val);
        match key.as_str() {
            "default_language" | "language" => {
                let code = val.to_lowercase();
                if is_valid_language_code(&code) {
                    out.default_language = code;
                } else {
                    tracing::warn!(value = %val, "[Config] Invalid default_language; keeping default");
                }
            }
            "supported_languages" | "languages" => {
                let codes: Vec<String> = val
                    .split(',')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| is_valid_language_code(c))
                    .collect();
                if codes.is_empty() {
                    tracing::warn!(value = %val, "[Config] No valid supported_languages; keeping default");
                } else {
                    out.supported_languages = codes;
                }
            }
            "locales_dir" => out.locales_dir = non_empty_path(val, base),
            "catalog_path" | "catalog" => out.catalog_path = non_empty_path(val, base),
            "export_dir" => out.export_dir = non_empty_path(val, base),
            "sort_field" | "sort" => match SortField::from_key(val) {
                Some(field) => out.sort.field = field,
                None => tracing::warn!(value = %val, "[Config] Unknown sort_field; keeping default"),
            },
            "sort_direction" | "sort_order" => match SortDirection::from_key(val) {
                Some(direction) => out.sort.direction = direction,
                None => {
                    tracing::warn!(value = %val, "[Config] Unknown sort_direction; keeping default");
                }
            },
            "catalog_retries" => {
                if let Ok(v) = val.parse::<u32>() {
                    out.catalog_retries = v.min(10);
                }
            }
            _ => tracing::debug!(key = %key, "[Config] Ignoring unknown settings key"),
        }
    }
    out
}

fn non_empty_path(val: &str, base: &Path) -> Option<PathBuf> {
    if val.is_empty() {
        None
    } else {
        Some(resolve_config_path(val, base))
    }
}

/// What: Load settings from a file.
///
/// Inputs:
/// - `path`: `settings.conf` location
///
/// Output:
/// - Parsed settings, or defaults when the file is missing or unreadable
pub fn load_settings(path: &Path) -> Settings {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    match fs::read_to_string(path) {
        Ok(content) => {
            let settings = parse_settings(&content, base);
            tracing::debug!(path = %path.display(), "[Config] Loaded settings");
            settings
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "[Config] Using default settings");
            Settings::default()
        }
    }
}
