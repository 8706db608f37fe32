//! Internationalization (i18n) for the site.
//!
//! # Overview
//!
//! - **Language files**: one JSON document per language in `{locales_dir}/{code}.json`
//!   (`{code}.yml` is accepted too), holding nested objects addressed by dot paths:
//!
//! ```json
//! { "nav": { "home": "Home" } }
//! ```
//!
//!   This becomes accessible as `nav.home`.
//! - **Loading**: bundles are cached per language; concurrent requests for the same
//!   language share one in-flight load, and failed loads are retried on the next request.
//! - **Resolution**: saved preference, then system locale, then the default language.
//! - **Lookup**: a missing key yields the caller's fallback, or the key itself.
//!
//! # Adding a New Language
//!
//! 1. Create `config/locales/{code}.json` by copying `en.json` and translating every string
//! 2. Add the code to `supported_languages` in `settings.conf`

mod bundle;
pub mod detection;
mod error;
mod loader;
mod manager;

pub use bundle::LanguageBundle;
pub use detection::{detect_system_language, parse_locale_string};
pub use error::I18nError;
pub use loader::{
    BundleCache, BundleSource, FileBundleSource, is_valid_language_code, load_language_file,
};
pub use manager::{I18nConfig, I18nManager, I18nState, LANGUAGE_PREF_KEY};

use std::fmt;
use std::path::PathBuf;

/// Languages shipped with the site.
pub const SUPPORTED_LANGUAGES: [&str; 4] = ["en", "zh", "es", "fr"];

/// Anything that can turn a translation key into display text.
pub trait TextLookup {
    /// What: Resolve `key`.
    ///
    /// Inputs:
    /// - `key`: Dot-path key
    /// - `fallback`: Text used when the key does not resolve; the key itself when `None`
    fn text(&self, key: &str, fallback: Option<&str>) -> String;
}

impl TextLookup for LanguageBundle {
    fn text(&self, key: &str, fallback: Option<&str>) -> String {
        self.get_text(key, fallback)
    }
}

/// What: Substitute named `{placeholder}` occurrences in a template.
///
/// Inputs:
/// - `template`: Text with `{name}` placeholders
/// - `args`: Placeholder names and values
///
/// Output:
/// - Formatted text; unknown placeholders are left as-is
///
/// Details:
/// - Every occurrence of a placeholder is replaced: "{n} of {n}" -> "3 of 3"
pub fn format_text(template: &str, args: &[(&str, &dyn fmt::Display)]) -> String {
    let mut result = template.to_string();
    for (name, value) in args {
        result = result.replace(&format!("{{{name}}}"), &value.to_string());
    }
    result
}

/// What: Find the locales directory in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory found, or `None` if not found
///
/// Details:
/// - Tries locations in order:
///   1. Development location: `CARGO_MANIFEST_DIR/config/locales`
///   2. Installed location: `/usr/share/gamehub/locales`
pub fn find_locales_dir() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("locales");
    if dev_path.is_dir() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from("/usr/share/gamehub/locales");
    if installed_path.is_dir() {
        return Some(installed_path);
    }

    None
}
