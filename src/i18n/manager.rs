//! Language state machine: loading, switching and applying translations.

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::events::{EventBus, LanguageChange};
use crate::i18n::detection::detect_system_language;
use crate::i18n::{BundleCache, BundleSource, I18nError, LanguageBundle, TextLookup, format_text};
use crate::prefs::PreferenceStore;
use crate::ui::page::Page;

/// Preference key holding the last chosen language code.
pub const LANGUAGE_PREF_KEY: &str = "language";

/// Supported and default languages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct I18nConfig {
    /// Language used when nothing else resolves and for the one-time load fallback.
    pub default_language: String,
    /// Languages the site offers.
    pub supported_languages: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported_languages: super::SUPPORTED_LANGUAGES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Lifecycle state of the language manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum I18nState {
    /// `init` has not run yet.
    Uninitialized,
    /// A bundle for this language is being loaded.
    Loading(String),
    /// This language is active.
    Ready(String),
    /// Initial load failed for the requested and the default language.
    Failed,
}

impl fmt::Display for I18nState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Loading(lang) => write!(f, "loading({lang})"),
            Self::Ready(lang) => write!(f, "ready({lang})"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Owns the active language, the bundle cache and the language preference.
pub struct I18nManager<S, P> {
    /// Supported/default languages.
    config: I18nConfig,
    /// Memoized bundles with single in-flight loads.
    cache: BundleCache<S>,
    /// Persisted language choice.
    prefs: P,
    /// Lifecycle state.
    state: I18nState,
    /// Bundle of the active language.
    current: Option<Arc<LanguageBundle>>,
    /// Language-change listeners.
    events: EventBus<LanguageChange>,
}

impl<S: BundleSource, P: PreferenceStore> I18nManager<S, P> {
    /// What: Create an uninitialized manager.
    ///
    /// Inputs:
    /// - `config`: Supported and default languages
    /// - `source`: Where language documents come from
    /// - `prefs`: Where the language choice is persisted
    ///
    /// Output:
    /// - Manager in [`I18nState::Uninitialized`]; lookups return fallbacks until `init`
    pub fn new(config: I18nConfig, source: S, prefs: P) -> Self {
        Self {
            config,
            cache: BundleCache::new(source),
            prefs,
            state: I18nState::Uninitialized,
            current: None,
            events: EventBus::default(),
        }
    }

    /// Lifecycle state.
    pub const fn state(&self) -> &I18nState {
        &self.state
    }

    /// Active language code, once a bundle is loaded.
    pub fn current_language(&self) -> Option<&str> {
        self.current.as_deref().map(LanguageBundle::code)
    }

    /// Supported language codes.
    pub fn supported_languages(&self) -> &[String] {
        &self.config.supported_languages
    }

    /// Default language code.
    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    /// Whether `lang` is one of the supported codes.
    pub fn is_supported(&self, lang: &str) -> bool {
        self.config.supported_languages.iter().any(|s| s == lang)
    }

    /// Register a language-change listener.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChange> {
        self.events.subscribe()
    }

    /// Persisted preference store.
    pub const fn preferences(&self) -> &P {
        &self.prefs
    }

    /// What: Load (or reuse) the bundle for a supported language.
    ///
    /// Inputs:
    /// - `lang`: Language code
    ///
    /// Output:
    /// - Shared bundle; concurrent callers for the same language share one load
    ///
    /// # Errors
    /// - Returns `Err(UnsupportedLanguage)` for codes outside the supported set
    /// - Returns the source error when loading fails
    pub async fn load_language(&self, lang: &str) -> Result<Arc<LanguageBundle>, I18nError> {
        self.ensure_supported(lang)?;
        self.cache.load(lang).await
    }

    /// What: Translate a dot-path key in the active language.
    ///
    /// Inputs:
    /// - `key`: Dot-path key (e.g., `nav.home`)
    /// - `fallback`: Text used when the key does not resolve; the key itself when `None`
    ///
    /// Output:
    /// - Translated text or the fallback (also before any bundle is loaded)
    pub fn get_text(&self, key: &str, fallback: Option<&str>) -> String {
        match &self.current {
            Some(bundle) => bundle.get_text(key, fallback),
            None => fallback.unwrap_or(key).to_string(),
        }
    }

    /// What: Translate a key and substitute `{name}` placeholders.
    ///
    /// Inputs:
    /// - `key`, `fallback`: As for [`Self::get_text`]
    /// - `args`: Placeholder names and values
    ///
    /// Output:
    /// - Formatted text
    pub fn get_text_fmt(
        &self,
        key: &str,
        fallback: Option<&str>,
        args: &[(&str, &dyn fmt::Display)],
    ) -> String {
        format_text(&self.get_text(key, fallback), args)
    }

    /// What: Pick the language to start with.
    ///
    /// Output:
    /// - Persisted choice if supported, else the system language if supported, else the default
    pub fn preferred_language(&self) -> String {
        if let Some(saved) = self.prefs.get(LANGUAGE_PREF_KEY) {
            if self.is_supported(&saved) {
                return saved;
            }
            tracing::warn!(language = %saved, "[I18n] Ignoring unsupported saved language");
        }
        detect_system_language(&self.config.supported_languages)
            .unwrap_or_else(|| self.config.default_language.clone())
    }

    /// What: Run the initial load and apply it to `page`.
    ///
    /// Inputs:
    /// - `page`: Page to translate
    ///
    /// Output:
    /// - Active language code
    ///
    /// # Errors
    /// - Returns the last load error when both the preferred and the default language fail;
    ///   the manager is then in [`I18nState::Failed`] and lookups return fallbacks
    ///
    /// Details:
    /// - A failing non-default language is retried once with the default language.
    /// - No language-change event is raised for the initial load.
    pub async fn init(&mut self, page: &mut Page) -> Result<String, I18nError> {
        let wanted = self.preferred_language();
        self.state = I18nState::Loading(wanted.clone());
        let bundle = match self.cache.load(&wanted).await {
            Ok(bundle) => bundle,
            Err(e) if wanted != self.config.default_language => {
                let default = self.config.default_language.clone();
                tracing::warn!(
                    language = %wanted,
                    fallback = %default,
                    error = %e,
                    "[I18n] Initial language failed, falling back to default"
                );
                self.state = I18nState::Loading(default.clone());
                match self.cache.load(&default).await {
                    Ok(bundle) => bundle,
                    Err(e) => return Err(self.fail(e)),
                }
            }
            Err(e) => return Err(self.fail(e)),
        };
        let lang = bundle.code().to_string();
        self.current = Some(bundle);
        self.state = I18nState::Ready(lang.clone());
        let applied = self.apply_language(page);
        tracing::info!(language = %lang, elements = applied, "[I18n] Language initialized");
        Ok(lang)
    }

    /// What: Switch the active language.
    ///
    /// Inputs:
    /// - `lang`: Target language code
    /// - `page`: Page to re-translate
    ///
    /// Output:
    /// - `Ok(true)` when switched; `Ok(false)` when `lang` was already active (no reload, no event)
    ///
    /// # Errors
    /// - Returns `Err(UnsupportedLanguage)` without any state change
    /// - Returns the load error when the bundle cannot be loaded; the previous language stays active
    ///
    /// Details:
    /// - On success: persists the choice, re-applies the page and emits a [`LanguageChange`].
    pub async fn switch_language(&mut self, lang: &str, page: &mut Page) -> Result<bool, I18nError> {
        self.ensure_supported(lang)?;
        if self.current_language() == Some(lang) {
            tracing::debug!(language = %lang, "[I18n] Language already active");
            return Ok(false);
        }

        let previous_state = self.state.clone();
        let previous_language = self.current_language().map(ToString::to_string);
        self.state = I18nState::Loading(lang.to_string());
        let bundle = match self.cache.load(lang).await {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(
                    language = %lang,
                    error = %e,
                    "[I18n] Language switch aborted, keeping previous language"
                );
                self.state = previous_state;
                return Err(e);
            }
        };

        self.current = Some(bundle);
        self.state = I18nState::Ready(lang.to_string());
        if let Err(e) = self.prefs.set(LANGUAGE_PREF_KEY, lang) {
            tracing::warn!(language = %lang, error = %e, "[I18n] Failed to persist language choice");
        }
        self.apply_language(page);
        let listeners = self.events.emit(LanguageChange {
            language: lang.to_string(),
            previous_language: previous_language.clone(),
        });
        tracing::info!(
            language = %lang,
            previous = ?previous_language,
            listeners,
            "[I18n] Language switched"
        );
        Ok(true)
    }

    /// What: Write translated text into every tagged element of `page`.
    ///
    /// Inputs:
    /// - `page`: Page to update
    ///
    /// Output:
    /// - Number of elements updated (0 before any bundle is loaded)
    ///
    /// Details:
    /// - The element's role picks the attribute (text, placeholder, value or alt).
    /// - Also sets the document language, title and meta description/keywords from `meta.*`.
    pub fn apply_language(&self, page: &mut Page) -> usize {
        let Some(bundle) = &self.current else {
            return 0;
        };
        bundle.code().clone_into(&mut page.lang);
        if let Some(title) = bundle.lookup("meta.title") {
            title.clone_into(&mut page.title);
        }
        if let Some(description) = bundle.lookup("meta.description") {
            description.clone_into(&mut page.meta_description);
        }
        if let Some(keywords) = bundle.lookup("meta.keywords") {
            keywords.clone_into(&mut page.meta_keywords);
        }

        let mut applied = 0;
        for el in &mut page.elements {
            let Some(key) = el.i18n_key.as_deref() else {
                continue;
            };
            let text = bundle.get_text(key, None);
            let target = el.role.target();
            el.set_attr(target, text);
            applied += 1;
        }
        applied
    }

    fn ensure_supported(&self, lang: &str) -> Result<(), I18nError> {
        if self.is_supported(lang) {
            Ok(())
        } else {
            Err(I18nError::UnsupportedLanguage {
                code: lang.to_string(),
                supported: self.config.supported_languages.join(", "),
            })
        }
    }

    fn fail(&mut self, e: I18nError) -> I18nError {
        tracing::error!(error = %e, "[I18n] No language could be loaded; showing untranslated keys");
        self.state = I18nState::Failed;
        e
    }
}

impl<S: BundleSource, P: PreferenceStore> TextLookup for I18nManager<S, P> {
    fn text(&self, key: &str, fallback: Option<&str>) -> String {
        self.get_text(key, fallback)
    }
}
