//! Language file loading and the per-language load cache.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::i18n::{I18nError, LanguageBundle};

/// Source of language documents (files, embedded assets, test doubles).
pub trait BundleSource: Send + Sync {
    /// What: Load and parse the bundle for `code`.
    ///
    /// # Errors
    /// - Returns `Err` when the document is missing, unreadable or invalid
    fn load(&self, code: &str) -> impl Future<Output = Result<LanguageBundle, I18nError>> + Send;
}

/// What: Validate language code format.
///
/// Inputs:
/// - `code`: Language code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
///
/// Details:
/// - Allows `en`, `zh`, `pt-BR`, `zh-Hans-CN`; rejects empty, path separators and spaces.
pub fn is_valid_language_code(code: &str) -> bool {
    if code.is_empty() || code.len() > 20 {
        return false;
    }

    code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-')
        && !code.contains("--")
}

/// What: Load a language file from a directory.
///
/// Inputs:
/// - `code`: Language code (e.g., "fr")
/// - `dir`: Directory holding `{code}.json` (or `{code}.yml`)
///
/// Output:
/// - Parsed `LanguageBundle`
///
/// # Errors
/// - Returns `Err(InvalidCode)` when the code has an invalid format
/// - Returns `Err(NotFound)` when neither file exists
/// - Returns `Err(Io)` when the file cannot be read
/// - Returns `Err(Parse)` when the file is empty or not a valid document
pub async fn load_language_file(code: &str, dir: &Path) -> Result<LanguageBundle, I18nError> {
    if !is_valid_language_code(code) {
        return Err(I18nError::InvalidCode(code.to_string()));
    }

    let json_path = dir.join(format!("{code}.json"));
    let yaml_path = dir.join(format!("{code}.yml"));
    let (path, is_yaml) = if tokio::fs::try_exists(&json_path).await.unwrap_or(false) {
        (json_path, false)
    } else if tokio::fs::try_exists(&yaml_path).await.unwrap_or(false) {
        (yaml_path, true)
    } else {
        return Err(I18nError::NotFound {
            code: code.to_string(),
            dir: dir.to_path_buf(),
        });
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| I18nError::Io {
            path: path.clone(),
            source,
        })?;

    if contents.trim().is_empty() {
        return Err(I18nError::Parse {
            code: code.to_string(),
            message: format!("language file is empty: {}", path.display()),
        });
    }

    if is_yaml {
        LanguageBundle::from_yaml_str(code, &contents)
    } else {
        LanguageBundle::from_json_str(code, &contents)
    }
}

/// Bundle source reading `{code}.json` / `{code}.yml` from a directory.
#[derive(Clone, Debug)]
pub struct FileBundleSource {
    /// Directory holding the language files.
    dir: PathBuf,
}

impl FileBundleSource {
    /// Create a source rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the language files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BundleSource for FileBundleSource {
    async fn load(&self, code: &str) -> Result<LanguageBundle, I18nError> {
        load_language_file(code, &self.dir).await
    }
}

/// Memoizing loader with at most one in-flight load per language.
///
/// Concurrent callers for the same uncached language await the same load.
/// A failed load leaves the slot empty so a later call can retry.
pub struct BundleCache<S> {
    /// Underlying document source.
    source: S,
    /// One slot per language code ever requested.
    slots: Mutex<HashMap<String, Arc<OnceCell<Arc<LanguageBundle>>>>>,
}

impl<S: BundleSource> BundleCache<S> {
    /// Create an empty cache over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// What: Load a bundle, using the cache if available.
    ///
    /// Inputs:
    /// - `code`: Language code to load
    ///
    /// Output:
    /// - Shared bundle
    ///
    /// # Errors
    /// - Returns `Err` when the source fails; the failure is not cached
    pub async fn load(&self, code: &str) -> Result<Arc<LanguageBundle>, I18nError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(code.to_string()).or_default())
        };
        let bundle = slot
            .get_or_try_init(|| async {
                match self.source.load(code).await {
                    Ok(bundle) => {
                        tracing::debug!(
                            language = %code,
                            keys = bundle.key_count(),
                            "[I18n] Loaded language bundle"
                        );
                        Ok(Arc::new(bundle))
                    }
                    Err(e) => {
                        tracing::warn!(language = %code, error = %e, "[I18n] Failed to load language");
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(bundle))
    }

    /// Whether a bundle for `code` has been loaded successfully.
    pub fn is_cached(&self, code: &str) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .is_some_and(|slot| slot.initialized())
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }
}
