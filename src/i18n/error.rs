//! Errors of language loading and switching.

use std::path::PathBuf;

/// Errors raised by language loading and switching.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// The requested language is not in the supported set.
    #[error("unsupported language '{code}' (supported: {supported})")]
    UnsupportedLanguage {
        /// Requested code.
        code: String,
        /// Comma-separated supported codes.
        supported: String,
    },
    /// The code is not a well-formed language code.
    #[error("invalid language code format: '{0}'")]
    InvalidCode(String),
    /// No language file exists for the code.
    #[error("language file for '{code}' not found in {dir}")]
    NotFound {
        /// Requested code.
        code: String,
        /// Directory searched.
        dir: PathBuf,
    },
    /// The language file could not be read.
    #[error("failed to read language file {path}: {source}")]
    Io {
        /// File location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The language file is not a valid translation document.
    #[error("failed to parse language file for '{code}': {message}")]
    Parse {
        /// Language code.
        code: String,
        /// Parser message.
        message: String,
    },
}
