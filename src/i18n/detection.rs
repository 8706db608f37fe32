//! System language detection utilities.

use std::env;

/// What: Detect the system language among the supported ones.
///
/// Inputs:
/// - `supported`: Supported language codes (e.g., `["en", "zh", "es", "fr"]`)
///
/// Output:
/// - `Some(code)` for the first locale variable naming a supported language, else `None`
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order
/// - Parses locale strings like "zh_CN.UTF-8" -> "zh"
pub fn detect_system_language(supported: &[String]) -> Option<String> {
    let locale_vars = ["LC_ALL", "LC_MESSAGES", "LANG"];

    for var_name in &locale_vars {
        if let Ok(locale_str) = env::var(var_name)
            && let Some(parsed) = parse_locale_string(&locale_str)
            && supported.iter().any(|s| *s == parsed)
        {
            return Some(parsed);
        }
    }

    None
}

/// What: Reduce a locale string to its lowercase primary language subtag.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "fr-CA", "es"
///
/// Output:
/// - `Some("de")` style code, or `None` for empty, `C` and `POSIX` locales
///
/// Details:
/// - Removes the encoding suffix (.UTF-8) and modifier (@euro)
/// - Accepts both `_` and `-` as region separators
pub fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    let locale_part = trimmed.split(['.', '@']).next()?;
    let language = locale_part.split(['_', '-']).next()?.to_lowercase();

    if language.is_empty()
        || language == "c"
        || language == "posix"
        || !language.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }
    Some(language)
}
