//! Language bundle tree and dot-path lookup.

use serde_json::{Map, Value};

use crate::i18n::I18nError;

/// Translation tree for one language; immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageBundle {
    /// Language code (e.g., `en`).
    code: String,
    /// Top-level object of the language document.
    root: Map<String, Value>,
}

impl LanguageBundle {
    /// What: Build a bundle from a parsed document.
    ///
    /// Inputs:
    /// - `code`: Language code
    /// - `root`: Parsed document; must be an object
    ///
    /// Output:
    /// - `LanguageBundle` wrapping the tree
    ///
    /// # Errors
    /// - Returns `Err(Parse)` when the document root is not an object
    pub fn new(code: &str, root: Value) -> Result<Self, I18nError> {
        match root {
            Value::Object(root) => Ok(Self {
                code: code.to_string(),
                root,
            }),
            other => Err(I18nError::Parse {
                code: code.to_string(),
                message: format!("expected an object at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// What: Parse a JSON language document.
    ///
    /// # Errors
    /// - Returns `Err(Parse)` for invalid JSON or a non-object root
    pub fn from_json_str(code: &str, json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json).map_err(|e| I18nError::Parse {
            code: code.to_string(),
            message: e.to_string(),
        })?;
        Self::new(code, value)
    }

    /// What: Parse a YAML language document.
    ///
    /// Inputs:
    /// - `code`: Language code
    /// - `yaml`: Document text
    ///
    /// Output:
    /// - Bundle built from the document
    ///
    /// # Errors
    /// - Returns `Err(Parse)` for invalid YAML or a non-object root
    ///
    /// Details:
    /// - A document whose only top-level key is the language code itself
    ///   (`fr: {nav: ...}`) is unwrapped to that inner tree.
    pub fn from_yaml_str(code: &str, yaml: &str) -> Result<Self, I18nError> {
        let mut value: Value = serde_norway::from_str(yaml).map_err(|e| I18nError::Parse {
            code: code.to_string(),
            message: format!("Failed to parse YAML: {e}"),
        })?;
        if let Value::Object(map) = &mut value
            && map.len() == 1
            && let Some(inner) = map.remove(code)
        {
            value = inner;
        }
        Self::new(code, value)
    }

    /// Language code of this bundle.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// What: Resolve a dot-path key to its string value.
    ///
    /// Inputs:
    /// - `key`: Dot-separated path (e.g., `nav.home`)
    ///
    /// Output:
    /// - `Some(text)` when every segment exists and the terminal value is a string
    ///
    /// Details:
    /// - Stops at the first missing segment or non-object intermediate value.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    /// What: Look up a key, falling back when it does not resolve to text.
    ///
    /// Inputs:
    /// - `key`: Dot-separated path
    /// - `fallback`: Text to use when the key does not resolve; the key itself when `None`
    ///
    /// Output:
    /// - Resolved text or the fallback
    #[must_use]
    pub fn get_text(&self, key: &str, fallback: Option<&str>) -> String {
        self.lookup(key).map_or_else(
            || {
                tracing::trace!(language = %self.code, key = %key, "[I18n] Missing translation key");
                fallback.unwrap_or(key).to_string()
            },
            ToString::to_string,
        )
    }

    /// Number of string leaves in the tree.
    #[must_use]
    pub fn key_count(&self) -> usize {
        fn count(v: &Value) -> usize {
            match v {
                Value::String(_) => 1,
                Value::Object(m) => m.values().map(count).sum(),
                _ => 0,
            }
        }
        self.root.values().map(count).sum()
    }
}

const fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> LanguageBundle {
        LanguageBundle::from_json_str(
            "en",
            r#"{"nav": {"home": "Home", "count": 3, "deep": {"leaf": "Leaf"}},
                "meta": {"title": "Game Hub"}}"#,
        )
        .expect("bundle should parse")
    }

    #[test]
    /// What: Nested lookup and fallbacks
    ///
    /// - Input: `{nav: {home: "Home"}}`
    /// - Output: "Home"; explicit fallback "X"; key itself without fallback
    fn get_text_walks_nested_keys() {
        let b = bundle();
        assert_eq!(b.get_text("nav.home", None), "Home");
        assert_eq!(b.get_text("nav.deep.leaf", None), "Leaf");
        assert_eq!(b.get_text("nav.missing", Some("X")), "X");
        assert_eq!(b.get_text("nav.missing", None), "nav.missing");
    }

    #[test]
    /// What: Non-string terminals and non-object intermediates
    ///
    /// - Input: Number terminal, object terminal, path through a string
    /// - Output: Fallback in every case
    fn get_text_falls_back_on_wrong_types() {
        let b = bundle();
        assert_eq!(b.get_text("nav.count", Some("F")), "F");
        assert_eq!(b.get_text("nav", Some("F")), "F");
        assert_eq!(b.get_text("nav.home.more", Some("F")), "F");
        assert_eq!(b.get_text("", Some("F")), "F");
        assert_eq!(b.key_count(), 3);
    }

    #[test]
    /// What: YAML documents with a language wrapper key
    ///
    /// - Input: `fr:` wrapped tree; non-object root
    /// - Output: Unwrapped lookups; parse error for scalar root
    fn yaml_documents_are_unwrapped() {
        let yaml = "fr:\n  nav:\n    home: \"Accueil\"\n";
        let b = LanguageBundle::from_yaml_str("fr", yaml).expect("yaml bundle");
        assert_eq!(b.lookup("nav.home"), Some("Accueil"));
        assert!(LanguageBundle::from_json_str("fr", "[1, 2]").is_err());
        assert!(LanguageBundle::from_yaml_str("fr", "invalid: yaml: content: [").is_err());
    }
}
