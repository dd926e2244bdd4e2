//! Locales and translation lookup for `$$text$key` placeholders
//!
//! Translation is an external collaborator: the engine only asks a
//! [`TranslationSource`] for a string and falls back to a visible marker when
//! nothing is found. [`TranslationMap`] is the bundled implementation, loaded
//! from TOML with one table per locale.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FileError;

/// A normalized language tag such as `en` or `de-at`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_ascii_lowercase().replace('_', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`de` for `de-at`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

/// Text shown in place of a translation that could not be found
pub fn missing_translation(key: &str) -> String {
    format!("I18N [{}] not set.", key)
}

/// Looks up localized strings
pub trait TranslationSource: Send + Sync {
    /// Translate `key` for `locale`, `None` when no translation exists
    fn translate(&self, locale: &Locale, key: &str) -> Option<String>;
}

impl<F> TranslationSource for F
where
    F: Fn(&Locale, &str) -> Option<String> + Send + Sync,
{
    fn translate(&self, locale: &Locale, key: &str) -> Option<String> {
        self(locale, key)
    }
}

/// A translation source that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslations;

impl TranslationSource for NoopTranslations {
    fn translate(&self, _locale: &Locale, _key: &str) -> Option<String> {
        None
    }
}

/// Errors that can occur when building a translation map
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation key for locale [{locale}] can not be blank")]
    BlankKey { locale: Locale },
    #[error("translation [{key}] for locale [{locale}] can not be blank")]
    BlankText { locale: Locale, key: String },
    #[error(transparent)]
    File(#[from] FileError),
}

/// In-memory translations keyed by locale
#[derive(Debug, Clone, Default)]
pub struct TranslationMap {
    texts: HashMap<Locale, HashMap<String, String>>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load translations from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, TranslationError> {
        let content = std::fs::read_to_string(path).map_err(FileError::from)?;
        Self::from_toml_str(&content)
    }

    /// Load translations from TOML, one table per locale:
    ///
    /// ```toml
    /// [en]
    /// greeting = "Hello"
    ///
    /// [de]
    /// greeting = "Hallo"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, TranslationError> {
        let parsed: HashMap<String, HashMap<String, String>> =
            toml::from_str(content).map_err(FileError::from)?;

        let mut map = Self::new();
        for (locale, texts) in parsed {
            let locale = Locale::new(&locale);
            for (key, text) in texts {
                map.insert(locale.clone(), key, text)?;
            }
        }
        Ok(map)
    }

    /// Add a translation; an existing entry for the same key is replaced
    pub fn insert(
        &mut self,
        locale: Locale,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<&mut Self, TranslationError> {
        let key = key.into();
        let text = text.into();
        if key.trim().is_empty() {
            return Err(TranslationError::BlankKey { locale });
        }
        if text.trim().is_empty() {
            return Err(TranslationError::BlankText { locale, key });
        }
        self.texts.entry(locale).or_default().insert(key, text);
        Ok(self)
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.texts.keys()
    }
}

impl TranslationSource for TranslationMap {
    /// Exact locale first, then the bare language (`de-at` falls back to `de`)
    fn translate(&self, locale: &Locale, key: &str) -> Option<String> {
        if let Some(text) = self.texts.get(locale).and_then(|texts| texts.get(key)) {
            return Some(text.clone());
        }
        let language = Locale::new(locale.language());
        if &language == locale {
            return None;
        }
        self.texts
            .get(&language)
            .and_then(|texts| texts.get(key))
            .cloned()
    }
}
