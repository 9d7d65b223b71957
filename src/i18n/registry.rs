//! Language registry: Single source of truth for all supported languages.
//!
//! The site ships in English (canonical, left-to-right) and Arabic
//! (right-to-left). The registry is a lazily initialized `OnceLock` singleton.

use crate::i18n::strings::{LanguageStrings, ARABIC_STRINGS, ENGLISH_STRINGS};
use std::sync::OnceLock;

/// Text flow direction for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the document root `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code ("en", "ar")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language, used on the toggle control
    pub native_name: &'static str,

    /// Whether this is the default language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// Text direction
    pub direction: Direction,

    /// Built-in UI strings for this language
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
///
/// Holds every supported language. It is initialized on first access and
/// stays immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    ///
    /// The registry is built on the first call; later calls return the same
    /// instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code ("en", "ar")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    ///
    /// # Example
    /// ```
    /// use rock_bridge::i18n::{Direction, LanguageRegistry};
    ///
    /// let arabic = LanguageRegistry::get().get_by_code("ar").unwrap();
    /// assert_eq!(arabic.direction, Direction::Rtl);
    /// assert!(LanguageRegistry::get().get_by_code("de").is_none());
    /// ```
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages.
    ///
    /// # Returns
    /// References to every language configuration where `enabled` is true,
    /// in registry order (English first).
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// The canonical language is the site default. There must be exactly one.
    ///
    /// # Returns
    /// A reference to the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not hold exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code to check
    ///
    /// # Returns
    /// `true` if the language exists and is enabled, `false` otherwise.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// The supported languages: English (canonical) and Arabic.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            direction: Direction::Ltr,
            strings: &ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            is_canonical: false,
            enabled: true,
            direction: Direction::Rtl,
            strings: &ARABIC_STRINGS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get().get_by_code("en").unwrap();

        assert_eq!(config.name, "English");
        assert!(config.is_canonical);
        assert_eq!(config.direction, Direction::Ltr);
    }

    #[test]
    fn test_get_by_code_arabic() {
        let config = LanguageRegistry::get().get_by_code("ar").unwrap();

        assert_eq!(config.name, "Arabic");
        assert_eq!(config.native_name, "العربية");
        assert!(!config.is_canonical);
        assert_eq!(config.direction, Direction::Rtl);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("es").is_none());
    }

    #[test]
    fn test_list_enabled_contains_english_and_arabic() {
        let enabled = LanguageRegistry::get().list_enabled();

        assert_eq!(enabled.len(), 2);
        assert!(enabled.iter().any(|lang| lang.code == "en"));
        assert!(enabled.iter().any(|lang| lang.code == "ar"));
    }

    #[test]
    fn test_canonical_returns_english() {
        assert_eq!(LanguageRegistry::get().canonical().code, "en");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("ar"));
        assert!(!registry.is_enabled("fr"));
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::Ltr.as_str(), "ltr");
        assert_eq!(Direction::Rtl.as_str(), "rtl");
    }
}
