//! Language type: validated language representation backed by the registry.

use crate::i18n::{Direction, LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};

/// A validated language.
///
/// Only supported, enabled languages can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code ("en", "ar")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code ("en" or "ar")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and the language is enabled
    /// * `Err` if the code is unknown or the language is disabled
    ///
    /// # Example
    /// ```
    /// use rock_bridge::i18n::Language;
    ///
    /// let arabic = Language::from_code("ar").unwrap();
    /// assert!(arabic.is_rtl());
    /// assert!(Language::from_code("fr").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Map a locale tag such as `AR-sa` or `en_US` onto a supported language
    /// by its lowercased prefix.
    ///
    /// # Arguments
    /// * `tag` - A locale tag as found in a bundle's `lang` or `locale` field
    ///
    /// # Returns
    /// * `Some(Language)` when the tag starts with `ar` or `en`
    /// * `None` for any other tag
    ///
    /// # Example
    /// ```
    /// use rock_bridge::i18n::Language;
    ///
    /// assert_eq!(Language::from_locale_prefix(" AR-sa"), Some(Language::ARABIC));
    /// assert_eq!(Language::from_locale_prefix("en_US"), Some(Language::ENGLISH));
    /// assert_eq!(Language::from_locale_prefix("fr-FR"), None);
    /// ```
    pub fn from_locale_prefix(tag: &str) -> Option<Language> {
        let lower = tag.trim().to_lowercase();
        if lower.starts_with("ar") {
            Some(Language::ARABIC)
        } else if lower.starts_with("en") {
            Some(Language::ENGLISH)
        } else {
            None
        }
    }

    /// Get the default language.
    ///
    /// Used when no saved preference exists and when a bundle gives no hint.
    ///
    /// # Returns
    /// The canonical Language (English).
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    ///
    /// # Returns
    /// The language code as a static string, also used as the bundle file stem
    /// (`en.json`, `ar.json`) and the document `lang` attribute.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Returns
    /// A reference to the `LanguageConfig` for this language.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    ///
    /// # Returns
    /// The language name in English ("English", "Arabic").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    ///
    /// # Returns
    /// The language name in its own script ("English", "العربية").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// Get the text flow direction.
    ///
    /// # Returns
    /// `Direction::Rtl` for Arabic, `Direction::Ltr` for English.
    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == Direction::Rtl
    }

    /// Get the built-in UI strings (toggle label, empty states, media badges).
    ///
    /// # Returns
    /// The static `LanguageStrings` table for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.config().strings
    }

    /// Get the other site language.
    ///
    /// Used as the first fallback when a record lacks a field in this
    /// language, and as the target of the language toggle.
    ///
    /// # Example
    /// ```
    /// use rock_bridge::i18n::Language;
    ///
    /// assert_eq!(Language::ENGLISH.other(), Language::ARABIC);
    /// assert_eq!(Language::ARABIC.other().other(), Language::ARABIC);
    /// ```
    pub fn other(&self) -> Language {
        if *self == Language::ARABIC {
            Language::ENGLISH
        } else {
            Language::ARABIC
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_canonical());
        assert!(!english.is_rtl());
    }

    #[test]
    fn test_arabic_constant() {
        let arabic = Language::ARABIC;
        assert_eq!(arabic.code(), "ar");
        assert_eq!(arabic.name(), "Arabic");
        assert!(!arabic.is_canonical());
        assert!(arabic.is_rtl());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_arabic() {
        let language = Language::from_code("ar").expect("Should succeed");
        assert_eq!(language, Language::ARABIC);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== from_locale_prefix Tests ====================

    #[test]
    fn test_locale_prefix_mixed_case_arabic() {
        assert_eq!(Language::from_locale_prefix("AR-sa"), Some(Language::ARABIC));
    }

    #[test]
    fn test_locale_prefix_english_region() {
        assert_eq!(Language::from_locale_prefix("en_US"), Some(Language::ENGLISH));
    }

    #[test]
    fn test_locale_prefix_unknown() {
        assert_eq!(Language::from_locale_prefix("fr-FR"), None);
        assert_eq!(Language::from_locale_prefix(""), None);
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_other_language() {
        assert_eq!(Language::ENGLISH.other(), Language::ARABIC);
        assert_eq!(Language::ARABIC.other(), Language::ENGLISH);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::ENGLISH);
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::ARABIC.to_string(), "ar");
    }

    #[test]
    fn test_native_names() {
        assert_eq!(Language::ENGLISH.native_name(), "English");
        assert_eq!(Language::ARABIC.native_name(), "العربية");
    }
}
