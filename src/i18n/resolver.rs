//! Language resolution: the single place that decides the active language and
//! text direction for a section, given its bundle and an optional override.

use crate::i18n::{Direction, Language, TranslationBundle};
use tracing::trace;

/// Bundle fields that may carry a locale tag, checked in order.
const LOCALE_FIELDS: &[&str] = &["lang", "locale", "currentLocale", "language"];

/// Bundle strings sampled for Arabic script, checked in order.
const SAMPLE_FIELDS: &[&str] = &["who.company", "site.name", "hero.title"];

/// Output of [`resolve_language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub language: Language,
    pub is_rtl: bool,
}

impl ResolvedLanguage {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            is_rtl: language.is_rtl(),
        }
    }

    pub fn direction(&self) -> Direction {
        if self.is_rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

/// Decide the active language. First match wins:
///
/// 1. the explicit override;
/// 2. a locale-like field whose lowercased value starts with `ar` or `en`;
/// 3. `dir` equal to `rtl` (any case) means Arabic;
/// 4. Arabic script in a sample string;
/// 5. English.
pub fn resolve_language(bundle: &TranslationBundle, override_lang: Option<Language>) -> ResolvedLanguage {
    if let Some(language) = override_lang {
        return ResolvedLanguage::new(language);
    }

    for field in LOCALE_FIELDS {
        if let Some(language) = bundle
            .get(field)
            .and_then(|v| v.as_str())
            .and_then(Language::from_locale_prefix)
        {
            trace!("Language {} from bundle field '{}'", language, field);
            return ResolvedLanguage::new(language);
        }
    }

    let is_rtl_dir = bundle
        .get("dir")
        .and_then(|v| v.as_str())
        .map(|dir| dir.trim().eq_ignore_ascii_case("rtl"))
        .unwrap_or(false);
    if is_rtl_dir {
        return ResolvedLanguage::new(Language::ARABIC);
    }

    let sample = SAMPLE_FIELDS
        .iter()
        .find_map(|field| bundle.text(field).filter(|s| !s.is_empty()));
    if sample.as_deref().map(contains_arabic).unwrap_or(false) {
        return ResolvedLanguage::new(Language::ARABIC);
    }

    ResolvedLanguage::new(Language::ENGLISH)
}

/// Whether `text` contains a character from the Arabic Unicode block (U+0600–U+06FF).
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}
