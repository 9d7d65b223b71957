//! The user's selected site language: restored from local state at startup,
//! persisted on every explicit toggle, and mirrored onto the document root.

use crate::i18n::{Direction, Language};
use crate::storage::{LocalStore, LANG_KEY};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Attributes the page root must carry for correct text flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub lang: &'static str,
    pub dir: Direction,
}

pub struct LanguagePreference {
    current: Language,
    store: Arc<LocalStore>,
}

impl LanguagePreference {
    /// Restore the saved language, defaulting to English when absent or unknown.
    pub fn restore(store: Arc<LocalStore>) -> Self {
        let current = match store.get(LANG_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                warn!("Ignoring saved language: {}", e);
                Language::canonical()
            }),
            None => Language::canonical(),
        };

        Self { current, store }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Persist and then switch to `language`. A failed write leaves the
    /// current language unchanged.
    pub fn set(&mut self, language: Language) -> Result<()> {
        self.store.set(LANG_KEY, language.code())?;
        self.current = language;
        info!("Language changed: {}", language.code());
        Ok(())
    }

    /// Flip between English and Arabic, returning the new language.
    pub fn toggle(&mut self) -> Result<Language> {
        let next = self.current.other();
        self.set(next)?;
        Ok(next)
    }

    /// Label for the toggle control: the language it would switch to.
    pub fn toggle_label(&self) -> &'static str {
        self.current.strings().toggle_label
    }

    /// Accessible name for the toggle control.
    pub fn toggle_aria(&self) -> &'static str {
        self.current.strings().toggle_aria
    }

    pub fn document_attributes(&self) -> DocumentAttributes {
        DocumentAttributes {
            lang: self.current.code(),
            dir: self.current.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_restore_defaults_to_english() {
        let pref = LanguagePreference::restore(Arc::new(LocalStore::in_memory()));
        assert_eq!(pref.current(), Language::ENGLISH);
        assert_eq!(pref.toggle_label(), "AR");
    }

    #[test]
    fn test_restore_unknown_code_defaults_to_english() {
        let store = Arc::new(LocalStore::in_memory());
        store.set(LANG_KEY, "xx").expect("set");

        let pref = LanguagePreference::restore(store);
        assert_eq!(pref.current(), Language::ENGLISH);
    }

    #[test]
    fn test_toggle_persists_across_restarts() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("state.json");

        let mut pref = LanguagePreference::restore(Arc::new(LocalStore::open(&path).expect("open")));
        assert_eq!(pref.toggle().expect("toggle"), Language::ARABIC);

        let restored = LanguagePreference::restore(Arc::new(LocalStore::open(&path).expect("reopen")));
        assert_eq!(restored.current(), Language::ARABIC);
        assert_eq!(restored.toggle_label(), "EN");
    }

    #[test]
    fn test_document_attributes_follow_language() {
        let mut pref = LanguagePreference::restore(Arc::new(LocalStore::in_memory()));
        assert_eq!(
            pref.document_attributes(),
            DocumentAttributes { lang: "en", dir: Direction::Ltr }
        );

        pref.set(Language::ARABIC).expect("set");
        assert_eq!(
            pref.document_attributes(),
            DocumentAttributes { lang: "ar", dir: Direction::Rtl }
        );
    }

    #[test]
    fn test_failed_write_keeps_current_language() {
        let dir = TempDir::new().expect("temp dir");
        let blocked = dir.path().join("blocked");
        let store = Arc::new(LocalStore::open(blocked.join("state.json")).expect("open"));
        // A plain file where the state directory should go makes every write fail.
        std::fs::write(&blocked, "not a directory").expect("write blocker");

        let mut pref = LanguagePreference::restore(Arc::clone(&store));
        assert!(pref.toggle().is_err());

        assert_eq!(pref.current(), Language::ENGLISH);
        assert_eq!(pref.toggle_label(), "AR");
        assert!(store.get(LANG_KEY).is_none());
    }

    #[test]
    fn test_toggle_aria_follows_language() {
        let mut pref = LanguagePreference::restore(Arc::new(LocalStore::in_memory()));
        assert_eq!(pref.toggle_aria(), "Toggle language");
        pref.set(Language::ARABIC).expect("set");
        assert_eq!(pref.toggle_aria(), "تبديل اللغة");
    }

    #[test]
    fn test_toggle_twice_returns_to_start() {
        let mut pref = LanguagePreference::restore(Arc::new(LocalStore::in_memory()));
        pref.toggle().expect("first toggle");
        pref.toggle().expect("second toggle");
        assert_eq!(pref.current(), Language::ENGLISH);
    }
}
