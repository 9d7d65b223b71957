//! Field fallback resolution for displayable backend records.
//!
//! Records carry optional language-suffixed fields (`title_en`, `title_ar`)
//! and sometimes an unsuffixed generic field (`title`). Display code asks for
//! a logical field and gets the best available string, never an error.

use crate::i18n::Language;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

static SCHEME_RE: OnceLock<Regex> = OnceLock::new();

fn scheme_re() -> &'static Regex {
    SCHEME_RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid scheme regex"))
}

/// Non-empty string value of `key`. Numbers are rendered; blanks count as absent.
pub fn present(entity: &Map<String, Value>, key: &str) -> Option<String> {
    match entity.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present value among `keys`.
pub fn first_present(entity: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| present(entity, key))
}

/// Best display string for logical `field` in `language`:
/// `<field>_<lang>`, then `<field>_<other>`, then `<field>`, else `""`.
pub fn localized(entity: &Map<String, Value>, field: &str, language: Language) -> String {
    let active = format!("{}_{}", field, language.code());
    let other = format!("{}_{}", field, language.other().code());

    first_present(entity, &[active.as_str(), other.as_str(), field]).unwrap_or_default()
}

/// Resolve a stored media path against the API origin.
///
/// Absolute URLs (`scheme://...`) are returned unchanged; relative paths are
/// joined to `origin` with exactly one `/` between them. Empty stays empty.
pub fn get_full_url(origin: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    if scheme_re().is_match(path) {
        return path.to_string();
    }

    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
