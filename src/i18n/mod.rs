//! Internationalization (i18n) for the bilingual site.
//!
//! All language-related logic lives here so page sections consume one
//! resolved answer instead of re-detecting the language themselves.
//!
//! # Architecture
//!
//! - `registry`: supported languages (English canonical, Arabic RTL) and their metadata
//! - `language`: validated `Language` type
//! - `strings`: built-in UI strings per language
//! - `bundle`: permissive access to per-language translation JSON, plus loading
//! - `resolver`: decides the active language and direction for a bundle
//! - `preference`: the user's persisted language choice
//!
//! # Example
//!
//! ```rust,ignore
//! use rock_bridge::i18n::{resolve_language, Language, TranslationBundle};
//!
//! let bundle = TranslationBundle::from_json_str(r#"{"lang": "ar"}"#)?;
//! let resolved = resolve_language(&bundle, None);
//! assert_eq!(resolved.language, Language::ARABIC);
//! ```

mod bundle;
mod language;
mod preference;
mod registry;
mod resolver;
mod strings;

pub use bundle::{lookup, value_text, BundleLoader, BundleSource, TranslationBundle};
pub use language::Language;
pub use preference::{DocumentAttributes, LanguagePreference};
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use resolver::{contains_arabic, resolve_language, ResolvedLanguage};
pub use strings::LanguageStrings;
