//! Backend records as displayed by the site and the dashboard.
//!
//! The backend is loose about shapes: ids come as `_id` or `id`, image URLs
//! under several names, list responses bare or wrapped in an envelope. A
//! [`Record`] keeps the raw JSON object and answers questions about it.

use crate::fields::{first_present, get_full_url, localized, present};
use crate::i18n::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["_id", "id"];
const IMAGE_KEYS: &[&str] = &["img", "image", "imgUrl"];
const MEDIA_URL_KEYS: &[&str] = &["mediaUrl", "url"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON object; anything else is not a record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn id(&self) -> Option<String> {
        first_present(&self.0, ID_KEYS)
    }

    pub fn field(&self, key: &str) -> Option<String> {
        present(&self.0, key)
    }

    /// `<field>_<lang>`, then the other language, then `<field>`.
    pub fn localized(&self, field: &str, language: Language) -> String {
        localized(&self.0, field, language)
    }

    pub fn title(&self, language: Language) -> String {
        self.localized("title", language)
    }

    /// Title for display; records without any title get the language's placeholder.
    pub fn display_title(&self, language: Language) -> String {
        let title = self.title(language);
        if title.is_empty() {
            language.strings().untitled.to_string()
        } else {
            title
        }
    }

    pub fn description(&self, language: Language) -> String {
        self.localized("description", language)
    }

    /// Service image, resolved against `origin`.
    pub fn image_url(&self, origin: &str) -> String {
        first_present(&self.0, IMAGE_KEYS)
            .map(|path| get_full_url(origin, &path))
            .unwrap_or_default()
    }

    /// Media file location, resolved against `origin`.
    pub fn media_url(&self, origin: &str) -> String {
        first_present(&self.0, MEDIA_URL_KEYS)
            .map(|path| get_full_url(origin, &path))
            .unwrap_or_default()
    }

    pub fn media_kind(&self) -> MediaKind {
        let declared_video = self.field("mediaType").is_some_and(|t| t.eq_ignore_ascii_case("video"));
        let mime_video = self
            .field("mimeType")
            .is_some_and(|m| m.to_ascii_lowercase().starts_with("video/"));

        if declared_video || mime_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_kind() == MediaKind::Video
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.field("createdAt")?;
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Normalize a list response.
///
/// Accepts a bare array, an object wrapping the array under `envelope`, or a
/// single record object. Anything else is an empty list.
pub fn records_from_list(body: Value, envelope: &str) -> Vec<Record> {
    match body {
        Value::Array(items) => items.into_iter().filter_map(Record::from_value).collect(),
        Value::Object(mut map) => match map.remove(envelope) {
            Some(Value::Array(items)) => items.into_iter().filter_map(Record::from_value).collect(),
            Some(other) => {
                map.insert(envelope.to_string(), other);
                vec![Record(map)]
            }
            None if map.is_empty() => Vec::new(),
            None => vec![Record(map)],
        },
        _ => Vec::new(),
    }
}

/// The record in a create response: `body[envelope]` when present, else the
/// body itself if it carries an id. `None` means the caller should re-fetch.
pub fn record_from_create(body: Value, envelope: &str) -> Option<Record> {
    match body {
        Value::Object(mut map) => match map.remove(envelope) {
            Some(inner @ Value::Object(_)) => Record::from_value(inner),
            _ => Some(Record(map)).filter(|r| r.id().is_some()),
        },
        _ => None,
    }
}

/// Human-readable byte size, e.g. `1.5 MB`.
pub fn readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// The signed-in dashboard user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name, then email, then a generic label.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("user")
    }
}
