//! Translation bundles: permissive access to the per-language JSON files.
//!
//! A bundle is an open-ended nested mapping (section → key → string, object
//! or array). Every lookup returns an `Option` so callers can fall back to
//! built-in text; nothing here panics on a missing or mistyped key.

use crate::config::Config;
use crate::i18n::Language;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The full translation object for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationBundle {
    root: Value,
}

impl TranslationBundle {
    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).context("Failed to parse translation bundle")?;
        Ok(Self { root })
    }

    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a dotted path such as `who.heading` or `hero.slides.0.title`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// A displayable string at `path`. Numbers are rendered; anything else is `None`.
    pub fn text(&self, path: &str) -> Option<String> {
        self.get(path).and_then(value_text)
    }

    /// A string at `path`, or the given default.
    pub fn text_or(&self, path: &str, default: &str) -> String {
        self.text(path).unwrap_or_else(|| default.to_string())
    }

    /// An array at `path`. A non-array value is treated as absent.
    pub fn list(&self, path: &str) -> Option<&[Value]> {
        self.get(path).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Like [`list`](Self::list) but keeps only string elements.
    pub fn strings(&self, path: &str) -> Option<Vec<String>> {
        self.list(path).map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}

/// Walk a dotted path through objects and arrays.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    match current {
        Value::Null => None,
        other => Some(other),
    }
}

/// Render a scalar JSON value as display text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Where bundles are fetched from, by path convention `<base>/<lang>.json`.
#[derive(Debug, Clone)]
pub enum BundleSource {
    Http(String),
    Dir(PathBuf),
}

impl BundleSource {
    pub fn from_config(config: &Config) -> Self {
        match &config.locales_url {
            Some(url) => BundleSource::Http(url.trim_end_matches('/').to_string()),
            None => BundleSource::Dir(config.locales_dir.clone()),
        }
    }
}

/// Loads bundles once per language change.
pub struct BundleLoader {
    source: BundleSource,
    client: reqwest::Client,
}

impl BundleLoader {
    pub fn new(source: BundleSource, client: reqwest::Client) -> Self {
        Self { source, client }
    }

    /// Fetch the bundle for `language`, propagating any failure.
    pub async fn try_load(&self, language: Language) -> Result<TranslationBundle> {
        match &self.source {
            BundleSource::Http(base) => {
                let url = format!("{}/{}.json", base, language.code());
                debug!("Fetching translations: {}", url);

                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .context("Failed to request translation bundle")?;

                if !response.status().is_success() {
                    anyhow::bail!("Failed to load translations: {}", response.status());
                }

                let root: Value = response
                    .json()
                    .await
                    .context("Failed to parse translation bundle")?;
                Ok(TranslationBundle::from_value(root))
            }
            BundleSource::Dir(dir) => {
                let path = dir.join(format!("{}.json", language.code()));
                debug!("Reading translations: {}", path.display());

                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                TranslationBundle::from_json_str(&content)
            }
        }
    }

    /// Fetch the bundle for `language`, degrading to an empty bundle on failure.
    pub async fn load(&self, language: Language) -> TranslationBundle {
        match self.try_load(language).await {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!("Translation load error for {}: {:#}", language.code(), e);
                TranslationBundle::empty()
            }
        }
    }
}
