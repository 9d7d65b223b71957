//! Hero slides: built from the translation bundle when it provides them,
//! otherwise from the compiled-in default list.

use crate::i18n::{Language, TranslationBundle};
use serde_json::{Map, Value};
use tracing::debug;

/// A pair of per-language strings with cross-language fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localized {
    pub en: String,
    pub ar: String,
}

impl Localized {
    pub fn new(en: &str, ar: &str) -> Self {
        Self {
            en: en.to_string(),
            ar: ar.to_string(),
        }
    }

    /// The text for `language`, falling back to the other language when blank.
    pub fn get(&self, language: Language) -> &str {
        let (active, other) = if language == Language::ARABIC {
            (&self.ar, &self.en)
        } else {
            (&self.en, &self.ar)
        };
        if active.trim().is_empty() {
            other
        } else {
            active
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.trim().is_empty() && self.ar.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Image,
    Video,
}

impl SlideKind {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("video") => SlideKind::Video,
            _ => SlideKind::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: String,
    pub kind: SlideKind,
    pub src: Localized,
    pub alt: Localized,
    pub title: Localized,
    pub subtitle: Localized,
}

/// The compiled-in hero slides.
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide {
            id: "1".to_string(),
            kind: SlideKind::Image,
            src: Localized::new("/images/hero-1.jpg", "/images/hero-1.jpg"),
            alt: Localized::new("Cargo ship at port", "سفينة شحن في الميناء"),
            title: Localized::new(
                "Import & Export Solutions",
                "حلول الاستيراد والتصدير",
            ),
            subtitle: Localized::new(
                "Connecting your business to global markets with confidence.",
                "نربط أعمالك بالأسواق العالمية بثقة.",
            ),
        },
        Slide {
            id: "2".to_string(),
            kind: SlideKind::Video,
            src: Localized::new("/videos/hero-2.mp4", "/videos/hero-2.mp4"),
            alt: Localized::new("Factory inspection", "فحص المصنع"),
            title: Localized::new("Inspection & Quality Control", "الفحص ومراقبة الجودة"),
            subtitle: Localized::new(
                "We verify suppliers and products before they ship.",
                "نتحقق من الموردين والمنتجات قبل الشحن.",
            ),
        },
        Slide {
            id: "3".to_string(),
            kind: SlideKind::Image,
            src: Localized::new("/images/hero-3.jpg", "/images/hero-3.jpg"),
            alt: Localized::new("Logistics warehouse", "مستودع لوجستي"),
            title: Localized::new("Shipping & Customs Clearance", "الشحن والتخليص الجمركي"),
            subtitle: Localized::new(
                "End-to-end delivery from origin to final destination.",
                "تسليم متكامل من المنشأ إلى الوجهة النهائية.",
            ),
        },
    ]
}

/// Slides from `hero.slides` in the bundle, or the defaults when none resolve.
///
/// Each entry may carry `<field>_en` / `<field>_ar` variants or a generic
/// `<field>` used for both languages. Entries without any source are skipped.
pub fn slides_from_bundle(bundle: &TranslationBundle) -> Vec<Slide> {
    let slides: Vec<Slide> = bundle
        .list("hero.slides")
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_object().and_then(|obj| parse_slide(i, obj)))
        .collect();

    if slides.is_empty() {
        debug!("No hero slides in bundle, using defaults");
        default_slides()
    } else {
        slides
    }
}

fn parse_slide(index: usize, obj: &Map<String, Value>) -> Option<Slide> {
    let src = localized_pair(obj, "src");
    if src.is_empty() {
        return None;
    }

    let id = obj
        .get("id")
        .and_then(crate::i18n::value_text)
        .unwrap_or_else(|| (index + 1).to_string());

    Some(Slide {
        id,
        kind: SlideKind::parse(obj.get("type").and_then(Value::as_str)),
        src,
        alt: localized_pair(obj, "alt"),
        title: localized_pair(obj, "title"),
        subtitle: localized_pair(obj, "subtitle"),
    })
}

fn localized_pair(obj: &Map<String, Value>, field: &str) -> Localized {
    let generic = crate::fields::present(obj, field).unwrap_or_default();
    let en = crate::fields::present(obj, &format!("{}_en", field)).unwrap_or_else(|| generic.clone());
    let ar = crate::fields::present(obj, &format!("{}_ar", field)).unwrap_or(generic);
    Localized { en, ar }
}
