//! API-backed home page grids: the public services grid and the Our Work
//! gallery.
//!
//! Both fetch without credentials and never fail the page. A failed fetch
//! posts a notice and renders the same empty-state content as an empty list.

use crate::api::{resources, ApiClient, Media, Resource, Services};
use crate::i18n::Language;
use crate::notify::Notifications;
use crate::record::{MediaKind, Record};
use crate::sections::ServicesIntro;
use std::time::Duration;

pub const SERVICES_TIMEOUT: Duration = Duration::from_secs(10);
pub const GALLERY_TIMEOUT: Duration = Duration::from_secs(15);

// ==================== Services Grid ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCard {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesGrid {
    pub cards: Vec<ServiceCard>,
    /// `false` when the cards are the static fallback
    pub from_api: bool,
    pub language: Language,
}

impl ServicesGrid {
    /// Cards for `records`; an empty list shows the intro's fallback cards.
    pub fn from_records(records: &[Record], intro: &ServicesIntro, language: Language, origin: &str) -> Self {
        if records.is_empty() {
            return Self::fallback(intro, language);
        }

        let cards = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let image = Some(record.image_url(origin))
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| intro.placeholder(index).to_string());
                let description = Some(record.description(language))
                    .filter(|d| !d.is_empty())
                    .or_else(|| record.field("text"))
                    .unwrap_or_default();

                ServiceCard {
                    id: record.id(),
                    title: record.title(language),
                    description,
                    image,
                }
            })
            .collect();

        Self {
            cards,
            from_api: true,
            language,
        }
    }

    pub fn fallback(intro: &ServicesIntro, language: Language) -> Self {
        let cards = intro
            .fallback_cards
            .iter()
            .enumerate()
            .map(|(index, card)| ServiceCard {
                id: None,
                title: card.title.clone(),
                description: card.text.clone(),
                image: intro.placeholder(index).to_string(),
            })
            .collect();

        Self {
            cards,
            from_api: false,
            language,
        }
    }

    /// Text shown in place of the grid when there is nothing to show.
    pub fn empty_text(&self) -> Option<&'static str> {
        self.cards.is_empty().then(|| self.language.strings().no_services)
    }
}

/// `GET /services` for the public grid.
pub async fn load_services(
    client: &ApiClient,
    intro: &ServicesIntro,
    language: Language,
    notices: &Notifications,
) -> ServicesGrid {
    match resources::list_public::<Services>(client, SERVICES_TIMEOUT).await {
        Ok(records) => ServicesGrid::from_records(&records, intro, language, client.origin()),
        Err(e) => {
            notices.error(e.user_message(Services::MESSAGES.load_failed));
            ServicesGrid::fallback(intro, language)
        }
    }
}

// ==================== Our Work Gallery ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    /// Resolved file URL; empty when the record has none
    pub url: String,
    pub kind: MediaKind,
    /// "Video" or "Image" badge
    pub label: &'static str,
}

impl GalleryItem {
    pub fn from_record(record: &Record, language: Language, origin: &str) -> Self {
        let kind = record.media_kind();
        let strings = language.strings();

        Self {
            id: record.id(),
            title: record.display_title(language),
            description: record.description(language),
            url: record.media_url(origin),
            kind,
            label: match kind {
                MediaKind::Video => strings.video_label,
                MediaKind::Image => strings.image_label,
            },
        }
    }

    /// What the lightbox shows: the file URL, or the "not available" text.
    pub fn preview(&self, language: Language) -> &str {
        if self.url.is_empty() {
            language.strings().no_preview
        } else {
            &self.url
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub items: Vec<GalleryItem>,
    pub language: Language,
}

impl Gallery {
    pub fn from_records(records: &[Record], language: Language, origin: &str) -> Self {
        Self {
            items: records
                .iter()
                .map(|record| GalleryItem::from_record(record, language, origin))
                .collect(),
            language,
        }
    }

    pub fn empty_text(&self) -> Option<&'static str> {
        self.items.is_empty().then(|| self.language.strings().no_items)
    }

    pub fn view_label(&self) -> &'static str {
        self.language.strings().view_label
    }
}

/// `GET /media` for the public gallery.
pub async fn load_gallery(client: &ApiClient, language: Language, notices: &Notifications) -> Gallery {
    match resources::list_public::<Media>(client, GALLERY_TIMEOUT).await {
        Ok(records) => Gallery::from_records(&records, language, client.origin()),
        Err(e) => {
            notices.error(e.user_message(language.strings().media_load_failed));
            Gallery::from_records(&[], language, client.origin())
        }
    }
}
