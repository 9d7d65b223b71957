//! Dashboard create forms and their client-side validation.

use crate::api::{ApiError, Attachment};
use crate::record::readable_bytes;
use reqwest::multipart::Form;
use std::sync::Arc;
use tokio::sync::watch;

/// A form that creates a record through a multipart POST.
pub trait CreateForm {
    /// First validation failure, in field order.
    fn validate(&self, file_limit: u64) -> Result<(), ApiError>;

    /// Build the multipart body; the file part reports progress on `progress`.
    fn to_multipart(&self, progress: Arc<watch::Sender<u8>>) -> Result<Form, ApiError>;

    /// Reset every field after a successful create.
    fn clear(&mut self);
}

fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

fn check_size(file: &Attachment, limit: u64) -> Result<(), ApiError> {
    if file.size() > limit {
        return Err(ApiError::Validation(format!(
            "File is too large ({}). Max size: {}",
            readable_bytes(file.size()),
            readable_bytes(limit)
        )));
    }
    Ok(())
}

/// New service: both languages are mandatory, plus an image.
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub image: Option<Attachment>,
}

impl ServiceForm {
    /// Attach a file, rejecting anything that is not an image.
    pub fn attach(&mut self, file: Attachment) -> Result<(), ApiError> {
        if !file.is_image() {
            return Err(ApiError::Validation("Please choose an image file".to_string()));
        }
        self.image = Some(file);
        Ok(())
    }
}

impl CreateForm for ServiceForm {
    fn validate(&self, file_limit: u64) -> Result<(), ApiError> {
        require(&self.title_en, "English title required")?;
        require(&self.title_ar, "Arabic title required")?;
        require(&self.description_en, "English description required")?;
        require(&self.description_ar, "Arabic description required")?;

        let image = self
            .image
            .as_ref()
            .ok_or_else(|| ApiError::Validation("Please attach an image".to_string()))?;
        if !image.is_image() {
            return Err(ApiError::Validation("Please choose an image file".to_string()));
        }
        check_size(image, file_limit)
    }

    fn to_multipart(&self, progress: Arc<watch::Sender<u8>>) -> Result<Form, ApiError> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| ApiError::Validation("Please attach an image".to_string()))?;

        Ok(Form::new()
            .text("title_en", self.title_en.trim().to_string())
            .text("title_ar", self.title_ar.trim().to_string())
            .text("description_en", self.description_en.trim().to_string())
            .text("description_ar", self.description_ar.trim().to_string())
            .part("image", image.into_part(progress)?))
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// New gallery item: a title and description in at least one language, plus
/// an image or video file.
#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub file: Option<Attachment>,
}

impl MediaForm {
    pub fn attach(&mut self, file: Attachment) -> Result<(), ApiError> {
        if !file.is_image() && !file.is_video() {
            return Err(ApiError::Validation("Please attach a file (image or video)".to_string()));
        }
        self.file = Some(file);
        Ok(())
    }
}

impl CreateForm for MediaForm {
    fn validate(&self, file_limit: u64) -> Result<(), ApiError> {
        if self.title_en.trim().is_empty() && self.title_ar.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please provide a title (English or Arabic)".to_string(),
            ));
        }
        if self.description_en.trim().is_empty() && self.description_ar.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please provide a description (English or Arabic)".to_string(),
            ));
        }

        let file = self
            .file
            .as_ref()
            .filter(|f| f.is_image() || f.is_video())
            .ok_or_else(|| ApiError::Validation("Please attach a file (image or video)".to_string()))?;
        check_size(file, file_limit)
    }

    fn to_multipart(&self, progress: Arc<watch::Sender<u8>>) -> Result<Form, ApiError> {
        let file = self
            .file
            .clone()
            .ok_or_else(|| ApiError::Validation("Please attach a file (image or video)".to_string()))?;

        Ok(Form::new()
            .text("title_en", self.title_en.trim().to_string())
            .text("title_ar", self.title_ar.trim().to_string())
            .text("description_en", self.description_en.trim().to_string())
            .text("description_ar", self.description_ar.trim().to_string())
            .part("file", file.into_part(progress)?))
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
