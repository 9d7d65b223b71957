use crate::api::ApiError;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::multipart::Part;
use reqwest::Body;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Size of the chunks handed to the HTTP body; progress moves once per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_from_extension(&file_name).to_string();

        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime.starts_with("video/")
    }

    /// Multipart part whose body reports upload percent on `progress`.
    pub fn into_part(self, progress: Arc<watch::Sender<u8>>) -> Result<Part, ApiError> {
        let total = self.bytes.len() as u64;
        let body = progress_body(self.bytes, progress);

        Part::stream_with_length(body, total)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|_| ApiError::Validation(format!("Unsupported file type: {}", self.mime)))
    }
}

fn progress_body(bytes: Vec<u8>, progress: Arc<watch::Sender<u8>>) -> Body {
    let total = bytes.len().max(1);
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    progress.send_replace(0);

    let mut sent = 0usize;
    let stream = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        progress.send_replace(percent(sent, total));
        Ok::<_, std::io::Error>(chunk)
    });

    Body::wrap_stream(stream)
}

fn percent(sent: usize, total: usize) -> u8 {
    ((sent as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// MIME type by file extension; unknown extensions are `application/octet-stream`.
pub fn mime_from_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "ogg" | "ogv" => "video/ogg",
        _ => "application/octet-stream",
    }
}
