//! REST client for the Rock Bridge backend.

mod client;
mod error;
pub mod resources;
mod upload;

pub use client::{server_message, ApiClient};
pub use error::ApiError;
pub use resources::{Created, Media, Messages, Quotes, Resource, Services};
pub use upload::{mime_from_extension, Attachment};
