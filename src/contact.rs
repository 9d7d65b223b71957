//! Public "get offer" form, posted to the quotes collection.

use crate::api::{server_message, ApiClient, ApiError, Quotes, Resource};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteErrors {
    pub name: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl QuoteErrors {
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    pub fn first(&self) -> Option<&'static str> {
        [self.name, self.phone, self.email, self.message]
            .into_iter()
            .flatten()
            .next()
    }
}

impl QuoteRequest {
    pub fn validate(&self) -> QuoteErrors {
        let mut errors = QuoteErrors::default();
        if self.name.trim().is_empty() {
            errors.name = Some("Please enter your name");
        }
        if self.phone.trim().is_empty() {
            errors.phone = Some("Please enter your phone");
        }
        if self.email.trim().is_empty() {
            errors.email = Some("Please enter your email");
        } else if !email_re().is_match(&self.email) {
            errors.email = Some("Please enter a valid email");
        }
        if self.message.trim().is_empty() {
            errors.message = Some("Please enter a message or details");
        }
        errors
    }

    /// Validate and send. Returns the confirmation text to show.
    pub async fn submit(&self, client: &ApiClient) -> Result<String, ApiError> {
        if let Some(problem) = self.validate().first() {
            return Err(ApiError::Validation(problem.to_string()));
        }

        let body = client
            .post_public_with_timeout(Quotes::PATH, self, SUBMIT_TIMEOUT)
            .await?;
        info!("Quote request submitted by {}", self.email);

        Ok(server_message(&body).unwrap_or_else(|| Quotes::MESSAGES.created.to_string()))
    }
}
