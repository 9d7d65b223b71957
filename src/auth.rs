//! Login, forgot-password and reset-password calls.

use crate::api::{ApiClient, ApiError};
use crate::record::User;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::info;

pub const LOGIN_FAILED: &str = "Login failed — check credentials or server";
pub const LOGGED_IN: &str = "Logged in successfully";
pub const RESET_SENT: &str = "If that email exists, a reset message has been sent";
pub const RESET_REQUEST_FAILED: &str = "Could not request password reset";
pub const RESET_DONE: &str = "Password reset successful";
pub const UNREACHABLE: &str = "Unable to reach server — please try again.";

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Loose email shape check: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"))
        .is_match(email)
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.email) {
            return Err(invalid("Please enter a valid email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(invalid("Password must be at least 6 characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub token: Option<String>,
    pub user: Option<User>,
}

/// `POST /auth/login`. Does not touch local state; the session does that.
pub async fn login(client: &ApiClient, form: &LoginForm) -> Result<LoginOutcome, ApiError> {
    form.validate()?;

    let body = client.post_public("/auth/login", form).await?;
    let response: LoginResponse = match body {
        Value::Object(_) => serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?,
        _ => LoginResponse::default(),
    };

    info!(
        "Login accepted for {} (token {})",
        form.email,
        if response.access_token.is_some() { "issued" } else { "missing" }
    );

    Ok(LoginOutcome {
        message: response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| LOGGED_IN.to_string()),
        token: response.access_token.filter(|t| !t.is_empty()),
        user: response.user,
    })
}

/// `POST /auth/forgot`. Returns the confirmation text to show.
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<String, ApiError> {
    if !is_valid_email(email) {
        return Err(invalid("Please enter a valid email for password reset"));
    }

    let body = client
        .post_public("/auth/forgot", &serde_json::json!({ "email": email }))
        .await?;
    info!("Password reset requested for {}", email);

    Ok(crate::api::server_message(&body).unwrap_or_else(|| RESET_SENT.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetForm {
    /// Pre-fill the OTP from a reset link path such as `/resetpassword/482913`.
    pub fn with_otp_from_path(path: &str) -> Self {
        let otp = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty() && *segment != "resetpassword")
            .unwrap_or_default();
        Self {
            otp: otp.to_string(),
            ..Self::default()
        }
    }

    /// Every client-side problem at once, one per field.
    pub fn validate(&self) -> ResetErrors {
        let mut errors = ResetErrors::default();
        if !is_valid_email(self.email.trim()) {
            errors.email = Some("Please enter a valid email address".to_string());
        }
        if self.otp.trim().is_empty() {
            errors.otp = Some("Please provide the OTP sent to your email".to_string());
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            errors.new_password = Some("Password must be at least 6 characters".to_string());
        }
        if self.new_password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match".to_string());
        }
        errors
    }
}

/// Per-field reset errors. `general` holds anything not tied to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetErrors {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
    pub general: Option<String>,
}

impl ResetErrors {
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// The message to surface first: general, then fields in form order.
    pub fn first(&self) -> Option<&str> {
        [
            &self.general,
            &self.email,
            &self.otp,
            &self.new_password,
            &self.confirm_password,
        ]
        .into_iter()
        .find_map(|e| e.as_deref())
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for ResetErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.first().unwrap_or("Reset failed"))
    }
}

impl std::error::Error for ResetErrors {}

/// Map a failed reset call onto form fields by the server's wording.
pub fn map_reset_error(err: &ApiError) -> ResetErrors {
    let (status, message) = match err {
        ApiError::Server { status, message } => (*status, message.as_deref()),
        ApiError::Transport(_) => return ResetErrors::general(UNREACHABLE),
        ApiError::Validation(message) => return ResetErrors::general(message.clone()),
        other => return ResetErrors::general(other.to_string()),
    };

    let message = match message {
        Some(message) => message,
        None => return ResetErrors::general(format!("Server responded with status {}", status)),
    };

    let msg = message.to_lowercase();
    let has = |word: &str| msg.contains(word);
    let mut errors = ResetErrors::default();

    if has("email") && has("required") {
        errors.email = Some("Email is required.".to_string());
    } else if has("email") && (has("not") || has("found")) {
        errors.email = Some("Email not found.".to_string());
    } else if has("invalid") && has("otp") {
        errors.otp = Some("Invalid or expired OTP.".to_string());
    } else if has("incorrect") && has("otp") {
        errors.otp = Some("Incorrect OTP.".to_string());
    } else if has("expired") && has("otp") {
        errors.otp = Some("OTP has expired — request a new one.".to_string());
    } else if has("password") && has("required") {
        errors.new_password = Some("New password is required.".to_string());
    } else {
        errors.general = Some(message.to_string());
    }
    errors
}

/// `POST /auth/reset`. Field errors come back in the `Err` either way.
pub async fn reset_password(client: &ApiClient, form: &ResetForm) -> Result<String, ResetErrors> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let payload = serde_json::json!({
        "email": form.email.trim(),
        "otp": form.otp.trim(),
        "newPassword": form.new_password,
    });

    match client.post_public("/auth/reset", &payload).await {
        Ok(body) => {
            info!("Password reset completed for {}", form.email.trim());
            Ok(crate::api::server_message(&body).unwrap_or_else(|| RESET_DONE.to_string()))
        }
        Err(e) => Err(map_reset_error(&e)),
    }
}
