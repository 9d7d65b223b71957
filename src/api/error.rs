use thiserror::Error;

/// Failure taxonomy for backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side validation failed; no request was made.
    #[error("{0}")]
    Validation(String),

    /// The action needs a bearer token and none is stored.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Another call for the same action is still in flight.
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// Timeout, refused connection or other transport failure.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response, with the server's message when it sent one.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body could not be understood.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for a user-facing notification.
    ///
    /// Server messages are shown verbatim, validation messages as written;
    /// everything else gets the per-action `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ApiError::Server {
                status: status.as_u16(),
                message: None,
            },
            None if e.is_decode() => ApiError::Decode(e.to_string()),
            None => ApiError::Transport(e.to_string()),
        }
    }
}
