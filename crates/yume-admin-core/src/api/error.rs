use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired - please log in again")]
    AuthExpired,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed ({status}): {message}")]
    Application { status: StatusCode, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Body fields that may carry a machine-readable error message.
const MESSAGE_FIELDS: [&str; 4] = ["message", "Message", "error", "detail"];

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    /// Pull a message out of a JSON error body.
    pub fn message_from_json(body: &Value) -> Option<String> {
        MESSAGE_FIELDS.iter().find_map(|field| {
            body.get(field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
    }

    /// Build an application error from a non-2xx status and whatever message
    /// the body carried.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = match message {
            Some(m) => Self::truncate_body(&m),
            None => format!("Request failed with status {}", status.as_u16()),
        };
        ApiError::Application { status, message }
    }

    /// Text a front-end shows in its error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthExpired => "Your session has expired. Please log in again.".to_string(),
            ApiError::Network(e) if e.is_timeout() => {
                "Connection timed out. Please try again.".to_string()
            }
            ApiError::Network(e) => format!("Connection error: {}", e),
            ApiError::Application { message, .. } => message.clone(),
            ApiError::InvalidResponse(_) => {
                "The server sent an unexpected response.".to_string()
            }
            ApiError::Validation(message) => message.clone(),
            ApiError::Storage(_) => "Could not access the stored session.".to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Storage(format!("{:#}", e))
    }
}
