use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Response payload, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    /// Error message carried by the body, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ResponseBody::Json(v) => ApiError::message_from_json(v),
            ResponseBody::Text(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
            _ => None,
        }
    }
}

/// Result of [`SessionClient::send`](super::SessionClient::send).
///
/// `Success` covers every response the server produced, 2xx or not; callers
/// inspect the status. `AuthExpired` means the session has already been torn
/// down and a redirect to login issued.
#[derive(Debug)]
pub enum ResponseOutcome {
    Success { status: StatusCode, body: ResponseBody },
    AuthExpired,
    NetworkFailure(reqwest::Error),
}

impl ResponseOutcome {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ResponseOutcome::Success { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status().map(|s| s.is_success()).unwrap_or(false)
    }

    /// Successful response body, or the error a caller should surface.
    pub fn into_body(self) -> Result<ResponseBody, ApiError> {
        match self {
            ResponseOutcome::Success { status, body } if status.is_success() => Ok(body),
            ResponseOutcome::Success { status, body } => {
                Err(ApiError::from_status(status, body.message()))
            }
            ResponseOutcome::AuthExpired => Err(ApiError::AuthExpired),
            ResponseOutcome::NetworkFailure(e) => Err(ApiError::Network(e)),
        }
    }

    /// Decode a successful JSON body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self.into_body()? {
            ResponseBody::Json(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode response: {}", e))),
            ResponseBody::Empty => Err(ApiError::InvalidResponse("Empty response body".to_string())),
            ResponseBody::Text(_) => Err(ApiError::InvalidResponse(
                "Expected a JSON response body".to_string(),
            )),
        }
    }

    /// Accept any successful response and discard its body.
    pub fn into_empty(self) -> Result<(), ApiError> {
        self.into_body().map(|_| ())
    }
}
