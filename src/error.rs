//! Error Types
//!
//! Everything that can go wrong between a form and the backend ends up as an
//! `ApiError`, and every page renders it the same way.

use thiserror::Error;

/// Shown when the server gives no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client-side form validation failure; never reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(String),
    #[error("Provide either {0} or {1}")]
    OneOf(String, String),
    #[error("{0} and {1} must have the same number of entries")]
    LengthMismatch(String, String),
    #[error("{0} must point to one of the {1}")]
    IndexOutOfRange(String, String),
    #[error("{0} must be a number")]
    NotANumber(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS)
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx status or `success: false`
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Server { status: u16, message: Option<String> },
    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No session token available for an authenticated call
    #[error("You are not signed in")]
    Unauthenticated,
}

impl ApiError {
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        ApiError::Server { status, message }
    }

    /// Text for the status modal
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(message), .. } => message.clone(),
            ApiError::Server { message: None, .. } => GENERIC_ERROR_MESSAGE.to_string(),
            ApiError::Network(_) => "Unable to reach the server. Check your connection and try again.".to_string(),
            ApiError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
            ApiError::Validation(err) => err.to_string(),
            ApiError::Unauthenticated => "Your session has ended. Please sign in again.".to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_passthrough() {
        let err = ApiError::server(400, Some("Title already exists".to_string()));
        assert_eq!(err.user_message(), "Title already exists");
    }

    #[test]
    fn test_blank_server_message_falls_back() {
        let err = ApiError::server(500, Some("   ".to_string()));
        assert_eq!(err, ApiError::Server { status: 500, message: None });
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_unauthorized_is_not_special() {
        let err = ApiError::server(401, None);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_message() {
        let err: ApiError = ValidationError::Required("Title".to_string()).into();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Title is required");
    }
}
