//! Error Types
//!
//! Failures surfaced to the user: form validation, HTTP/network, decoding.

use thiserror::Error;

/// Errors from talking to the server
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message for a toast: the server `detail` when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            ApiError::Rejected { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Client-side form validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name required")]
    NameRequired,
    #[error("Quantity must be number")]
    QuantityNotNumber,
    #[error("Servings must be number")]
    ServingsNotNumber,
    #[error("Unit required")]
    UnitRequired,
    #[error("Expiration format DD-MM-YYYY")]
    ExpirationFormat,
    #[error("Date format DD-MM-YYYY")]
    CookedDateFormat,
    #[error("Tag required")]
    TagRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_prefers_server_detail() {
        let err = ApiError::Rejected { status: 400, detail: "Ingredient already exists".into() };
        assert_eq!(err.user_message("Save failed"), "Ingredient already exists");
    }

    #[test]
    fn rejected_without_detail_uses_fallback() {
        let err = ApiError::Rejected { status: 500, detail: String::new() };
        assert_eq!(err.user_message("Delete failed"), "Delete failed");
    }

    #[test]
    fn validation_messages_match_form_copy() {
        assert_eq!(ValidationError::ExpirationFormat.to_string(), "Expiration format DD-MM-YYYY");
        assert_eq!(ValidationError::CookedDateFormat.to_string(), "Date format DD-MM-YYYY");
    }
}
