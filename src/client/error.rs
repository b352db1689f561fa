//! API client errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API unavailable at {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_send(error: reqwest::Error, url: &str) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::Unavailable(url.to_string())
        } else {
            ApiError::Request(error)
        }
    }

    /// Build a status error from a response body, preferring its `detail`
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            message: detail_message(body).unwrap_or_else(|| body.trim().to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Test is restricted to another student or teacher
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// `{"detail": "..."}` message of an error body
pub fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message() {
        assert_eq!(
            detail_message(r#"{"detail": "This test is not available for you."}"#).as_deref(),
            Some("This test is not available for you.")
        );
        assert_eq!(detail_message("<html>oops</html>"), None);
        assert_eq!(detail_message(r#"{"answers": ["required"]}"#), None);
    }

    #[test]
    fn test_status_error_prefers_detail() {
        let err = ApiError::from_status(403, r#"{"detail":"Restricted"}"#);
        assert!(err.is_forbidden());
        assert_eq!(err.to_string(), "API error 403: Restricted");

        let err = ApiError::from_status(502, " Bad gateway ");
        assert_eq!(err.to_string(), "API error 502: Bad gateway");
        assert!(!err.is_not_found());
    }
}
