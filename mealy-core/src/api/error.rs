use thiserror::Error;

/// Errors surfaced by [`ApiClient`](super::ApiClient) calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{reason}")]
    Backend { status: u16, reason: String },

    /// The backend answered 2xx but the body was not what we expected.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend reported 404 for the addressed resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_displays_reason() {
        let err = ApiError::Backend {
            status: 400,
            reason: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Backend {
            status: 404,
            reason: "Recipe not found".to_string(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = ApiError::Decode("empty body".to_string());
        assert_eq!(err.status(), None);
    }
}
