use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// Application-level refusal, as opposed to a transport or decoding failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected(_))
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_displays_server_text_only() {
        let error = ApiError::Rejected("No settings to backup".to_string());
        assert!(error.is_rejection());
        assert_eq!(error.to_string(), "No settings to backup");
    }

    #[test]
    fn test_server_error_display() {
        let error = ApiError::ServerError {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert!(!error.is_rejection());
        assert_eq!(error.to_string(), "Server error: 502 - Bad Gateway");
    }
}
