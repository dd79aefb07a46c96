//! Error types for port operations.

/// Failure of a remote call (survey eligibility, mission persistence).
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }

    /// Transport failures, 5xx and 429 are worth another attempt; other 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::RequestFailed(_) => true,
            RemoteError::Status { status, .. } => *status >= 500 || *status == 429,
            RemoteError::InvalidResponse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(RemoteError::request_failed("connection reset").is_retryable());
        assert!(RemoteError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(RemoteError::Status { status: 429, body: String::new() }.is_retryable());
        assert!(!RemoteError::Status { status: 400, body: String::new() }.is_retryable());
        assert!(!RemoteError::invalid_response("eof").is_retryable());
    }
}
