//! Error types for fedifeed.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Remote Errors ===
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Transport error: {status} - {body}")]
    Transport {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, captured for diagnostics.
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // === Local Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for logging and diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Channel(_) => "CHANNEL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error came from the remote side.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Transport { .. } | Self::Http(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(
            AppError::Transport {
                status: 502,
                body: String::new()
            }
            .error_code(),
            "TRANSPORT_ERROR"
        );
        assert_eq!(
            AppError::Config("missing base_url".into()).error_code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_remote_classification() {
        assert!(AppError::Unauthorized.is_remote());
        assert!(
            AppError::Transport {
                status: 500,
                body: String::new()
            }
            .is_remote()
        );
        assert!(!AppError::Channel("closed".into()).is_remote());
        assert!(!AppError::Internal("oops".into()).is_remote());
    }
}
