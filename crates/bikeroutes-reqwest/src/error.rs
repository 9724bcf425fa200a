//! Internal error types for bikeroutes-reqwest.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for bikeroutes-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for bikeroutes-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The configured base URL is invalid.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The API answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, possibly truncated.
        body: String,
    },
}

impl From<Error> for bikeroutes_core::Error {
    fn from(err: Error) -> Self {
        use bikeroutes_core::{Error as CoreError, ErrorKind};

        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    CoreError::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    CoreError::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    CoreError::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    CoreError::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => CoreError::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => CoreError::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::Status { status, body } => {
                let kind = if status.is_server_error() {
                    ErrorKind::ServiceUnavailable
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    ErrorKind::RateLimited
                } else if status == StatusCode::NOT_FOUND {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::ExternalError
                };
                CoreError::new(kind).with_message(format!("API returned {status}: {body}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bikeroutes_core::ErrorKind;

    use super::*;

    fn status(code: u16) -> bikeroutes_core::Error {
        Error::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: "oops".into(),
        }
        .into()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(502).kind, ErrorKind::ServiceUnavailable);
        assert_eq!(status(429).kind, ErrorKind::RateLimited);
        assert_eq!(status(404).kind, ErrorKind::NotFound);
        assert_eq!(status(400).kind, ErrorKind::ExternalError);
        assert!(status(503).is_retryable());
    }

    #[test]
    fn test_status_message_keeps_body() {
        let error = status(500);
        assert!(error.describe().contains("oops"));
    }

    #[test]
    fn test_serde_mapping() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: bikeroutes_core::Error = Error::from(source).into();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_url_mapping() {
        let source = url::Url::parse("not a url").unwrap_err();
        let error: bikeroutes_core::Error = Error::from(source).into();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }
}
