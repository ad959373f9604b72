//! Error type definitions for zap2xml

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Listings source errors (fetching or decoding a chunk)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors while writing the guide
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the effective configuration failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),
}

/// Listings source specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Non-success HTTP status from the grid API
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// Parsing errors for source data
    #[error("Parse error: {source_type} - {message}")]
    ParseError { source_type: String, message: String },

    /// Invalid source configuration
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfig { field: String, message: String },
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a parse error for a given source type
    pub fn parse<T: Into<String>, M: Into<String>>(source_type: T, message: M) -> Self {
        Self::ParseError {
            source_type: source_type.into(),
            message: message.into(),
        }
    }

    /// Create a request error for a URL
    pub fn request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_converts_into_app_error() {
        let err: AppError = SourceError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
        .into();

        assert!(matches!(err, AppError::Source(SourceError::Http { status: 503, .. })));
        assert_eq!(
            err.to_string(),
            "Source error: HTTP error: 503 - Service Unavailable"
        );
    }

    #[test]
    fn test_constructor_helpers() {
        let err = AppError::validation("timespan must be between 1 and 360");
        assert_eq!(
            err.to_string(),
            "Validation error: timespan must be between 1 and 360"
        );

        let err = SourceError::parse("grid", "expected value at line 1");
        assert_eq!(err.to_string(), "Parse error: grid - expected value at line 1");
    }

    #[test]
    fn test_toml_error_converts_into_serialization() {
        let toml_err = <toml::ser::Error as serde::ser::Error>::custom("unsupported value");
        let err: AppError = toml_err.into();

        assert!(matches!(err, AppError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
