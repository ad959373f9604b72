//! Centralized error handling for zap2xml
//!
//! The XMLTV serializer itself never fails; errors come from the layers
//! around it: configuration loading, fetching and decoding grid chunks, and
//! writing the finished document.
//!
//! # Usage
//!
//! ```rust
//! use zap2xml::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("timespan must be positive"))
//! }
//! assert!(example_function().is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
