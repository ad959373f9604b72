use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::utils::human_format::format_size;

/// Longest slice of an error response body carried into the error message
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client abstraction used by listings sources
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch URL with custom headers and return the body as text
    ///
    /// Non-success statuses are reported as [`SourceError::Http`] carrying the
    /// start of the response body.
    async fn fetch_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> SourceResult<String>;
}

/// Default implementation of [`HttpClient`] using reqwest
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with a total request timeout
    pub fn with_timeout(timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::invalid_config("http_client", e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for StandardHttpClient {
    async fn fetch_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> SourceResult<String> {
        debug!("Fetching text content from: {}", url);

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::request(url, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::request(url, format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: format!(
                    "{} - {}...",
                    status.canonical_reason().unwrap_or("Unknown"),
                    preview(&body)
                ),
            });
        }

        debug!("Fetched {} of text content", format_size(body.len()));
        Ok(body)
    }
}

/// First characters of a response body, for error messages
pub fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
