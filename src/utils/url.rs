//! URL utilities for consistent URL handling
//!
//! Grid API thumbnails come in several shapes: protocol-relative station
//! logos (`//zap2it.tmsimg.com/stations/123.png?w=55`), bare program asset
//! ids (`p1234_b_h3_aa`) and, occasionally, absolute URLs. These helpers turn
//! them into absolute icon URLs and build the grid request query string.

use url::Url;

/// Base for program artwork referenced by asset id
pub const PROGRAM_ASSET_BASE: &str = "https://zap2it.tmsimg.com/assets/";

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Resolve a channel logo thumbnail into an absolute icon URL
    ///
    /// Thumbnails that do not already start with `http` are prefixed with
    /// `https:`; any query string is removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zap2xml::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::channel_icon_src("//example.com/img.jpg?w=100"),
    ///     "https://example.com/img.jpg"
    /// );
    /// ```
    pub fn channel_icon_src(thumbnail: &str) -> String {
        let src = if thumbnail.starts_with("http") {
            thumbnail.to_string()
        } else {
            format!("https:{thumbnail}")
        };

        match src.find('?') {
            Some(index) => src[..index].to_string(),
            None => src,
        }
    }

    /// Resolve a program thumbnail into an absolute icon URL
    ///
    /// Absolute URLs are kept as-is; anything else is treated as an asset id.
    pub fn program_icon_src(thumbnail: &str) -> String {
        if thumbnail.starts_with("http") {
            thumbnail.to_string()
        } else {
            format!("{PROGRAM_ASSET_BASE}{thumbnail}.jpg")
        }
    }

    /// Append percent-encoded query parameters to a base URL, in order
    pub fn with_query(base: &str, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{base}?{query}")
    }

    /// Validate that a URL is absolute and uses HTTP(S)
    pub fn is_valid(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
            Err(_) => false,
        }
    }
}
