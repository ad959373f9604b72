//! Grid API listings source
//!
//! Fetches fixed-size windows of the lineup's schedule from the public grid
//! endpoint. Requests are plain GETs with an ordered query string and a
//! browser user agent; the endpoint rejects requests without one.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::traits::ListingsSource;
use crate::config::ListingsConfig;
use crate::config::defaults::USER_AGENTS;
use crate::errors::{SourceError, SourceResult};
use crate::models::GridApiResponse;
use crate::utils::HttpClient;
use crate::utils::url::UrlUtils;

/// Grid API source handler
pub struct GridSource {
    client: Box<dyn HttpClient>,
    settings: ListingsConfig,
    user_agent: String,
}

impl GridSource {
    /// Create a grid source; the user agent is fixed for the whole run
    pub fn new(client: Box<dyn HttpClient>, settings: ListingsConfig) -> Self {
        let user_agent = settings
            .user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(random_user_agent);
        debug!("Using user agent: {}", user_agent);

        Self {
            client,
            settings,
            user_agent,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Device hint derived from the lineup id
    fn device(&self) -> &'static str {
        if self.settings.lineup_id.contains('X') {
            "X"
        } else {
            "-"
        }
    }

    /// Build the request URL for the chunk starting at `time`
    pub fn build_url(&self, time: i64) -> String {
        let settings = &self.settings;
        let params = [
            ("lineupId", settings.lineup_id.clone()),
            ("timespan", settings.chunk_hours.to_string()),
            ("headendId", settings.headend_id.clone()),
            ("country", settings.country.clone()),
            ("timezone", String::new()),
            ("device", self.device().to_string()),
            ("postalCode", settings.postal_code.clone()),
            ("isOverride", "true".to_string()),
            ("time", time.to_string()),
            ("pref", settings.pref.clone()),
            ("userId", "-".to_string()),
            ("aid", settings.aid.clone()),
            ("languagecode", settings.language_code.clone()),
        ];
        UrlUtils::with_query(&settings.base_url, &params)
    }
}

#[async_trait]
impl ListingsSource for GridSource {
    fn chunk_hours(&self) -> u32 {
        self.settings.chunk_hours
    }

    fn chunk_start_times(&self, now: i64) -> Vec<i64> {
        let step = i64::from(self.settings.chunk_hours) * 3600;
        (0..i64::from(self.settings.chunk_count()))
            .map(|index| now + index * step)
            .collect()
    }

    async fn fetch_chunk(&self, time: i64) -> SourceResult<GridApiResponse> {
        let url = self.build_url(time);
        let body = self
            .client
            .fetch_text_with_headers(&url, &[("User-Agent", self.user_agent.as_str())])
            .await?;

        serde_json::from_str(&body)
            .map_err(|e| SourceError::parse("grid", format!("Invalid chunk JSON from {url}: {e}")))
    }
}

fn random_user_agent() -> String {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}
