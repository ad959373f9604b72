use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub mod defaults;
pub mod duration_serde;

use crate::errors::{AppError, AppResult};
use crate::models::lenient_serde;
use crate::utils::url::UrlUtils;
use crate::xmltv::XmltvOptions;
use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listings: ListingsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Grid API request settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_lineup_id", deserialize_with = "lenient_serde::string::deserialize")]
    pub lineup_id: String,
    #[serde(default = "default_headend_id", deserialize_with = "lenient_serde::string::deserialize")]
    pub headend_id: String,
    #[serde(default = "default_country", deserialize_with = "lenient_serde::string::deserialize")]
    pub country: String,
    #[serde(default = "default_postal_code", deserialize_with = "lenient_serde::string::deserialize")]
    pub postal_code: String,
    /// Total hours of listings to fetch (1 to 360)
    #[serde(default = "default_timespan_hours")]
    pub timespan_hours: u32,
    /// Hours covered by each grid request
    #[serde(default = "default_chunk_hours")]
    pub chunk_hours: u32,
    #[serde(default = "default_pref", deserialize_with = "lenient_serde::string::deserialize")]
    pub pref: String,
    /// Fixed user agent; a browser user agent is picked at random when unset
    #[serde(default, deserialize_with = "lenient_serde::option::deserialize")]
    pub user_agent: Option<String>,
    #[serde(default = "default_aid")]
    pub aid: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
}

/// Guide output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    /// Append ` *` to titles of new or live airings
    #[serde(default)]
    pub append_asterisk: bool,
    /// Emit the xmltv_ns episode number first (MediaPortal compatibility)
    #[serde(default)]
    pub mediaportal: bool,
    #[serde(default = "default_generator_name")]
    pub generator_name: String,
    #[serde(default = "default_generator_url")]
    pub generator_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_lineup_id() -> String {
    DEFAULT_LINEUP_ID.to_string()
}

fn default_headend_id() -> String {
    DEFAULT_HEADEND_ID.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_postal_code() -> String {
    DEFAULT_POSTAL_CODE.to_string()
}

fn default_timespan_hours() -> u32 {
    DEFAULT_TIMESPAN_HOURS
}

fn default_chunk_hours() -> u32 {
    DEFAULT_CHUNK_HOURS
}

fn default_pref() -> String {
    DEFAULT_PREF.to_string()
}

fn default_aid() -> String {
    DEFAULT_AID.to_string()
}

fn default_language_code() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_request_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_REQUEST_TIMEOUT).unwrap_or(Duration::from_secs(30))
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_generator_name() -> String {
    DEFAULT_GENERATOR_NAME.to_string()
}

fn default_generator_url() -> String {
    DEFAULT_GENERATOR_URL.to_string()
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lineup_id: default_lineup_id(),
            headend_id: default_headend_id(),
            country: default_country(),
            postal_code: default_postal_code(),
            timespan_hours: default_timespan_hours(),
            chunk_hours: default_chunk_hours(),
            pref: default_pref(),
            user_agent: None,
            aid: default_aid(),
            language_code: default_language_code(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            append_asterisk: false,
            mediaportal: false,
            generator_name: default_generator_name(),
            generator_url: default_generator_url(),
        }
    }
}

impl ListingsConfig {
    /// Number of grid requests needed to cover the timespan
    pub fn chunk_count(&self) -> u32 {
        self.timespan_hours.div_ceil(self.chunk_hours.max(1))
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_TIMESPAN_HOURS).contains(&self.timespan_hours) {
            return Err(AppError::validation(format!(
                "timespan_hours must be between 1 and {MAX_TIMESPAN_HOURS}, got {}",
                self.timespan_hours
            )));
        }
        if self.chunk_hours == 0 {
            return Err(AppError::validation("chunk_hours must be at least 1"));
        }
        if !UrlUtils::is_valid(&self.base_url) {
            return Err(AppError::validation(format!(
                "base_url is not a valid http(s) URL: '{}'",
                self.base_url
            )));
        }
        if self.lineup_id.trim().is_empty() {
            return Err(AppError::validation("lineup_id must not be empty"));
        }
        Ok(())
    }
}

impl OutputConfig {
    /// Serializer options derived from the output settings
    pub fn xmltv_options(&self) -> XmltvOptions {
        XmltvOptions {
            append_asterisk: self.append_asterisk,
            prioritize_xmltv_ns: self.mediaportal,
            generator_name: self.generator_name.clone(),
            generator_url: self.generator_url.clone(),
        }
    }
}

impl Config {
    /// Layered configuration: defaults, then the TOML file (if present),
    /// then `ZAP2XML_` environment variables (`__` separates sections).
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load_from_file(config_file: &Path) -> AppResult<Self> {
        if config_file.exists() {
            info!("Loading configuration from: {}", config_file.display());
        } else {
            debug!(
                "Config file {} not found, using defaults and environment",
                config_file.display()
            );
        }

        Self::figment(config_file)
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))
    }

    pub fn validate(&self) -> AppResult<()> {
        self.listings.validate()
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
