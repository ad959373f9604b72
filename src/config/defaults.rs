/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Listings source defaults
pub const DEFAULT_BASE_URL: &str = "https://tvlistings.gracenote.com/api/grid";
pub const DEFAULT_LINEUP_ID: &str = "USA-lineupId-DEFAULT";
pub const DEFAULT_HEADEND_ID: &str = "lineupId";
pub const DEFAULT_COUNTRY: &str = "USA";
pub const DEFAULT_POSTAL_CODE: &str = "30309";
pub const DEFAULT_TIMESPAN_HOURS: u32 = 6;
pub const MAX_TIMESPAN_HOURS: u32 = 360;
pub const DEFAULT_CHUNK_HOURS: u32 = 6;
pub const DEFAULT_PREF: &str = "16,128";
pub const DEFAULT_AID: &str = "chi";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-us";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

// Output defaults
pub const DEFAULT_OUTPUT_FILE: &str = "xmltv.xml";
pub const DEFAULT_GENERATOR_NAME: &str = "jef/zap2xml";
pub const DEFAULT_GENERATOR_URL: &str = "https://github.com/jef/zap2xml";

// Config loading
pub const DEFAULT_CONFIG_FILE: &str = "zap2xml.toml";
pub const ENV_PREFIX: &str = "ZAP2XML_";

/// Browser user agents picked from when none is configured
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.80",
];
