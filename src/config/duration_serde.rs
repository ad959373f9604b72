//! Serde support for human-readable durations in configuration.
//!
//! Durations are written as humantime strings (`"30s"`, `"1m 30s"`) and read
//! back from either such a string or a plain number of seconds.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Seconds(u64),
    Text(String),
}

pub mod duration {
    use super::*;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match DurationRepr::deserialize(deserializer)? {
            DurationRepr::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
            DurationRepr::Text(text) => humantime::parse_duration(text.trim())
                .map_err(|e| D::Error::custom(format!("invalid duration '{text}': {e}"))),
        }
    }
}
