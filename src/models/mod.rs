//! Grid listings data model.
//!
//! These types mirror the JSON served by the grid API. A chunk response is a
//! [`GridApiResponse`]; chunks are merged into a [`ListingsPayload`] keyed by
//! channel id before being handed to the XMLTV generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use crate::utils::time::parse_instant_or_epoch;

pub mod lenient_serde;

/// Semantic flags attached to an airing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, AsRefStr,
)]
pub enum EventFlag {
    New,
    Live,
    Premiere,
    Finale,
}

/// Presentation tags attached to an airing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, AsRefStr,
)]
pub enum EventTag {
    Stereo,
    #[strum(serialize = "CC")]
    ClosedCaptions,
}

/// Set of known constants decoded from a list of wire strings.
///
/// Values that do not parse into `T` are dropped while decoding, so
/// membership checks never see unrecognized strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet<T: Ord>(BTreeSet<T>);

impl<T: Ord> FlagSet<T> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Ord> Default for FlagSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for FlagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de, T> Deserialize<'de> for FlagSet<T>
where
    T: Ord + FromStr,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = lenient_serde::list::deserialize(deserializer)?;
        let mut set = BTreeSet::new();
        for value in raw {
            match value.parse::<T>() {
                Ok(parsed) => {
                    set.insert(parsed);
                }
                Err(_) => debug!("Ignoring unrecognized listing flag '{}'", value),
            }
        }
        Ok(Self(set))
    }
}

/// Program metadata shared by every airing of the same listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default, with = "lenient_serde::string")]
    pub title: String,
    #[serde(default, with = "lenient_serde::string")]
    pub id: String,
    #[serde(default, with = "lenient_serde::option")]
    pub tms_id: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub short_desc: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub season: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub release_year: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub episode: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub episode_title: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub series_id: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub is_generic: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub original_air_date: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub episode_air_date: Option<String>,
    /// Genre set; populated by the genre normalizer during ingestion
    #[serde(default, with = "lenient_serde::set")]
    pub genres: BTreeSet<String>,
}

impl Program {
    /// Movie listings carry ids starting with `MV`
    pub fn is_movie(&self) -> bool {
        self.id.starts_with("MV")
    }
}

/// One scheduled airing of a program on a channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, with = "lenient_serde::string")]
    pub call_sign: String,
    #[serde(default, with = "lenient_serde::option")]
    pub duration: Option<String>,
    #[serde(default, with = "lenient_serde::string")]
    pub start_time: String,
    #[serde(default, with = "lenient_serde::string")]
    pub end_time: String,
    #[serde(default, with = "lenient_serde::option")]
    pub thumbnail: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub channel_no: Option<String>,
    #[serde(default, with = "lenient_serde::list")]
    pub filter: Vec<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub series_id: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub rating: Option<String>,
    #[serde(default)]
    pub flag: FlagSet<EventFlag>,
    #[serde(default)]
    pub tags: FlagSet<EventTag>,
    #[serde(default)]
    pub program: Program,
}

impl Event {
    /// Start instant; unparseable values fall back to the Unix epoch
    pub fn start_instant(&self) -> DateTime<Utc> {
        parse_instant_or_epoch(&self.start_time)
    }

    /// End instant; unparseable values fall back to the Unix epoch
    pub fn end_instant(&self) -> DateTime<Utc> {
        parse_instant_or_epoch(&self.end_time)
    }

    pub fn has_flag(&self, flag: EventFlag) -> bool {
        self.flag.contains(&flag)
    }

    pub fn has_tag(&self, tag: EventTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// A station in the lineup together with the airings collected for it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default, with = "lenient_serde::string")]
    pub call_sign: String,
    #[serde(default, with = "lenient_serde::option")]
    pub affiliate_name: Option<String>,
    #[serde(default, with = "lenient_serde::option")]
    pub affiliate_call_sign: Option<String>,
    #[serde(default, with = "lenient_serde::string")]
    pub channel_id: String,
    #[serde(default, with = "lenient_serde::option")]
    pub channel_no: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, with = "lenient_serde::option")]
    pub thumbnail: Option<String>,
}

/// Body of a single grid API chunk response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridApiResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Merged listings keyed by channel id.
///
/// Events from later chunks are appended to the channel already present;
/// nothing is deduplicated. Iteration order is unspecified, the XMLTV
/// generator sorts on output.
#[derive(Debug, Clone, Default)]
pub struct ListingsPayload {
    channels: HashMap<String, Channel>,
}

impl ListingsPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel, or append its events if the channel id is known.
    ///
    /// Returns `true` when the channel id was seen for the first time.
    pub fn merge_channel(&mut self, channel: Channel) -> bool {
        match self.channels.get_mut(&channel.channel_id) {
            Some(existing) => {
                existing.events.extend(channel.events);
                false
            }
            None => {
                self.channels.insert(channel.channel_id.clone(), channel);
                true
            }
        }
    }

    pub fn get(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.get(channel_id)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Total number of airings across all channels
    pub fn event_count(&self) -> usize {
        self.channels.values().map(|c| c.events.len()).sum()
    }
}

impl FromIterator<Channel> for ListingsPayload {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut payload = Self::new();
        for channel in iter {
            payload.merge_channel(channel);
        }
        payload
    }
}
