//! Accumulates grid chunks into a single listings payload.
//!
//! Chunks may complete in any order. Each chunk's events are genre-normalized
//! and then merged by channel id: the first chunk to mention a channel
//! provides its metadata, later chunks only contribute events.

use tracing::debug;

use super::genre::normalize_genres;
use crate::models::{GridApiResponse, ListingsPayload};

/// Statistics about accumulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulatorStats {
    pub chunks_merged: usize,
    pub channels_seen: usize,
    pub events_merged: usize,
}

/// Merges chunk responses into a [`ListingsPayload`]
#[derive(Debug, Default)]
pub struct ListingsAccumulator {
    payload: ListingsPayload,
    stats: AccumulatorStats,
}

impl ListingsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and merge one chunk response
    pub fn add_chunk(&mut self, response: GridApiResponse) {
        for mut channel in response.channels {
            channel.events.iter_mut().for_each(normalize_genres);

            let event_count = channel.events.len();
            let channel_id = channel.channel_id.clone();
            if self.payload.merge_channel(channel) {
                self.stats.channels_seen += 1;
                debug!("New channel {} with {} events", channel_id, event_count);
            } else {
                debug!("Appended {} events to channel {}", event_count, channel_id);
            }
            self.stats.events_merged += event_count;
        }
        self.stats.chunks_merged += 1;
    }

    pub fn stats(&self) -> AccumulatorStats {
        self.stats
    }

    /// Finish accumulation and hand over the merged payload
    pub fn finish(self) -> ListingsPayload {
        self.payload
    }
}
