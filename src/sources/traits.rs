//! Listings source trait definitions

use async_trait::async_trait;

use crate::errors::SourceResult;
use crate::models::GridApiResponse;

/// A source of time-windowed listings chunks
///
/// The ingestor asks for one chunk per window start and merges the results,
/// so implementations only need to know how to fetch a single window.
#[async_trait]
pub trait ListingsSource: Send + Sync {
    /// Hours covered by a single chunk
    fn chunk_hours(&self) -> u32;

    /// Unix start times (seconds) of every chunk needed from `now`
    fn chunk_start_times(&self, now: i64) -> Vec<i64>;

    /// Fetch and decode the chunk starting at `time` (unix seconds)
    async fn fetch_chunk(&self, time: i64) -> SourceResult<GridApiResponse>;
}
