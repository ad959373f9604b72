//! Listings ingestion
//!
//! Fans out one request per chunk window, merges every chunk as it settles
//! and returns the complete payload. The first failing chunk aborts the
//! whole ingestion; requests still in flight are dropped.

use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Instant;
use tracing::{debug, error, info};

pub mod accumulator;
pub mod genre;

pub use accumulator::{AccumulatorStats, ListingsAccumulator};

use crate::errors::AppResult;
use crate::models::ListingsPayload;
use crate::sources::ListingsSource;
use crate::utils::human_format::format_elapsed;

/// Fetch every chunk from `now` (unix seconds) and merge them
pub async fn ingest_listings(
    source: &dyn ListingsSource,
    now: i64,
) -> AppResult<ListingsPayload> {
    let started = Instant::now();
    let start_times = source.chunk_start_times(now);
    let total = start_times.len();
    let total_hours = total as u64 * u64::from(source.chunk_hours());

    info!(
        "Fetching up to {} hours of listings in {}-hour chunks ({} requests)",
        total_hours,
        source.chunk_hours(),
        total
    );

    let mut pending: FuturesUnordered<_> = start_times
        .into_iter()
        .enumerate()
        .map(|(index, time)| async move { (index + 1, source.fetch_chunk(time).await) })
        .collect();

    let mut accumulator = ListingsAccumulator::new();
    while let Some((chunk, result)) = pending.next().await {
        let response = result.inspect_err(|e| {
            error!("Chunk {}/{} failed: {}", chunk, total, e);
        })?;
        debug!(
            "Chunk {}/{} returned {} channels",
            chunk,
            total,
            response.channels.len()
        );
        accumulator.add_chunk(response);
    }

    let stats = accumulator.stats();
    let payload = accumulator.finish();
    info!(
        "Completed fetching listings: {} unique channels, {} events from {} chunks in {}",
        payload.len(),
        stats.events_merged,
        stats.chunks_merged,
        format_elapsed(started.elapsed())
    );

    Ok(payload)
}
