//! Listings sources
//!
//! A source turns a window start time into a decoded grid chunk. The grid
//! API is the only source today; the trait keeps the ingestor independent of
//! HTTP so it can be driven by canned chunks.

pub mod grid;
pub mod traits;

pub use grid::GridSource;
pub use traits::ListingsSource;
