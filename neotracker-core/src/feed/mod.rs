//! NASA NeoWs feed module
//!
//! Fetches the near-Earth-object feed for a date range, parses the JSON
//! envelope into domain types, and exposes a lazy per-object detail lookup.

pub mod client;
pub mod parser;
pub mod types;

pub use client::FeedClient;
pub use types::{CloseApproach, FeedSnapshot, FilterBounds, NearEarthObject, NeoDetail};
