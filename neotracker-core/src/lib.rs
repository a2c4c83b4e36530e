//! Core library for the NEO tracker
//!
//! Holds the NeoWs feed client, the wire-to-domain parser, the pure
//! size/distance filter engine, and the deterministic pseudo-position
//! generator. UI concerns (map surface, status display) live in the
//! application crate.

pub mod error;
pub mod feed;
pub mod filter;
pub mod placement;

pub use error::FeedError;
pub use feed::{CloseApproach, FeedClient, FeedSnapshot, FilterBounds, NearEarthObject, NeoDetail};
