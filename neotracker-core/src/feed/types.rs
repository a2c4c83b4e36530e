//! Near-Earth-object domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One close-approach event of a near-Earth object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Approach date as reported by the feed, e.g. "2024-01-03"
    pub date: String,
    /// Closest approach distance to Earth in kilometers
    pub miss_distance_km: f64,
    /// Velocity relative to Earth in km/h
    pub relative_velocity_kmh: f64,
}

/// A near-Earth object as returned by the batch feed.
///
/// Immutable once parsed; a new query produces a fresh set. The hazardous
/// flag is not part of the batch payload we keep — it is fetched lazily per
/// object via [`NeoDetail`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// NeoWs reference id, e.g. "3542519"
    pub id: String,
    /// Display name, e.g. "(2010 PK9)"
    pub name: String,
    /// Minimum estimated diameter in kilometers
    pub diameter_min_km: f64,
    /// Maximum estimated diameter in kilometers
    pub diameter_max_km: f64,
    /// Close-approach events inside the queried window, oldest first.
    /// The feed contract promises at least one, but callers must not rely
    /// on that.
    pub close_approaches: Vec<CloseApproach>,
}

impl NearEarthObject {
    /// First recorded close-approach event, if any
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.close_approaches.first()
    }
}

/// Extended per-object data fetched on demand from the lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoDetail {
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    /// NASA's "potentially hazardous asteroid" classification
    pub hazardous: bool,
}

/// A full parsed result of one feed query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
    /// Object count reported by the feed envelope
    pub element_count: u64,
    /// All objects in the window, flattened ascending by approach date
    pub objects: Vec<NearEarthObject>,
}

/// Numeric bounds for the client-side filter.
///
/// Blank form fields map to the defaults: 0 for lower bounds, unbounded
/// for upper bounds. All comparisons are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBounds {
    /// Minimum estimated diameter in km
    pub min_size: f64,
    /// Maximum estimated diameter in km
    pub max_size: f64,
    /// Minimum miss distance in km
    pub min_distance: f64,
    /// Maximum miss distance in km
    pub max_distance: f64,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            min_size: 0.0,
            max_size: f64::INFINITY,
            min_distance: 0.0,
            max_distance: f64::INFINITY,
        }
    }
}
