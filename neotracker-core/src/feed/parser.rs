//! NeoWs JSON parser
//!
//! Converts the raw feed and lookup payloads into domain types. The wire
//! format groups feed objects under `near_earth_objects` keyed by approach
//! date and carries miss distance / velocity as decimal strings.

use std::collections::BTreeMap;

use serde::Deserialize;
use chrono::Utc;

use super::types::{CloseApproach, FeedSnapshot, NearEarthObject, NeoDetail};
use crate::error::FeedError;

/// Raw diameter block, nested as `estimated_diameter.kilometers`
#[derive(Debug, Deserialize)]
struct RawDiameter {
    kilometers: RawDiameterRange,
}

#[derive(Debug, Deserialize)]
struct RawDiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Debug, Deserialize)]
struct RawMissDistance {
    kilometers: String,
}

#[derive(Debug, Deserialize)]
struct RawVelocity {
    kilometers_per_hour: String,
}

#[derive(Debug, Deserialize)]
struct RawApproach {
    close_approach_date: String,
    miss_distance: RawMissDistance,
    relative_velocity: RawVelocity,
}

/// Raw object as it appears in the feed arrays
#[derive(Debug, Deserialize)]
struct RawNeo {
    id: String,
    name: String,
    estimated_diameter: RawDiameter,
    #[serde(default)]
    close_approach_data: Vec<RawApproach>,
}

/// Feed envelope. A BTreeMap keeps the date groups in ascending calendar
/// order so the flattened sequence is deterministic.
#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    element_count: Option<u64>,
    near_earth_objects: Option<BTreeMap<String, Vec<RawNeo>>>,
}

/// Raw lookup payload for a single object
#[derive(Debug, Deserialize)]
struct RawDetail {
    estimated_diameter: RawDiameter,
    is_potentially_hazardous_asteroid: bool,
}

fn parse_km_field(raw: &str, field: &str, neo_id: &str) -> Result<f64, FeedError> {
    raw.trim().parse::<f64>().map_err(|_| {
        FeedError::data(format!("NEO {neo_id}: {field} is not numeric: {raw:?}"))
    })
}

fn convert_neo(raw: RawNeo) -> Result<NearEarthObject, FeedError> {
    let mut close_approaches = Vec::with_capacity(raw.close_approach_data.len());
    for approach in raw.close_approach_data {
        close_approaches.push(CloseApproach {
            miss_distance_km: parse_km_field(
                &approach.miss_distance.kilometers,
                "miss_distance.kilometers",
                &raw.id,
            )?,
            relative_velocity_kmh: parse_km_field(
                &approach.relative_velocity.kilometers_per_hour,
                "relative_velocity.kilometers_per_hour",
                &raw.id,
            )?,
            date: approach.close_approach_date,
        });
    }

    Ok(NearEarthObject {
        id: raw.id,
        name: raw.name,
        diameter_min_km: raw.estimated_diameter.kilometers.estimated_diameter_min,
        diameter_max_km: raw.estimated_diameter.kilometers.estimated_diameter_max,
        close_approaches,
    })
}

/// Parse a feed response body into a [`FeedSnapshot`].
///
/// The date-keyed groups are flattened into one sequence, ascending by
/// approach date, preserving the in-group order. A body without the
/// `near_earth_objects` field is a [`FeedError::Data`].
pub fn parse_feed_json(json: &str) -> Result<FeedSnapshot, FeedError> {
    let raw: RawFeed = serde_json::from_str(json)
        .map_err(|e| FeedError::data(format!("failed to decode feed body: {e}")))?;

    let groups = raw
        .near_earth_objects
        .ok_or_else(|| FeedError::data("feed body has no near_earth_objects field"))?;

    let mut objects = Vec::new();
    for (_date, group) in groups {
        for neo in group {
            objects.push(convert_neo(neo)?);
        }
    }

    Ok(FeedSnapshot {
        fetched_at: Utc::now(),
        element_count: raw.element_count.unwrap_or(objects.len() as u64),
        objects,
    })
}

/// Parse a single-object lookup body into a [`NeoDetail`].
pub fn parse_detail_json(json: &str) -> Result<NeoDetail, FeedError> {
    let raw: RawDetail = serde_json::from_str(json)
        .map_err(|e| FeedError::data(format!("failed to decode detail body: {e}")))?;

    Ok(NeoDetail {
        diameter_min_km: raw.estimated_diameter.kilometers.estimated_diameter_min,
        diameter_max_km: raw.estimated_diameter.kilometers.estimated_diameter_max,
        hazardous: raw.is_potentially_hazardous_asteroid,
    })
}
