//! Client-side filter engine
//!
//! Pure reduction of a feed result to the objects inside the user-supplied
//! size and distance bounds. Inputs are never mutated and relative order is
//! preserved.

use crate::feed::types::{FilterBounds, NearEarthObject};

/// Keep the objects whose minimum estimated diameter and first-approach
/// miss distance both fall inside the (inclusive) bounds.
///
/// An object without any close-approach event violates the upstream feed
/// contract; it is excluded with a warning rather than a panic.
pub fn apply_filters(neos: &[NearEarthObject], bounds: &FilterBounds) -> Vec<NearEarthObject> {
    let filtered: Vec<NearEarthObject> = neos
        .iter()
        .filter(|neo| {
            let Some(approach) = neo.first_approach() else {
                tracing::warn!("NEO {} has no close-approach data, excluding", neo.id);
                return false;
            };
            let diameter = neo.diameter_min_km;
            let distance = approach.miss_distance_km;
            diameter >= bounds.min_size
                && diameter <= bounds.max_size
                && distance >= bounds.min_distance
                && distance <= bounds.max_distance
        })
        .cloned()
        .collect();

    tracing::debug!("Filter kept {} of {} NEOs", filtered.len(), neos.len());
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::CloseApproach;

    fn neo(id: &str, diameter_min: f64, distance: f64) -> NearEarthObject {
        NearEarthObject {
            id: id.to_string(),
            name: format!("NEO {id}"),
            diameter_min_km: diameter_min,
            diameter_max_km: diameter_min * 2.0,
            close_approaches: vec![CloseApproach {
                date: "2024-01-02".to_string(),
                miss_distance_km: distance,
                relative_velocity_kmh: 40000.0,
            }],
        }
    }

    #[test]
    fn test_size_and_distance_bounds() {
        let neos = vec![neo("A", 0.5, 1_000_000.0), neo("B", 5.0, 2_000_000.0)];
        let bounds = FilterBounds {
            min_size: 0.0,
            max_size: 1.0,
            min_distance: 0.0,
            max_distance: 1_500_000.0,
        };
        let filtered = apply_filters(&neos, &bounds);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "A");
    }

    #[test]
    fn test_default_bounds_keep_everything() {
        let neos = vec![neo("A", 0.01, 100.0), neo("B", 40.0, 70_000_000.0)];
        let filtered = apply_filters(&neos, &FilterBounds::default());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let neos = vec![neo("A", 0.5, 1_000_000.0)];
        let bounds = FilterBounds {
            min_size: 0.5,
            max_size: 0.5,
            min_distance: 1_000_000.0,
            max_distance: 1_000_000.0,
        };
        assert_eq!(apply_filters(&neos, &bounds).len(), 1);
    }

    #[test]
    fn test_inverted_size_bounds_give_empty_result() {
        let neos = vec![neo("A", 0.5, 1_000_000.0), neo("B", 5.0, 2_000_000.0)];
        let bounds = FilterBounds {
            min_size: 2.0,
            max_size: 1.0,
            ..FilterBounds::default()
        };
        assert!(apply_filters(&neos, &bounds).is_empty());
    }

    #[test]
    fn test_inverted_distance_bounds_give_empty_result() {
        let neos = vec![neo("A", 0.5, 1_000_000.0)];
        let bounds = FilterBounds {
            min_distance: 2_000_000.0,
            max_distance: 1_000_000.0,
            ..FilterBounds::default()
        };
        assert!(apply_filters(&neos, &bounds).is_empty());
    }

    #[test]
    fn test_order_preserved_and_inputs_untouched() {
        let neos = vec![
            neo("C", 0.3, 100.0),
            neo("A", 0.3, 100.0),
            neo("B", 9.9, 100.0),
            neo("D", 0.3, 100.0),
        ];
        let bounds = FilterBounds {
            max_size: 1.0,
            ..FilterBounds::default()
        };
        let filtered = apply_filters(&neos, &bounds);
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "D"]);
        assert_eq!(neos.len(), 4);
    }

    #[test]
    fn test_object_without_approaches_is_excluded_not_a_panic() {
        let mut broken = neo("X", 0.5, 0.0);
        broken.close_approaches.clear();
        let neos = vec![broken, neo("A", 0.5, 100.0)];
        let filtered = apply_filters(&neos, &FilterBounds::default());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "A");
    }
}
