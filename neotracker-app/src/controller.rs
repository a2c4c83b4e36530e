//! Form controller and status display
//!
//! Orchestrates one query: validate the form, fetch the feed, filter,
//! place markers, render the map. Also handles marker activation with the
//! lazy detail enrichment. Status is a single enum driven through one
//! display point, so exactly one indicator is visible at a time — or none
//! while results are shown.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use neotracker_core::feed::{FeedClient, FilterBounds, NearEarthObject, NeoDetail};
use neotracker_core::filter::apply_filters;
use neotracker_core::placement::pseudo_position;

use crate::map::{MapRenderer, MapSurface, Marker};

/// User-facing message for any failed batch query
pub const GENERIC_FETCH_ERROR: &str = "An error occurred while fetching data. Please try again.";
/// User-facing message for missing or unparseable dates
pub const INVALID_DATE_RANGE: &str = "Please enter a valid date range.";

/// Raw form input, exactly as typed. Blank numeric fields fall back to
/// their defaults during validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryForm {
    pub start_date: String,
    pub end_date: String,
    pub min_size: String,
    pub max_size: String,
    pub min_distance: String,
    pub max_distance: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bounds: FilterBounds,
}

impl QueryForm {
    /// Check the form before any network contact. Both dates are required
    /// and must parse; numeric fields that are blank or unparseable take
    /// their defaults (0 for lower bounds, unbounded for upper bounds).
    pub fn validate(&self) -> Result<ValidatedQuery, String> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;

        Ok(ValidatedQuery {
            start,
            end,
            bounds: FilterBounds {
                min_size: parse_bound(&self.min_size, 0.0),
                max_size: parse_bound(&self.max_size, f64::INFINITY),
                min_distance: parse_bound(&self.min_distance, 0.0),
                max_distance: parse_bound(&self.max_distance, f64::INFINITY),
            },
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| INVALID_DATE_RANGE.to_string())
}

fn parse_bound(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => default,
    }
}

/// Mutually exclusive states of the query surface
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Error(String),
    NoResults,
    Results(usize),
}

impl QueryStatus {
    /// The one status indicator to display, or None when results (or
    /// nothing yet) are on the map.
    pub fn indicator(&self) -> Option<String> {
        match self {
            QueryStatus::Idle | QueryStatus::Results(_) => None,
            QueryStatus::Loading => Some("Loading near-Earth objects...".to_string()),
            QueryStatus::Error(message) => Some(message.clone()),
            QueryStatus::NoResults => {
                Some("No near-Earth objects match the given filters.".to_string())
            }
        }
    }
}

/// Drives queries against the feed and owns the current status.
pub struct FormController {
    client: Arc<FeedClient>,
    surface: Arc<RwLock<MapSurface>>,
    renderer: MapRenderer,
    status: QueryStatus,
}

impl FormController {
    pub fn new(
        client: Arc<FeedClient>,
        surface: Arc<RwLock<MapSurface>>,
        renderer: MapRenderer,
    ) -> Self {
        Self {
            client,
            surface,
            renderer,
            status: QueryStatus::Idle,
        }
    }

    /// Single display point for status changes.
    fn set_status(&mut self, status: QueryStatus) {
        self.status = status;
        if let Some(indicator) = self.status.indicator() {
            println!("{indicator}");
        }
    }

    /// Handle one form submission: validate, fetch, filter, place, render.
    pub async fn submit(&mut self, form: QueryForm) {
        let query = match form.validate() {
            Ok(query) => query,
            Err(message) => {
                tracing::warn!("Rejected query form: {}", message);
                self.set_status(QueryStatus::Error(message));
                return;
            }
        };

        self.set_status(QueryStatus::Loading);
        // Prior markers go away before the request, like the page they
        // belonged to; the epoch bump also fences their pending enrichments.
        self.surface.write().await.clear();

        let snapshot = match self.client.fetch_feed(query.start, query.end).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!("NEO feed query failed: {}", err);
                self.set_status(QueryStatus::Error(GENERIC_FETCH_ERROR.to_string()));
                return;
            }
        };

        let filtered = apply_filters(&snapshot.objects, &query.bounds);
        if filtered.is_empty() {
            self.set_status(QueryStatus::NoResults);
            return;
        }

        {
            let mut surface = self.surface.write().await;
            for neo in &filtered {
                let (lat, lon) = pseudo_position(&neo.id, &neo.name);
                tracing::debug!("Placing NEO {} at lat {}, lon {}", neo.name, lat, lon);
                surface.add(Marker {
                    neo_id: neo.id.clone(),
                    name: neo.name.clone(),
                    lat,
                    lon,
                    popup: initial_popup(neo),
                });
            }
        }

        let (count, rendered) = {
            let surface = self.surface.read().await;
            (surface.len(), self.renderer.render(&surface).await)
        };
        match rendered {
            Ok(path) => {
                println!("Map written to {}", path.display());
                self.set_status(QueryStatus::Results(count));
            }
            Err(err) => {
                // Marker state is already consistent; only the image failed.
                tracing::error!("Failed to render NEO map: {:#}", err);
                self.set_status(QueryStatus::Error(GENERIC_FETCH_ERROR.to_string()));
            }
        }
    }

    /// Marker activation: show the popup now, enrich it in the background.
    ///
    /// The enrichment task captures the surface epoch; if another query
    /// lands before the detail fetch resolves, the update is dropped
    /// instead of touching a disposed marker. Failures are logged and
    /// swallowed — the popup keeps its initial content.
    pub async fn open_marker(&self, neo_id: &str) {
        let epoch = {
            let surface = self.surface.read().await;
            let Some(marker) = surface.get(neo_id) else {
                println!("No marker with id {neo_id} on the map.");
                return;
            };
            println!("{}", marker.popup);
            surface.epoch()
        };

        let client = self.client.clone();
        let surface = self.surface.clone();
        let neo_id = neo_id.to_string();
        tokio::spawn(async move {
            match client.fetch_detail(&neo_id).await {
                Ok(detail) => {
                    let mut surface = surface.write().await;
                    if surface.update_popup(epoch, &neo_id, &format_detail(&detail)) {
                        if let Some(marker) = surface.get(&neo_id) {
                            println!("{}", marker.popup);
                        }
                    } else {
                        tracing::debug!(
                            "Discarding detail for NEO {} fetched for a superseded query",
                            neo_id
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!("Detail fetch for NEO {} failed: {}", neo_id, err);
                }
            }
        });
    }

    /// Print the markers of the current query, one per line.
    pub async fn list_markers(&self) {
        let surface = self.surface.read().await;
        if surface.is_empty() {
            println!("No markers on the map. Run a query first.");
            return;
        }
        for marker in surface.markers() {
            println!(
                "{:>12}  {:<28} lat {:>6.1}  lon {:>7.1}",
                marker.neo_id, marker.name, marker.lat, marker.lon
            );
        }
    }
}

/// Popup content shown as soon as a marker exists
fn initial_popup(neo: &NearEarthObject) -> String {
    match neo.first_approach() {
        Some(approach) => format!(
            "{}\nApproach Date: {}\nDistance: {:.2} km\nVelocity: {:.2} km/h",
            neo.name, approach.date, approach.miss_distance_km, approach.relative_velocity_kmh
        ),
        None => neo.name.clone(),
    }
}

/// Lines appended to the popup once the detail fetch succeeds
fn format_detail(detail: &NeoDetail) -> String {
    format!(
        "Size: {:.2} - {:.2} km\nHazardous: {}",
        detail.diameter_min_km,
        detail.diameter_max_km,
        if detail.hazardous { "Yes" } else { "No" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use neotracker_core::feed::CloseApproach;

    fn form(start: &str, end: &str) -> QueryForm {
        QueryForm {
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..QueryForm::default()
        }
    }

    #[test]
    fn test_validate_requires_both_dates() {
        assert_eq!(
            form("", "").validate().unwrap_err(),
            INVALID_DATE_RANGE
        );
        assert_eq!(
            form("2024-01-01", "").validate().unwrap_err(),
            INVALID_DATE_RANGE
        );
        assert_eq!(
            form("", "2024-01-05").validate().unwrap_err(),
            INVALID_DATE_RANGE
        );
    }

    #[test]
    fn test_validate_rejects_unparseable_dates() {
        assert!(form("tomorrow", "2024-01-05").validate().is_err());
        assert!(form("2024-01-01", "01/05/2024").validate().is_err());
    }

    #[test]
    fn test_validate_blank_bounds_take_defaults() {
        let query = form("2024-01-01", "2024-01-05").validate().unwrap();
        assert_eq!(query.bounds, FilterBounds::default());
        assert_eq!(query.bounds.min_size, 0.0);
        assert_eq!(query.bounds.max_size, f64::INFINITY);
    }

    #[test]
    fn test_validate_garbage_bounds_take_defaults() {
        let mut f = form("2024-01-01", "2024-01-05");
        f.min_size = "abc".to_string();
        f.max_distance = "NaN".to_string();
        let query = f.validate().unwrap();
        assert_eq!(query.bounds.min_size, 0.0);
        assert_eq!(query.bounds.max_distance, f64::INFINITY);
    }

    #[test]
    fn test_validate_keeps_supplied_bounds() {
        let mut f = form("2024-01-01", "2024-01-05");
        f.min_size = "0.1".to_string();
        f.max_size = "2".to_string();
        f.min_distance = "1000".to_string();
        f.max_distance = "1500000".to_string();
        let query = f.validate().unwrap();
        assert_eq!(query.bounds.min_size, 0.1);
        assert_eq!(query.bounds.max_size, 2.0);
        assert_eq!(query.bounds.min_distance, 1000.0);
        assert_eq!(query.bounds.max_distance, 1_500_000.0);
    }

    #[test]
    fn test_status_indicator_exclusivity() {
        assert!(QueryStatus::Idle.indicator().is_none());
        assert!(QueryStatus::Results(12).indicator().is_none());
        assert!(
            QueryStatus::Loading
                .indicator()
                .unwrap()
                .contains("Loading")
        );
        assert_eq!(
            QueryStatus::Error(GENERIC_FETCH_ERROR.to_string())
                .indicator()
                .unwrap(),
            GENERIC_FETCH_ERROR
        );
        assert!(
            QueryStatus::NoResults
                .indicator()
                .unwrap()
                .contains("No near-Earth objects")
        );
    }

    #[test]
    fn test_initial_popup_format() {
        let neo = NearEarthObject {
            id: "3542519".to_string(),
            name: "(2010 PK9)".to_string(),
            diameter_min_km: 0.31,
            diameter_max_km: 0.69,
            close_approaches: vec![CloseApproach {
                date: "2024-01-02".to_string(),
                miss_distance_km: 1234567.891,
                relative_velocity_kmh: 45000.567,
            }],
        };
        let popup = initial_popup(&neo);
        assert_eq!(
            popup,
            "(2010 PK9)\nApproach Date: 2024-01-02\nDistance: 1234567.89 km\nVelocity: 45000.57 km/h"
        );
    }

    #[test]
    fn test_initial_popup_without_approach_degrades_to_name() {
        let neo = NearEarthObject {
            id: "1".to_string(),
            name: "Bare".to_string(),
            diameter_min_km: 0.1,
            diameter_max_km: 0.2,
            close_approaches: Vec::new(),
        };
        assert_eq!(initial_popup(&neo), "Bare");
    }

    #[test]
    fn test_format_detail() {
        let detail = NeoDetail {
            diameter_min_km: 0.311,
            diameter_max_km: 0.7,
            hazardous: true,
        };
        assert_eq!(format_detail(&detail), "Size: 0.31 - 0.70 km\nHazardous: Yes");

        let safe = NeoDetail {
            hazardous: false,
            ..detail
        };
        assert_eq!(format_detail(&safe), "Size: 0.31 - 0.70 km\nHazardous: No");
    }
}
