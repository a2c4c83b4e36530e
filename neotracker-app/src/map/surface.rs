//! Owned marker collection
//!
//! Replaces the ambient global marker list of a typical map-widget page
//! with one owned surface: `clear()` plus `add()` are the only mutations,
//! and popup updates are fenced by a query epoch so a detail fetch that
//! resolves after the next query cannot touch a disposed marker.

/// One rendered marker, associated 1:1 with a NEO id for the lifetime of a
/// single query's result set.
#[derive(Debug, Clone)]
pub struct Marker {
    pub neo_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Current popup text; enrichment appends to it
    pub popup: String,
}

/// The set of markers currently on the map, plus the query epoch that
/// produced them.
#[derive(Debug, Default)]
pub struct MapSurface {
    markers: Vec<Marker>,
    epoch: u64,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch of the marker set currently displayed. Captured by enrichment
    /// tasks so stale results can be recognized.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Remove every marker and start a new epoch. Always called before a
    /// new query's markers are added.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.epoch += 1;
    }

    pub fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn get(&self, neo_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.neo_id == neo_id)
    }

    /// Append `extra` to a marker's popup, but only if `epoch` still matches
    /// the displayed set and the marker still exists. Returns whether the
    /// update was applied.
    pub fn update_popup(&mut self, epoch: u64, neo_id: &str, extra: &str) -> bool {
        if epoch != self.epoch {
            tracing::debug!(
                "Dropping popup update for NEO {} from epoch {} (current {})",
                neo_id,
                epoch,
                self.epoch
            );
            return false;
        }
        match self.markers.iter_mut().find(|m| m.neo_id == neo_id) {
            Some(marker) => {
                marker.popup.push('\n');
                marker.popup.push_str(extra);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str) -> Marker {
        Marker {
            neo_id: id.to_string(),
            name: format!("NEO {id}"),
            lat: 10.0,
            lon: 20.0,
            popup: format!("NEO {id}\nDistance: 1.00 km"),
        }
    }

    #[test]
    fn test_clear_empties_and_bumps_epoch() {
        let mut surface = MapSurface::new();
        surface.add(marker("A"));
        surface.add(marker("B"));
        assert_eq!(surface.len(), 2);

        let before = surface.epoch();
        surface.clear();
        assert!(surface.is_empty());
        assert_eq!(surface.epoch(), before + 1);
    }

    #[test]
    fn test_get_by_neo_id() {
        let mut surface = MapSurface::new();
        surface.add(marker("A"));
        assert!(surface.get("A").is_some());
        assert!(surface.get("B").is_none());
    }

    #[test]
    fn test_update_popup_appends() {
        let mut surface = MapSurface::new();
        surface.add(marker("A"));

        let applied = surface.update_popup(surface.epoch(), "A", "Hazardous: No");
        assert!(applied);
        let popup = &surface.get("A").unwrap().popup;
        assert!(popup.starts_with("NEO A"));
        assert!(popup.ends_with("Hazardous: No"));
    }

    #[test]
    fn test_update_popup_refuses_stale_epoch() {
        let mut surface = MapSurface::new();
        surface.add(marker("A"));
        let stale = surface.epoch();

        // A new query replaced the markers, even re-adding the same NEO.
        surface.clear();
        surface.add(marker("A"));

        assert!(!surface.update_popup(stale, "A", "Hazardous: Yes"));
        assert!(!surface.get("A").unwrap().popup.contains("Hazardous"));
    }

    #[test]
    fn test_update_popup_refuses_missing_marker() {
        let mut surface = MapSurface::new();
        surface.add(marker("A"));
        assert!(!surface.update_popup(surface.epoch(), "Z", "Hazardous: Yes"));
    }
}
