//! Map surface module
//!
//! Owns the marker set for the most recent query and renders it as a world
//! map image. Markers are destroyed and recreated wholesale on every query;
//! there is no incremental diffing.

pub mod renderer;
pub mod surface;

pub use renderer::MapRenderer;
pub use surface::{MapSurface, Marker};
