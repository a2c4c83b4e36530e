//! World-map image renderer
//!
//! Generates an equirectangular world map with one dot per marker as SVG
//! and rasterizes it to PNG in the image-cache directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use fontdb::Database;
use resvg::tiny_skia;
use resvg::usvg::{Options, Tree};

use super::surface::MapSurface;

const MAP_FILENAME: &str = "neo_map.png";

/// Map renderer
pub struct MapRenderer {
    output_dir: PathBuf,
}

impl MapRenderer {
    const WIDTH: f64 = 1024.0;
    const HEIGHT: f64 = 512.0;
    const GRATICULE_STEP: i32 = 30;
    const MARKER_RADIUS: f64 = 5.0;
    const LABEL_OFFSET: f64 = 9.0;

    /// Create a new renderer writing into `output_dir`
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Render the current marker set to a PNG and return its path.
    pub async fn render(&self, surface: &MapSurface) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .context("Failed to create image output directory")?;

        let output_path = self.output_dir.join(MAP_FILENAME);
        let svg_content = self.generate_svg(surface);
        render_svg_to_png(&svg_content, &output_path).await?;

        tracing::info!(
            "Rendered NEO map with {} markers: {:?}",
            surface.len(),
            output_path
        );
        Ok(output_path)
    }

    /// Project (lat, lon) onto the image plane: x grows east, y grows south.
    fn project(lat: f64, lon: f64) -> (f64, f64) {
        let x = (lon + 180.0) / 360.0 * Self::WIDTH;
        let y = (90.0 - lat) / 180.0 * Self::HEIGHT;
        (x, y)
    }

    fn generate_svg(&self, surface: &MapSurface) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"##,
            w = Self::WIDTH,
            h = Self::HEIGHT
        ));
        svg.push_str(&format!(
            r##"<rect width="{w}" height="{h}" fill="#0b1d33"/>"##,
            w = Self::WIDTH,
            h = Self::HEIGHT
        ));

        // Graticule; equator and prime meridian slightly brighter
        let mut lon = -180;
        while lon <= 180 {
            let (x, _) = Self::project(0.0, lon as f64);
            let stroke = if lon == 0 { "#2e5a8f" } else { "#1e3a5f" };
            svg.push_str(&format!(
                r##"<line x1="{x:.1}" y1="0" x2="{x:.1}" y2="{h}" stroke="{stroke}" stroke-width="1"/>"##,
                h = Self::HEIGHT
            ));
            lon += Self::GRATICULE_STEP;
        }
        let mut lat = -90;
        while lat <= 90 {
            let (_, y) = Self::project(lat as f64, 0.0);
            let stroke = if lat == 0 { "#2e5a8f" } else { "#1e3a5f" };
            svg.push_str(&format!(
                r##"<line x1="0" y1="{y:.1}" x2="{w}" y2="{y:.1}" stroke="{stroke}" stroke-width="1"/>"##,
                w = Self::WIDTH
            ));
            lat += Self::GRATICULE_STEP;
        }

        for marker in surface.markers() {
            let (x, y) = Self::project(marker.lat, marker.lon);
            svg.push_str(&format!(
                r##"<circle cx="{x:.1}" cy="{y:.1}" r="{r}" fill="#f59e0b" stroke="#ffffff" stroke-width="1"/>"##,
                r = Self::MARKER_RADIUS
            ));
            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{ty:.1}" font-size="11" fill="#e2e8f0" text-anchor="middle">{label}</text>"##,
                ty = y - Self::LABEL_OFFSET,
                label = escape_xml(&marker.name)
            ));
        }

        svg.push_str(&format!(
            r##"<text x="8" y="{fy}" font-size="11" fill="#8aa4c4">{count} near-Earth objects</text>"##,
            fy = Self::HEIGHT - 8.0,
            count = surface.len()
        ));
        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

async fn render_svg_to_png(svg_content: &str, output_path: &Path) -> Result<()> {
    // Load fonts for the marker labels
    let mut fontdb = Database::new();
    fontdb.load_system_fonts();
    fontdb.load_fonts_dir("fonts");
    tracing::debug!("Loaded {} font faces", fontdb.len());

    let mut options = Options::default();
    options.font_family = "DejaVu Sans".to_string();
    options.fontdb = std::sync::Arc::new(fontdb);

    let tree = Tree::from_str(svg_content, &options).context("Failed to parse SVG")?;

    let size = tree.size();
    let width = size.width() as u32;
    let height = size.height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).context("Failed to create pixmap")?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .save_png(output_path)
        .context("Failed to save PNG")?;

    Ok(())
}
