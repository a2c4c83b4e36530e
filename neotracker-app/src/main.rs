//! NEO Tracker — interactive near-Earth-object map
//!
//! Queries the NASA NeoWs feed for a date range, filters the objects by
//! size and miss distance, places each one at a deterministic
//! pseudo-position, and renders the result as a world-map PNG. Marker
//! popups are enriched lazily with per-object detail.

mod command;
mod config;
mod controller;
mod logging;
mod map;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::sync::RwLock;

use neotracker_core::feed::FeedClient;

use command::Command;
use config::TrackerConfig;
use controller::FormController;
use map::{MapRenderer, MapSurface};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = TrackerConfig::load("config.toml")?;

    // Initialize logging
    let _logging_guard = logging::init_logging("logs", "neotracker", &config.log_level);

    tracing::info!("NEO Tracker starting...");
    tracing::info!("Using NeoWs endpoint {}", config.api_base);

    let client = Arc::new(FeedClient::new(
        config.api_base.clone(),
        config.api_key.clone(),
    ));
    let surface = Arc::new(RwLock::new(MapSurface::new()));
    let renderer = MapRenderer::new(&config.image_dir);
    let mut controller = FormController::new(client, surface, renderer);

    println!("NEO Tracker — type 'help' for commands.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match command::parse_command(&line) {
            Command::Query(form) => controller.submit(form).await,
            Command::Open(neo_id) => controller.open_marker(&neo_id).await,
            Command::Markers => controller.list_markers().await,
            Command::Help => println!("{}", command::USAGE),
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(message) => println!("{message}\n{}", command::USAGE),
        }
    }

    tracing::info!("NEO Tracker shutting down.");
    Ok(())
}
