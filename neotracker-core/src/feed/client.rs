//! NeoWs feed client
//!
//! Owns the HTTP client and issues the two GET operations the tracker
//! needs: the date-range batch feed and the lazy per-object lookup.
//! No retries; a failed request is terminal for that operation.

use chrono::NaiveDate;
use reqwest::Client;

use super::parser;
use super::types::{FeedSnapshot, NeoDetail};
use crate::error::FeedError;

/// Public NeoWs REST root
pub const DEFAULT_API_BASE: &str = "https://api.nasa.gov/neo/rest/v1";

/// The feed endpoint rejects windows longer than this many days.
pub const MAX_FEED_SPAN_DAYS: i64 = 7;

const USER_AGENT: &str = "Mozilla/5.0 neotracker/0.1";

/// NeoWs client – owns the HTTP client and endpoint configuration.
pub struct FeedClient {
    client:   Client,
    base_url: String,
    api_key:  String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build reqwest client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Clamp `end` so the queried window never exceeds the feed's 7-day
    /// limit. Returns `end` unchanged when it is already inside the window.
    pub fn clamp_end_date(start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let latest = start + chrono::Duration::days(MAX_FEED_SPAN_DAYS);
        if end > latest { latest } else { end }
    }

    /// Fetch the batch feed for `[start, end]`, clamping the end date first.
    pub async fn fetch_feed(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FeedSnapshot, FeedError> {
        let end = Self::clamp_end_date(start, end);
        tracing::info!("Fetching NEO feed for {} .. {}", start, end);

        let response = self
            .client
            .get(format!("{}/feed", self.base_url))
            .query(&[
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
                ("api_key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("NEO feed request failed with HTTP {}", status);
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let snapshot = parser::parse_feed_json(&body)?;

        tracing::info!(
            "NEO feed: {} objects between {} and {}",
            snapshot.objects.len(),
            start,
            end
        );
        Ok(snapshot)
    }

    /// Fetch extended detail for exactly one object. Used lazily on marker
    /// activation, never as part of the batch fetch.
    pub async fn fetch_detail(&self, neo_id: &str) -> Result<NeoDetail, FeedError> {
        tracing::debug!("Fetching detail for NEO {}", neo_id);

        let response = self
            .client
            .get(format!("{}/neo/{}", self.base_url, neo_id))
            .query(&[("api_key", self.api_key.clone())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        parser::parse_detail_json(&body)
    }
}
