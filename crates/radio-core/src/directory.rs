//! Station directory loader (radio-browser `stations/bycountry`).
//!
//! One request per load, no retry, no pagination beyond the configured limit.
//! Cancellation is the caller's business: drop the future to abort.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::station::{retain_playable, RawStation, Station};

/// Result of a successful directory load.
#[derive(Debug, Clone)]
pub struct Directory {
    /// Playable stations, in directory order.
    pub stations: Vec<Station>,
    /// How many records the directory returned before URL filtering.
    pub raw_count: usize,
    pub fetched_at: DateTime<Local>,
}

pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
    country: String,
    limit: u32,
}

impl DirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            limit: config.limit,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/json/stations/bycountry/{}?limit={}",
            self.base_url,
            urlencoding::encode(&self.country.to_lowercase()),
            self.limit
        )
    }

    pub async fn fetch_raw(&self) -> Result<Vec<RawStation>, DirectoryError> {
        let url = self.endpoint();
        debug!("directory: GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Status(response.status()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    pub async fn load(&self) -> Result<Directory, DirectoryError> {
        let raw = self.fetch_raw().await?;
        let raw_count = raw.len();
        let stations = retain_playable(raw);
        info!(
            "directory: {} records, {} playable",
            raw_count,
            stations.len()
        );
        Ok(Directory {
            stations,
            raw_count,
            fetched_at: Local::now(),
        })
    }
}

/// Stations whose display name is on the allow-list, in directory order.
///
/// Exact match, case-sensitive: `"radio city hindi"` does not match
/// `"Radio City Hindi"`.
pub fn trending_subset(stations: &[Station], names: &[String]) -> Vec<Station> {
    stations
        .iter()
        .filter(|s| names.iter().any(|n| n == &s.name))
        .cloned()
        .collect()
}
