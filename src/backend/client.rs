//! Analysis Backend Client
//!
//! A JSON-over-HTTP client for the series, change-point and summary statistics endpoints.

use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::backend::types::{
    ChangePointIndex, ChangePointResponse, DateRange, SeriesPoint, SummaryStats,
};
use crate::consts::cli_consts::backend;
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("regime-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn with_timeout(environment: Environment, timeout: Duration) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(backend::connect_timeout().min(timeout))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.backend_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Full URL of the series endpoint for `range`.
    pub fn series_url(&self, range: &DateRange) -> String {
        let mut url = self.build_url(backend::DATA_ENDPOINT);
        let query = range
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let response = self.client.get(url).send().await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(BackendError::Decode)
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    async fn fetch_series(&self, range: &DateRange) -> Result<Vec<SeriesPoint>, BackendError> {
        self.get_json(&self.series_url(range)).await
    }

    async fn fetch_change_point(&self) -> Result<ChangePointIndex, BackendError> {
        let url = self.build_url(backend::CHANGE_POINT_ENDPOINT);
        let response: ChangePointResponse = self.get_json(&url).await?;
        Ok(response.change_point_index)
    }

    async fn fetch_summary_stats(&self) -> Result<SummaryStats, BackendError> {
        let url = self.build_url(backend::SUMMARY_STATS_ENDPOINT);
        self.get_json(&url).await
    }
}
