// Analysis API client over HTTP/JSON
use crate::application::analysis_api::AnalysisApi;
use crate::domain::analysis::{Location, TrendRequest};
use crate::domain::dashboard::SeasonPlot;
use crate::domain::error::{DashboardError, Result};
use crate::domain::series::SeriesSet;
use crate::infrastructure::config::{ApiSettings, endpoint_url};
use crate::infrastructure::wire_mapper::{decode_series_set, decode_thresholds};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeBody<'a> {
    years: Vec<String>,
    season: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    image_url: String,
}

#[derive(Debug, Serialize)]
struct PlotBody<'a> {
    location: &'a str,
}

/// Each field is itself a JSON document.
#[derive(Debug, Deserialize)]
struct PlotResponse {
    ndvi_data: String,
    temp_data: String,
    threshold_dates: String,
}

#[derive(Debug, Deserialize)]
struct CurrentPollenResponse {
    pollen_data: String,
}

impl HttpAnalysisApi {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "analysis API responded");

        decode_response(status, &body)
    }
}

/// The body is JSON on success and on failure; a failure's `error` field is
/// what the user gets to see.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if !status.is_success() {
        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));
        return Err(DashboardError::Server {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn analyze_trend(&self, request: &TrendRequest) -> Result<String> {
        let body = AnalyzeBody {
            years: request.years.iter().map(|y| y.to_string()).collect(),
            season: request.season.key(),
        };
        let url = endpoint_url(&self.base_url, "/api/analyze");

        let response: AnalyzeResponse = self.execute(self.client.post(url).json(&body)).await?;
        Ok(response.image_url)
    }

    async fn season_plot(&self, location: Location) -> Result<SeasonPlot> {
        let url = endpoint_url(&self.base_url, "/api/plot");
        let body = PlotBody {
            location: location.key(),
        };

        let response: PlotResponse = self.execute(self.client.post(url).json(&body)).await?;
        Ok(SeasonPlot::new(
            decode_series_set(&response.ndvi_data)?,
            decode_series_set(&response.temp_data)?,
            decode_thresholds(&response.threshold_dates)?,
        ))
    }

    async fn current_pollen(&self) -> Result<SeriesSet> {
        let url = endpoint_url(&self.base_url, "/api/current_pollen");

        let response: CurrentPollenResponse = self.execute(self.client.get(url)).await?;
        decode_series_set(&response.pollen_data)
    }
}
