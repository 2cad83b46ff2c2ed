//! In-memory analysis API for unit tests, plus payload fixtures

use std::sync::Mutex;

use async_trait::async_trait;

use super::analysis_api::AnalysisApi;
use crate::domain::analysis::{Location, TrendRequest};
use crate::domain::dashboard::{SeasonPlot, ViewRequest};
use crate::domain::error::Result;
use crate::domain::series::{Sample, Series, SeriesSet, ThresholdMap};

/// Answers every call with the configured result and records the request
pub struct MockAnalysisApi {
    trend: Result<String>,
    season: Result<SeasonPlot>,
    pollen: Result<SeriesSet>,
    calls: Mutex<Vec<ViewRequest>>,
}

impl MockAnalysisApi {
    pub fn new() -> Self {
        Self {
            trend: Ok("/static/output/trend_map.png".to_string()),
            season: Ok(season_plot(&["2023", "2024"], 10, ThresholdMap::new())),
            pollen: Ok(SeriesSet::new(vec![series("Ambrózia", 5, 10.0)])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_trend(mut self, result: Result<String>) -> Self {
        self.trend = result;
        self
    }

    pub fn with_season(mut self, result: Result<SeasonPlot>) -> Self {
        self.season = result;
        self
    }

    pub fn with_pollen(mut self, result: Result<SeriesSet>) -> Self {
        self.pollen = result;
        self
    }

    pub fn calls(&self) -> Vec<ViewRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, request: ViewRequest) {
        self.calls.lock().unwrap().push(request);
    }
}

impl Default for MockAnalysisApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisApi for MockAnalysisApi {
    async fn analyze_trend(&self, request: &TrendRequest) -> Result<String> {
        self.record(ViewRequest::Trend(request.clone()));
        self.trend.clone()
    }

    async fn season_plot(&self, location: Location) -> Result<SeasonPlot> {
        self.record(ViewRequest::SeasonPlot(location));
        self.season.clone()
    }

    async fn current_pollen(&self) -> Result<SeriesSet> {
        self.record(ViewRequest::CurrentPollen);
        self.pollen.clone()
    }
}

/// `len` samples on day labels with values that need rounding in tooltips
pub fn series(name: &str, len: usize, base: f64) -> Series {
    let samples = (0..len)
        .map(|i| Sample::new(format!("{:02}-03", i + 1), Some(base + i as f64 * 0.123_45)))
        .collect();
    Series::new(name, samples)
}

/// NDVI and temperature sets with one series per year
pub fn season_plot(years: &[&str], len: usize, thresholds: ThresholdMap) -> SeasonPlot {
    let ndvi = years.iter().map(|y| series(y, len, 0.2)).collect();
    let temperature = years.iter().map(|y| series(y, len, 3.0)).collect();
    SeasonPlot::new(ndvi, temperature, thresholds)
}
