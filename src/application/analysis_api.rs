// Port for the remote analysis service
use crate::domain::analysis::{Location, TrendRequest};
use crate::domain::dashboard::SeasonPlot;
use crate::domain::error::Result;
use crate::domain::series::SeriesSet;
use async_trait::async_trait;

#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Run the vegetation trend analysis; returns the URL of the rendered map
    async fn analyze_trend(&self, request: &TrendRequest) -> Result<String>;

    /// NDVI and temperature series plus onset thresholds for one location
    async fn season_plot(&self, location: Location) -> Result<SeasonPlot>;

    /// Pollen concentration series for the current year
    async fn current_pollen(&self) -> Result<SeriesSet>;
}
