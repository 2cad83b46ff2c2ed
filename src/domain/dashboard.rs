// Payloads a dashboard view renders
use super::analysis::{Location, TrendRequest};
use super::series::{SeriesSet, ThresholdMap};

/// Everything the pollen-season onset view plots.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonPlot {
    pub ndvi: SeriesSet,
    pub temperature: SeriesSet,
    pub thresholds: ThresholdMap,
}

impl SeasonPlot {
    pub fn new(ndvi: SeriesSet, temperature: SeriesSet, thresholds: ThresholdMap) -> Self {
        Self {
            ndvi,
            temperature,
            thresholds,
        }
    }
}

/// Successful response of one view request.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPayload {
    TrendImage { image_url: String },
    SeasonPlot(SeasonPlot),
    CurrentPollen(SeriesSet),
}

/// One request a dashboard view sends to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Trend(TrendRequest),
    SeasonPlot(Location),
    CurrentPollen,
}
