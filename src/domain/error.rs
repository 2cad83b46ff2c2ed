// Dashboard errors - everything that can end a pending view
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    // Remote analysis service
    #[error("{0}")]
    Transport(String),

    /// Non-success status; `message` is what the server put into `error`.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response payload: {0}")]
    MalformedPayload(String),

    // Chart state
    #[error("Active series index {index} is out of range for {count} series")]
    SelectionOutOfRange { index: usize, count: usize },

    #[error(
        "Threshold for '{series}' spans {start}..={end} but the series has {len} samples"
    )]
    ThresholdOutOfRange {
        series: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Panels are not index-aligned: {primary} primary vs {secondary} secondary series")]
    MisalignedPanels { primary: usize, secondary: usize },

    #[error("Panel '{panel}' has no trace at index {index}")]
    UnknownTrace { panel: String, index: usize },

    #[error("No series to render")]
    EmptySeriesSet,
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::MalformedPayload(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
