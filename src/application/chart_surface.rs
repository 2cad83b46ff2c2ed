// Port for the charting library the controllers draw on
use crate::domain::error::Result;
use crate::domain::panel::{PanelId, PanelSpec};
use crate::domain::trace::PanelTrace;

/// Visual properties to change on a set of traces, addressed by position.
/// Each vector is indexed like the `indices` slice passed with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestylePatch {
    pub opacity: Vec<f64>,
    pub line_width: Option<Vec<f64>>,
}

pub trait ChartSurface {
    /// Draw a new panel; returns the display color given to each trace
    fn new_plot(&mut self, panel: PanelId, traces: Vec<PanelTrace>, spec: &PanelSpec)
    -> Vec<String>;

    /// Append traces after the ones already on the panel
    fn add_traces(&mut self, panel: PanelId, traces: Vec<PanelTrace>) -> Result<()>;

    fn restyle(&mut self, panel: PanelId, patch: &RestylePatch, indices: &[usize]) -> Result<()>;

    fn trace_count(&self, panel: PanelId) -> usize;
}
