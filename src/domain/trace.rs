// Traces placed on a panel: base lines and derived threshold markers
use super::series::{Sample, Series};

/// Tooltip text for one panel; fixed precision, never touches the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverFormat {
    pub x_label: String,
    pub quantity: String,
    pub unit: String,
    pub precision: usize,
}

impl HoverFormat {
    pub fn new(x_label: &str, quantity: &str, unit: &str, precision: usize) -> Self {
        Self {
            x_label: x_label.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            precision,
        }
    }

    /// Plotly hovertemplate for a line named `name`.
    pub fn template(&self, name: &str) -> String {
        format!(
            "<b>{name}</b><br>{}: %{{x}}<br>{}: %{{y:.{}f}}{}<extra></extra>",
            self.x_label, self.quantity, self.precision, self.unit
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub series: Series,
    pub hover: Option<HoverFormat>,
}

impl LineTrace {
    pub fn new(series: Series, hover: Option<HoverFormat>) -> Self {
        Self { series, hover }
    }
}

/// Marker points on the onset sub-range of the secondary line `owner_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOverlay {
    pub owner_name: String,
    pub samples: Vec<Sample>,
    pub color: String,
    pub precision: usize,
}

impl MarkerOverlay {
    pub fn name(&self) -> String {
        format!("{} - Threshold", self.owner_name)
    }

    pub fn template(&self) -> String {
        format!(
            "<b>{}</b><br>5+ days ≥5°C<br>%{{x}}<br>%{{y:.{}f}}°C<extra></extra>",
            self.owner_name, self.precision
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelTrace {
    Line(LineTrace),
    MarkerOverlay(MarkerOverlay),
}

impl PanelTrace {
    pub fn name(&self) -> String {
        match self {
            PanelTrace::Line(line) => line.series.name.clone(),
            PanelTrace::MarkerOverlay(overlay) => overlay.name(),
        }
    }

    pub fn owner_name(&self) -> Option<&str> {
        match self {
            PanelTrace::Line(_) => None,
            PanelTrace::MarkerOverlay(overlay) => Some(&overlay.owner_name),
        }
    }

    pub fn samples(&self) -> &[Sample] {
        match self {
            PanelTrace::Line(line) => &line.series.samples,
            PanelTrace::MarkerOverlay(overlay) => &overlay.samples,
        }
    }
}
