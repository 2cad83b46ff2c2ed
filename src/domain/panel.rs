// Panels of the result region and their axis/legend settings
use std::fmt;

use super::trace::HoverFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    /// NDVI per period, one line per year.
    Primary,
    /// Daily mean temperature per year, carries the onset markers.
    Secondary,
    /// Current-year pollen concentration.
    Snapshot,
}

impl PanelId {
    pub fn container_id(&self) -> &'static str {
        match self {
            PanelId::Primary => "ndvi-chart-container",
            PanelId::Secondary => "temp-chart-container",
            PanelId::Snapshot => "pollen-chart-container",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ndvi" | "primary" => Some(PanelId::Primary),
            "temp" | "secondary" => Some(PanelId::Secondary),
            "pollen" | "snapshot" => Some(PanelId::Snapshot),
            _ => None,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container_id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// `None` on either side leaves that end to autorange.
    pub y_range: (Option<f64>, Option<f64>),
    pub nticks: u32,
    /// Legend clicks drive the selection instead of toggling visibility.
    pub selection_legend: bool,
}

impl PanelSpec {
    pub fn ndvi() -> Self {
        Self {
            title: "NDVI - Porovnanie rokov".to_string(),
            x_title: "Obdobie".to_string(),
            y_title: "NDVI".to_string(),
            y_range: (Some(0.0), Some(1.0)),
            nticks: 10,
            selection_legend: true,
        }
    }

    pub fn temperature() -> Self {
        Self {
            title: "Teplota - Porovnanie rokov".to_string(),
            x_title: "Dátum".to_string(),
            y_title: "Teplota (°C)".to_string(),
            y_range: (Some(0.0), None),
            nticks: 15,
            selection_legend: true,
        }
    }

    pub fn current_pollen() -> Self {
        Self {
            title: "Aktuálna peľová situácia v tomto roku".to_string(),
            x_title: "Dátum".to_string(),
            y_title: "Koncentrácia peľu".to_string(),
            y_range: (Some(0.0), None),
            nticks: 15,
            selection_legend: false,
        }
    }
}

pub fn ndvi_hover(precision: usize) -> HoverFormat {
    HoverFormat::new("Obdobie", "NDVI", "", precision)
}

pub fn temperature_hover(precision: usize) -> HoverFormat {
    HoverFormat::new("Dátum", "Teplota", "°C", precision)
}
