// Plotly figure model behind the ChartSurface port
use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::application::chart_surface::{ChartSurface, RestylePatch};
use crate::domain::error::{DashboardError, Result};
use crate::domain::panel::{PanelId, PanelSpec};
use crate::domain::series::Sample;
use crate::domain::trace::PanelTrace;

/// Plotly's default colorway, handed out by trace position.
pub const COLORWAY: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const OVERLAY_MARKER_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotlyPanel {
    pub traces: Vec<Value>,
    pub layout: Value,
}

#[cfg(test)]
impl PlotlyPanel {
    pub fn opacity(&self, index: usize) -> Option<f64> {
        self.traces.get(index)?.get("opacity")?.as_f64()
    }

    pub fn line_width(&self, index: usize) -> Option<f64> {
        self.traces.get(index)?.get("line")?.get("width")?.as_f64()
    }

    pub fn trace_name(&self, index: usize) -> Option<&str> {
        self.traces.get(index)?.get("name")?.as_str()
    }

    pub fn color(&self, index: usize) -> Option<&str> {
        let trace = self.traces.get(index)?;
        trace
            .get("line")
            .and_then(|line| line.get("color"))
            .or_else(|| trace.get("marker").and_then(|m| m.get("color")))?
            .as_str()
    }
}

/// Every panel currently drawn in the result region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotlyBoard {
    panels: BTreeMap<PanelId, PlotlyPanel>,
}

#[cfg(test)]
impl PlotlyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, id: PanelId) -> Option<&PlotlyPanel> {
        self.panels.get(&id)
    }
}

impl PlotlyBoard {
    pub fn panels(&self) -> impl Iterator<Item = (PanelId, &PlotlyPanel)> {
        self.panels.iter().map(|(id, panel)| (*id, panel))
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut PlotlyPanel> {
        self.panels.get_mut(&id).ok_or(DashboardError::UnknownTrace {
            panel: id.to_string(),
            index: 0,
        })
    }
}

impl ChartSurface for PlotlyBoard {
    fn new_plot(
        &mut self,
        panel: PanelId,
        traces: Vec<PanelTrace>,
        spec: &PanelSpec,
    ) -> Vec<String> {
        let mut colors = Vec::with_capacity(traces.len());
        let traces = traces
            .iter()
            .enumerate()
            .map(|(position, trace)| {
                let color = trace_color(trace, position);
                let value = trace_json(trace, &color);
                colors.push(color);
                value
            })
            .collect();

        self.panels.insert(
            panel,
            PlotlyPanel {
                traces,
                layout: layout_json(spec),
            },
        );
        colors
    }

    fn add_traces(&mut self, panel: PanelId, traces: Vec<PanelTrace>) -> Result<()> {
        let target = self.panel_mut(panel)?;
        let offset = target.traces.len();
        for (i, trace) in traces.iter().enumerate() {
            let color = trace_color(trace, offset + i);
            target.traces.push(trace_json(trace, &color));
        }
        Ok(())
    }

    fn restyle(&mut self, panel: PanelId, patch: &RestylePatch, indices: &[usize]) -> Result<()> {
        let target = self.panel_mut(panel)?;
        if let Some(&index) = indices.iter().find(|&&i| i >= target.traces.len()) {
            return Err(DashboardError::UnknownTrace {
                panel: panel.to_string(),
                index,
            });
        }

        for (k, &index) in indices.iter().enumerate() {
            let trace = &mut target.traces[index];
            if let Some(opacity) = patch.opacity.get(k) {
                trace["opacity"] = json!(opacity);
            }
            if let Some(width) = patch.line_width.as_ref().and_then(|w| w.get(k)) {
                trace["line"]["width"] = json!(width);
            }
        }
        Ok(())
    }

    fn trace_count(&self, panel: PanelId) -> usize {
        self.panels.get(&panel).map_or(0, |p| p.traces.len())
    }
}

fn trace_color(trace: &PanelTrace, position: usize) -> String {
    match trace {
        PanelTrace::Line(line) => line
            .series
            .color
            .clone()
            .unwrap_or_else(|| COLORWAY[position % COLORWAY.len()].to_string()),
        PanelTrace::MarkerOverlay(overlay) => overlay.color.clone(),
    }
}

fn axis_values(samples: &[Sample]) -> (Vec<&str>, Vec<Option<f64>>) {
    samples.iter().map(|s| (s.x.as_str(), s.y)).unzip()
}

fn trace_json(trace: &PanelTrace, color: &str) -> Value {
    let (x, y) = axis_values(trace.samples());
    match trace {
        PanelTrace::Line(line) => {
            let series = &line.series;
            let mut value = json!({
                "type": series.trace_type.as_deref().unwrap_or("scatter"),
                "mode": series.mode.as_deref().unwrap_or("lines"),
                "name": trace.name(),
                "x": x,
                "y": y,
                "line": { "color": color },
            });
            if let Some(hover) = &line.hover {
                value["hovertemplate"] = json!(hover.template(&line.series.name));
            }
            value
        }
        PanelTrace::MarkerOverlay(overlay) => json!({
            "type": "scatter",
            "mode": "markers",
            "name": trace.name(),
            "x": x,
            "y": y,
            "marker": {
                "size": OVERLAY_MARKER_SIZE,
                "color": color,
                "symbol": "diamond",
                "line": { "color": color, "width": 2 },
            },
            "opacity": 0.0,
            "showlegend": false,
            "hovertemplate": overlay.template(),
        }),
    }
}

fn layout_json(spec: &PanelSpec) -> Value {
    let (y_min, y_max) = spec.y_range;
    let mut legend = json!({ "orientation": "v", "x": 1.02, "y": 1 });
    if spec.selection_legend {
        legend["itemclick"] = json!(false);
        legend["itemdoubleclick"] = json!(false);
    }

    json!({
        "title": { "text": spec.title },
        "xaxis": {
            "title": { "text": spec.x_title },
            "type": "category",
            "tickangle": -45,
            "nticks": spec.nticks,
        },
        "yaxis": {
            "title": { "text": spec.y_title },
            "range": [y_min, y_max],
        },
        "hovermode": "closest",
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "font": { "color": "#e5e7eb" },
        "legend": legend,
    })
}
