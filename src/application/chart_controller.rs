// Interactive chart controller - two year-aligned panels sharing one active series
use tracing::debug;

use crate::application::chart_surface::{ChartSurface, RestylePatch};
use crate::domain::dashboard::SeasonPlot;
use crate::domain::emphasis::{EmphasisPlan, compute_emphasis};
use crate::domain::error::{DashboardError, Result};
use crate::domain::panel::{PanelId, PanelSpec, ndvi_hover, temperature_hover};
use crate::domain::selection::SelectionState;
use crate::domain::series::{Sample, SeriesSet, ThresholdMap};
use crate::domain::trace::{HoverFormat, LineTrace, MarkerOverlay, PanelTrace};
use crate::infrastructure::config::ChartSettings;

/// Click on a chart element, carrying the clicked trace's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    PointClick { panel: PanelId, curve_number: usize },
    LegendClick { panel: PanelId, curve_number: usize },
}

impl ChartEvent {
    pub fn panel(&self) -> PanelId {
        match self {
            ChartEvent::PointClick { panel, .. } | ChartEvent::LegendClick { panel, .. } => *panel,
        }
    }

    pub fn curve_number(&self) -> usize {
        match self {
            ChartEvent::PointClick { curve_number, .. }
            | ChartEvent::LegendClick { curve_number, .. } => *curve_number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(usize),
    /// Overlay markers and panels outside the pair never move the selection.
    Ignored,
}

pub struct InteractiveChartController<S> {
    surface: S,
    selection: SelectionState,
    secondary_names: Vec<String>,
    overlay_owners: Vec<String>,
}

impl<S: ChartSurface> InteractiveChartController<S> {
    /// Draws both panels of `plot` on `surface` and applies the initial emphasis.
    ///
    /// Nothing is drawn when the plot is rejected: empty or misaligned sets,
    /// a default selection past the last series, or a threshold range that
    /// does not fit its series.
    pub fn new(mut surface: S, plot: SeasonPlot, settings: &ChartSettings) -> Result<Self> {
        let SeasonPlot {
            ndvi,
            temperature,
            thresholds,
        } = plot;

        if ndvi.is_empty() {
            return Err(DashboardError::EmptySeriesSet);
        }
        if ndvi.len() != temperature.len() {
            return Err(DashboardError::MisalignedPanels {
                primary: ndvi.len(),
                secondary: temperature.len(),
            });
        }
        let selection = SelectionState::new(settings.default_active_index, ndvi.len())?;
        let markers = threshold_markers(&temperature, &thresholds)?;

        let precision = settings.value_precision;
        let secondary_names = temperature.iter().map(|s| s.name.clone()).collect();

        surface.new_plot(
            PanelId::Primary,
            line_traces(ndvi, ndvi_hover(precision)),
            &PanelSpec::ndvi(),
        );
        let colors = surface.new_plot(
            PanelId::Secondary,
            line_traces(temperature, temperature_hover(precision)),
            &PanelSpec::temperature(),
        );

        let overlays: Vec<PanelTrace> = markers
            .into_iter()
            .map(|(owner_index, owner_name, samples)| {
                PanelTrace::MarkerOverlay(MarkerOverlay {
                    owner_name,
                    samples,
                    color: colors.get(owner_index).cloned().unwrap_or_default(),
                    precision,
                })
            })
            .collect();
        let overlay_owners = overlays
            .iter()
            .filter_map(PanelTrace::owner_name)
            .map(str::to_string)
            .collect();
        if !overlays.is_empty() {
            surface.add_traces(PanelId::Secondary, overlays)?;
        }

        let mut controller = Self {
            surface,
            selection,
            secondary_names,
            overlay_owners,
        };
        controller.apply_emphasis()?;
        Ok(controller)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn overlay_owners(&self) -> &[String] {
        &self.overlay_owners
    }

    /// Name of the emphasized secondary series; overlays are matched against it.
    pub fn active_name(&self) -> &str {
        self.secondary_names
            .get(self.selection.active())
            .map_or("", String::as_str)
    }

    pub fn emphasis(&self) -> EmphasisPlan {
        compute_emphasis(
            &self.selection,
            self.overlay_owners.iter().map(String::as_str),
            self.active_name(),
        )
    }

    /// Restyle both panels for the current selection.
    pub fn apply_emphasis(&mut self) -> Result<()> {
        let plan = self.emphasis();

        let line_indices: Vec<usize> = (0..plan.lines.len()).collect();
        let line_patch = RestylePatch {
            opacity: plan.lines.iter().map(|s| s.opacity).collect(),
            line_width: Some(plan.lines.iter().map(|s| s.line_width).collect()),
        };
        self.surface
            .restyle(PanelId::Primary, &line_patch, &line_indices)?;
        self.surface
            .restyle(PanelId::Secondary, &line_patch, &line_indices)?;

        if !plan.overlays.is_empty() {
            // overlays are the last traces on the secondary panel
            let total = self.surface.trace_count(PanelId::Secondary);
            let first = total.checked_sub(plan.overlays.len()).ok_or_else(|| {
                DashboardError::UnknownTrace {
                    panel: PanelId::Secondary.to_string(),
                    index: plan.overlays.len(),
                }
            })?;
            let overlay_indices: Vec<usize> = (first..first + plan.overlays.len()).collect();
            let overlay_patch = RestylePatch {
                opacity: plan.overlays,
                line_width: None,
            };
            self.surface
                .restyle(PanelId::Secondary, &overlay_patch, &overlay_indices)?;
        }
        Ok(())
    }

    /// Point and legend clicks both select; the legend never toggles visibility.
    pub fn handle_event(&mut self, event: ChartEvent) -> Result<SelectionOutcome> {
        if !matches!(event.panel(), PanelId::Primary | PanelId::Secondary) {
            return Ok(SelectionOutcome::Ignored);
        }

        let index = event.curve_number();
        if !self.selection.select(index) {
            debug!(index, panel = %event.panel(), "click on threshold marker ignored");
            return Ok(SelectionOutcome::Ignored);
        }

        self.apply_emphasis()?;
        Ok(SelectionOutcome::Selected(index))
    }
}

fn line_traces(set: SeriesSet, hover: HoverFormat) -> Vec<PanelTrace> {
    set.into_inner()
        .into_iter()
        .map(|series| PanelTrace::Line(LineTrace::new(series, Some(hover.clone()))))
        .collect()
}

/// (owner position, owner name, marked samples) for every annotation whose
/// series exists in `secondary`.
fn threshold_markers(
    secondary: &SeriesSet,
    thresholds: &ThresholdMap,
) -> Result<Vec<(usize, String, Vec<Sample>)>> {
    let mut markers = Vec::new();
    for (name, annotation) in thresholds {
        let Some(index) = secondary.position_of(name) else {
            debug!(series = %name, "threshold has no matching series, skipping");
            continue;
        };
        let Some(series) = secondary.get(index) else {
            continue;
        };
        let samples = annotation
            .slice(series)
            .ok_or_else(|| DashboardError::ThresholdOutOfRange {
                series: name.clone(),
                start: annotation.start_index,
                end: annotation.end_index,
                len: series.len(),
            })?;
        markers.push((index, name.clone(), samples.to_vec()));
    }
    Ok(markers)
}
