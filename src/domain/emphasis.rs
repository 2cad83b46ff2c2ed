// Emphasis styling - pure mapping from selection to per-trace styles
use super::selection::SelectionState;

pub const ACTIVE_OPACITY: f64 = 1.0;
pub const ACTIVE_LINE_WIDTH: f64 = 4.0;
pub const DIMMED_OPACITY: f64 = 0.15;
pub const DIMMED_LINE_WIDTH: f64 = 1.5;

pub const OVERLAY_VISIBLE: f64 = 1.0;
pub const OVERLAY_HIDDEN: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    pub opacity: f64,
    pub line_width: f64,
}

impl TraceStyle {
    pub const ACTIVE: TraceStyle = TraceStyle {
        opacity: ACTIVE_OPACITY,
        line_width: ACTIVE_LINE_WIDTH,
    };

    pub const DIMMED: TraceStyle = TraceStyle {
        opacity: DIMMED_OPACITY,
        line_width: DIMMED_LINE_WIDTH,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmphasisPlan {
    /// Applied by position to the base lines of both panels.
    pub lines: Vec<TraceStyle>,
    /// Opacity per overlay, in overlay order.
    pub overlays: Vec<f64>,
}

/// Computes the styles for `selection`.
///
/// Base lines are keyed by position because the panels are aligned by year.
/// Overlays are keyed by owner name: they only exist for some series and sit
/// after the base lines.
pub fn compute_emphasis<'a, I>(
    selection: &SelectionState,
    overlay_owners: I,
    active_name: &str,
) -> EmphasisPlan
where
    I: IntoIterator<Item = &'a str>,
{
    let lines = (0..selection.count())
        .map(|i| {
            if i == selection.active() {
                TraceStyle::ACTIVE
            } else {
                TraceStyle::DIMMED
            }
        })
        .collect();

    let overlays = overlay_owners
        .into_iter()
        .map(|owner| {
            if owner == active_name {
                OVERLAY_VISIBLE
            } else {
                OVERLAY_HIDDEN
            }
        })
        .collect();

    EmphasisPlan { lines, overlays }
}
