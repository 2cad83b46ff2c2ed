// Console event handlers - thin adapters from events to page state
use crate::application::chart_controller::SelectionOutcome;
use crate::application::dashboard_service::Completion;
use crate::application::page_controller::{ContentRegion, PageController};
use crate::infrastructure::plotly::PlotlyBoard;
use crate::presentation::app_state::AppState;
use crate::presentation::commands::{CommandError, HELP, UiEvent, parse_command};

/// What the loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Repaint,
    Quit,
}

/// Handle one console line
pub fn handle_line(state: &mut AppState, line: &str) -> Flow {
    match parse_command(line) {
        Ok(event) => handle_event(state, event),
        Err(CommandError::Empty) => Flow::Continue,
        Err(e) => {
            println!("{}", e);
            Flow::Continue
        }
    }
}

pub fn handle_event(state: &mut AppState, event: UiEvent) -> Flow {
    match event {
        UiEvent::ShowView(view) => {
            let pending = state.page.show_view(view);
            state.dispatch(pending);
            Flow::Repaint
        }
        UiEvent::ToggleYear(year) => repaint_if(state.page.toggle_year(year), "year"),
        UiEvent::SelectSeason(season) => {
            let changed = state.page.select_season(season);
            if changed {
                println!("{}", state.page.trend_form().season_info());
            }
            repaint_if(changed, "season")
        }
        UiEvent::SelectLocation(location) => {
            repaint_if(state.page.select_location(location), "location")
        }
        UiEvent::Trigger => {
            let pending = state.page.trigger();
            state.dispatch(pending);
            Flow::Repaint
        }
        UiEvent::Chart(chart_event) => match state.page.handle_chart_event(chart_event) {
            Ok(SelectionOutcome::Selected(index)) => {
                tracing::debug!(index, "active series changed");
                Flow::Repaint
            }
            Ok(SelectionOutcome::Ignored) => Flow::Continue,
            Err(e) => {
                tracing::error!("restyle failed: {}", e);
                Flow::Continue
            }
        },
        UiEvent::Status => {
            println!("{}", status_line(&state.page));
            Flow::Continue
        }
        UiEvent::Help => {
            println!("{}", HELP);
            Flow::Continue
        }
        UiEvent::Quit => Flow::Quit,
    }
}

pub fn handle_completion(state: &mut AppState, completion: Completion) -> Flow {
    if state.page.complete(completion.token, completion.outcome) {
        println!("{}", status_line(&state.page));
        Flow::Repaint
    } else {
        Flow::Continue
    }
}

fn repaint_if(changed: bool, what: &str) -> Flow {
    if changed {
        Flow::Repaint
    } else {
        println!("{} is not part of the current view", what);
        Flow::Continue
    }
}

pub fn status_line(page: &PageController<PlotlyBoard>) -> String {
    let mut line = format!("[{}] {}", page.view().methodology_id(), page.region().kind());
    match page.region() {
        ContentRegion::Image { url } => line.push_str(&format!(": {}", url)),
        ContentRegion::SeasonCharts(charts) => {
            line.push_str(&format!(
                ": active series {} ({} of {})",
                charts.active_name(),
                charts.selection().active() + 1,
                charts.selection().count()
            ))
        }
        region => {
            if let Some(text) = region.text() {
                line.push_str(&format!(": {}", text));
            }
        }
    }
    if let Some(control) = page.control() {
        line.push_str(&format!(" | {}", control.label()));
    }
    line
}
