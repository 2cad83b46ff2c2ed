// State owned by the console event loop
use crate::application::dashboard_service::{Completion, DashboardService};
use crate::application::page_controller::{PageController, PendingRequest};
use crate::infrastructure::plotly::PlotlyBoard;
use tokio::sync::mpsc;

pub struct AppState {
    pub page: PageController<PlotlyBoard>,
    pub service: DashboardService,
    completions: mpsc::Sender<Completion>,
}

impl AppState {
    pub fn new(
        page: PageController<PlotlyBoard>,
        service: DashboardService,
        completions: mpsc::Sender<Completion>,
    ) -> Self {
        Self {
            page,
            service,
            completions,
        }
    }

    /// Start `pending` in the background; its completion re-enters the loop.
    pub fn dispatch(&self, pending: Option<PendingRequest>) {
        if let Some(pending) = pending {
            self.service.spawn(pending, self.completions.clone());
        }
    }
}
