// Console event loop - merges typed commands with finished requests
use std::path::Path;

use anyhow::Context;
use async_stream::stream;
use futures::stream::{self, Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{LinesStream, ReceiverStream};

use crate::application::dashboard_service::{Completion, DashboardService};
use crate::application::page_controller::PageController;
use crate::infrastructure::config::OutputSettings;
use crate::infrastructure::plotly::PlotlyBoard;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{Flow, handle_completion, handle_line};
use crate::presentation::html::render_page;

const COMPLETION_BUFFER: usize = 16;

#[derive(Debug)]
pub enum LoopEvent {
    Command(String),
    Completed(Completion),
    InputClosed,
}

/// One event per input line, then `InputClosed` at EOF
pub fn command_stream<R>(reader: R) -> impl Stream<Item = LoopEvent>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream! {
        let mut lines = LinesStream::new(BufReader::new(reader).lines());
        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => yield LoopEvent::Command(line),
                Err(e) => {
                    tracing::error!("failed to read input: {}", e);
                    break;
                }
            }
        }
        yield LoopEvent::InputClosed;
    }
}

/// Run until `quit`, or until input ends and nothing is in flight
pub async fn run<R>(
    reader: R,
    page: PageController<PlotlyBoard>,
    service: DashboardService,
    output: &OutputSettings,
) -> anyhow::Result<PageController<PlotlyBoard>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(COMPLETION_BUFFER);
    let mut state = AppState::new(page, service, tx);
    let html_path = Path::new(&output.html_path);

    let completions = ReceiverStream::new(rx).map(LoopEvent::Completed);
    let mut events = stream::select(Box::pin(command_stream(reader)), completions);

    write_page(&state, html_path).await?;
    let mut input_closed = false;

    while let Some(event) = events.next().await {
        let flow = match event {
            LoopEvent::Command(line) => handle_line(&mut state, &line),
            LoopEvent::Completed(completion) => handle_completion(&mut state, completion),
            LoopEvent::InputClosed => {
                input_closed = true;
                Flow::Continue
            }
        };

        match flow {
            Flow::Quit => break,
            Flow::Repaint => write_page(&state, html_path).await?,
            Flow::Continue => {}
        }

        if input_closed && !state.page.is_pending() {
            tracing::info!("input closed, nothing pending");
            break;
        }
    }

    Ok(state.page)
}

async fn write_page(state: &AppState, path: &Path) -> anyhow::Result<()> {
    tokio::fs::write(path, render_page(&state.page))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "page written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mock_api::MockAnalysisApi;
    use crate::application::page_controller::{ContentRegion, View};
    use crate::domain::analysis::Location;
    use crate::domain::dashboard::ViewRequest;
    use crate::domain::error::DashboardError;
    use crate::infrastructure::config::ChartSettings;
    use std::sync::Arc;

    fn output(name: &str) -> OutputSettings {
        let path = std::env::temp_dir().join(format!(
            "pollen-dashboard-{}-{}.html",
            name,
            std::process::id()
        ));
        OutputSettings {
            html_path: path.to_string_lossy().into_owned(),
        }
    }

    fn page() -> PageController<PlotlyBoard> {
        PageController::new(
            ChartSettings {
                default_active_index: 1,
                ..ChartSettings::default()
            },
            2025,
        )
    }

    #[tokio::test]
    async fn test_command_stream_ends_with_input_closed() {
        let events: Vec<LoopEvent> = command_stream(&b"view onset\nstatus\n"[..]).collect().await;

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], LoopEvent::Command(line) if line == "view onset"));
        assert!(matches!(events[2], LoopEvent::InputClosed));
    }

    #[tokio::test]
    async fn test_run_waits_for_pending_request_after_eof() {
        let api = Arc::new(MockAnalysisApi::new());
        let service = DashboardService::new(api.clone());
        let output = output("onset");

        let page = run(
            &b"view onset\nlocation kamenac\nplot\nclick temp 0\n"[..],
            page(),
            service,
            &output,
        )
        .await
        .unwrap();

        assert_eq!(api.calls(), vec![ViewRequest::SeasonPlot(Location::Kamenac)]);
        assert_eq!(page.view(), View::PollenSeasonOnset);
        assert!(matches!(page.region(), ContentRegion::SeasonCharts(_)));

        let html = tokio::fs::read_to_string(&output.html_path).await.unwrap();
        assert!(html.contains("Plotly.newPlot(\"ndvi-chart-container\""));
        let _ = tokio::fs::remove_file(&output.html_path).await;
    }

    #[tokio::test]
    async fn test_run_stops_on_quit() {
        let api = MockAnalysisApi::new().with_pollen(Err(DashboardError::Transport(
            "connection refused".to_string(),
        )));
        let service = DashboardService::new(Arc::new(api));
        let output = output("quit");

        let page = run(&b"status\nquit\nview current\n"[..], page(), service, &output)
            .await
            .unwrap();

        assert_eq!(page.view(), View::VegetationTrend);
        assert!(!page.is_pending());
        let _ = tokio::fs::remove_file(&output.html_path).await;
    }

    #[tokio::test]
    async fn test_run_shows_current_pollen_error() {
        let api = MockAnalysisApi::new().with_pollen(Err(DashboardError::Transport(
            "connection refused".to_string(),
        )));
        let service = DashboardService::new(Arc::new(api));
        let output = output("current");

        let page = run(&b"view current\n"[..], page(), service, &output)
            .await
            .unwrap();

        assert_eq!(
            page.region().text(),
            Some("Chyba pri načítaní aktuálnych peľových údajov: connection refused")
        );
        let html = tokio::fs::read_to_string(&output.html_path).await.unwrap();
        assert!(html.contains("class=\"error-message\""));
        let _ = tokio::fs::remove_file(&output.html_path).await;
    }
}
