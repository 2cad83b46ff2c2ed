// Dashboard service - runs one view request against the analysis API
use crate::application::analysis_api::AnalysisApi;
use crate::application::page_controller::{PendingRequest, RequestToken};
use crate::domain::dashboard::{ViewPayload, ViewRequest};
use crate::domain::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outcome of a request, tagged with the token it was issued under.
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: Result<ViewPayload>,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn AnalysisApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AnalysisApi>) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, request: ViewRequest) -> Result<ViewPayload> {
        match request {
            ViewRequest::Trend(trend) => {
                let image_url = self.api.analyze_trend(&trend).await?;
                Ok(ViewPayload::TrendImage { image_url })
            }
            ViewRequest::SeasonPlot(location) => {
                let plot = self.api.season_plot(location).await?;
                Ok(ViewPayload::SeasonPlot(plot))
            }
            ViewRequest::CurrentPollen => {
                let series = self.api.current_pollen().await?;
                Ok(ViewPayload::CurrentPollen(series))
            }
        }
    }

    /// Run `pending` on its own task; the result comes back through `tx`.
    pub fn spawn(&self, pending: PendingRequest, tx: mpsc::Sender<Completion>) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let PendingRequest { token, request } = pending;
            let outcome = service.fetch(request).await;
            if let Err(e) = &outcome {
                tracing::warn!(token = token.value(), "request failed: {}", e);
            }
            // The receiver only goes away on shutdown.
            let _ = tx.send(Completion { token, outcome }).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mock_api::MockAnalysisApi;
    use crate::domain::analysis::{Location, Season, TrendRequest};
    use crate::domain::error::DashboardError;

    #[tokio::test]
    async fn test_fetch_trend_returns_image_url() {
        let api = Arc::new(MockAnalysisApi::new());
        let service = DashboardService::new(api.clone());
        let request = ViewRequest::Trend(TrendRequest {
            years: vec![2025, 2024],
            season: Season::MidSpring,
        });

        let payload = service.fetch(request.clone()).await.unwrap();

        assert_eq!(
            payload,
            ViewPayload::TrendImage {
                image_url: "/static/output/trend_map.png".to_string()
            }
        );
        assert_eq!(api.calls(), vec![request]);
    }

    #[tokio::test]
    async fn test_fetch_passes_server_errors_through() {
        let api = Arc::new(MockAnalysisApi::new().with_season(Err(DashboardError::Server {
            status: 404,
            message: "unknown location".to_string(),
        })));
        let service = DashboardService::new(api);

        let err = service
            .fetch(ViewRequest::SeasonPlot(Location::Kamenac))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown location");
    }

    #[tokio::test]
    async fn test_spawn_reports_completion_with_token() {
        let service = DashboardService::new(Arc::new(MockAnalysisApi::new()));
        let (tx, mut rx) = mpsc::channel(4);
        let pending = PendingRequest {
            token: RequestToken::default().next(),
            request: ViewRequest::CurrentPollen,
        };

        service.spawn(pending, tx).await.unwrap();
        let completion = rx.recv().await.unwrap();

        assert_eq!(completion.token, RequestToken::default().next());
        assert!(matches!(
            completion.outcome,
            Ok(ViewPayload::CurrentPollen(ref set)) if set.len() == 1
        ));
    }
}
