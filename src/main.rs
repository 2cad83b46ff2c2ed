// Main entry point - Dependency injection and console setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use chrono::Datelike;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::page_controller::PageController;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_api::HttpAnalysisApi;
use crate::presentation::event_loop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the console
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pollen_dashboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create API client (infrastructure layer)
    let api = Arc::new(HttpAnalysisApi::new(&config.api)?);

    // Create services (application layer)
    let service = DashboardService::new(api);
    let page = PageController::new(config.chart.clone(), chrono::Local::now().year());

    println!(
        "Pollen dashboard against {}, page written to {} (type 'help')",
        config.api.base_url, config.output.html_path
    );

    // Run the console (presentation layer)
    event_loop::run(tokio::io::stdin(), page, service, &config.output).await?;

    Ok(())
}
