// Application layer - ports, controllers and request orchestration
pub mod analysis_api;
pub mod chart_controller;
pub mod chart_surface;
pub mod dashboard_service;
#[cfg(test)]
pub mod mock_api;
pub mod page_controller;
