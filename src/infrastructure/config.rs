use serde::Deserialize;

use crate::domain::analysis::FIRST_YEAR;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Trend analysis renders a map server-side and can take minutes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartSettings {
    #[serde(default = "default_active_index")]
    pub default_active_index: usize,
    #[serde(default = "default_value_precision")]
    pub value_precision: usize,
    #[serde(default = "default_first_year")]
    pub first_year: i32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_active_index: default_active_index(),
            value_precision: default_value_precision(),
            first_year: default_first_year(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    #[serde(default = "default_html_path")]
    pub html_path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            html_path: default_html_path(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_active_index() -> usize {
    5
}

fn default_value_precision() -> usize {
    2
}

fn default_first_year() -> i32 {
    FIRST_YEAR
}

fn default_html_path() -> String {
    "dashboard.html".to_string()
}

/// Loads `config/dashboard.*`, then `DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Join an endpoint path onto the configured base URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
