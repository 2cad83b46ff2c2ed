// HTML snapshot of the page, redrawn after every change
use serde_json::Value;

use crate::application::page_controller::{ContentRegion, PageController, TREND_IMAGE_ALT, View};
use crate::domain::analysis::{Location, Season};
use crate::infrastructure::plotly::PlotlyBoard;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const YEARS_LABEL: &str = "Vyberte roky (aspoň dva)";
const SEASON_LABEL: &str = "Peľová sezóna";
const LOCATION_LABEL: &str = "Nástup peľovej sezóny";

pub fn render_page(page: &PageController<PlotlyBoard>) -> String {
    let view = page.view();
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="sk">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{cdn}"></script>
</head>
<body>
    <h1 class="hero-title">{title}</h1>
    <p class="hero-subtitle">{subtitle}</p>
    <section id="{methodology}" class="methodology"></section>
"#,
        title = escape_html(view.title()),
        subtitle = escape_html(view.subtitle()),
        cdn = PLOTLY_CDN,
        methodology = view.methodology_id(),
    );

    html.push_str(&render_form(page));
    html.push_str("    <div id=\"result\">\n");
    html.push_str(&render_region(page.region()));
    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

fn render_form(page: &PageController<PlotlyBoard>) -> String {
    let mut form = String::from("    <form>\n");

    match page.view() {
        View::VegetationTrend => {
            let trend = page.trend_form();
            form.push_str(&format!("        <label>{}</label>\n", YEARS_LABEL));
            for (year, checked) in &trend.years {
                form.push_str(&format!(
                    "        <label><input type=\"checkbox\" name=\"year\" value=\"{year}\"{}> {year}</label>\n",
                    if *checked { " checked" } else { "" },
                ));
            }
            form.push_str(&format!(
                "        <label for=\"season-select\">{}</label>\n",
                SEASON_LABEL
            ));
            form.push_str("        <select id=\"season-select\">\n");
            for season in Season::ALL {
                form.push_str(&option(season.key(), season.label(), season == trend.season));
            }
            form.push_str("        </select>\n");
            form.push_str(&format!(
                "        <p id=\"season-info\">{}</p>\n",
                escape_html(trend.season_info())
            ));
        }
        View::PollenSeasonOnset => {
            let selected = page.season_form().location;
            form.push_str(&format!(
                "        <label for=\"location-select\">{}</label>\n",
                LOCATION_LABEL
            ));
            form.push_str("        <select id=\"location-select\">\n");
            for location in Location::ALL {
                form.push_str(&option(location.key(), location.label(), location == selected));
            }
            form.push_str("        </select>\n");
        }
        View::CurrentPollen => {}
    }

    if let Some(control) = page.control() {
        form.push_str(&format!(
            "        <button type=\"button\"{}>{}</button>\n",
            if control.disabled { " disabled" } else { "" },
            escape_html(control.label()),
        ));
    }
    form.push_str("    </form>\n");
    form
}

fn option(key: &str, label: &str, selected: bool) -> String {
    format!(
        "            <option value=\"{}\"{}>{}</option>\n",
        key,
        if selected { " selected" } else { "" },
        escape_html(label),
    )
}

fn render_region(region: &ContentRegion<PlotlyBoard>) -> String {
    match region {
        ContentRegion::Placeholder => format!(
            "        <div class=\"placeholder-text\">{}</div>\n",
            escape_html(region.text().unwrap_or_default())
        ),
        ContentRegion::Loading => format!(
            "        <div class=\"spinner\"></div>\n        <p>{}</p>\n",
            escape_html(region.text().unwrap_or_default())
        ),
        ContentRegion::Image { url } => format!(
            "        <img src=\"{}\" alt=\"{}\">\n",
            escape_html(url),
            TREND_IMAGE_ALT
        ),
        ContentRegion::Error(message) => format!(
            "        <div class=\"error-message\">{}</div>\n",
            escape_html(message)
        ),
        ContentRegion::SeasonCharts(charts) => render_board(charts.surface()),
        ContentRegion::Snapshot(board) => render_board(board),
    }
}

fn render_board(board: &PlotlyBoard) -> String {
    let mut html = String::new();
    for (id, panel) in board.panels() {
        html.push_str(&format!(
            "        <div id=\"{}\"></div>\n",
            id.container_id()
        ));
        html.push_str(&format!(
            "        <script>Plotly.newPlot(\"{}\", {}, {});</script>\n",
            id.container_id(),
            script_json(&Value::Array(panel.traces.clone())),
            script_json(&panel.layout),
        ));
    }
    html
}

/// JSON safe to inline in a `<script>` element
fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mock_api::{season_plot, series};
    use crate::application::page_controller::{LOADING_TEXT, PLACEHOLDER_TEXT};
    use crate::domain::dashboard::ViewPayload;
    use crate::domain::error::DashboardError;
    use crate::domain::panel::PanelId;
    use crate::domain::series::{SeriesSet, ThresholdAnnotation, ThresholdMap};
    use crate::infrastructure::config::ChartSettings;
    use crate::infrastructure::plotly::PlotlyPanel;

    fn trace_names(panel: &PlotlyPanel) -> Vec<&str> {
        (0..panel.traces.len())
            .filter_map(|i| panel.trace_name(i))
            .collect()
    }

    fn page() -> PageController<PlotlyBoard> {
        PageController::new(
            ChartSettings {
                default_active_index: 0,
                ..ChartSettings::default()
            },
            2025,
        )
    }

    #[test]
    fn test_trend_view_form_and_placeholder() {
        let html = render_page(&page());

        assert!(html.contains("<title>Ako sa mení vegetácia počas peľových sezón?</title>"));
        assert!(html.contains("id=\"metodika-vegetacia\""));
        assert!(html.contains("value=\"2025\" checked"));
        assert!(html.contains("value=\"2017\"> 2017"));
        assert!(html.contains("<option value=\"late_spring\" selected>"));
        assert!(html.contains("Hlavné alergény: Pagaštan, Lipa, trávy."));
        assert!(html.contains("<button type=\"button\">Analyzovať trend</button>"));
        assert!(html.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_loading_disables_button() {
        let mut page = page();
        page.trigger();

        let html = render_page(&page);
        assert!(html.contains("<button type=\"button\" disabled>Spracúvam...</button>"));
        assert!(html.contains("class=\"spinner\""));
        assert!(html.contains(LOADING_TEXT));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let mut page = page();
        let pending = page.trigger().unwrap();
        page.complete(
            pending.token,
            Err(DashboardError::Server {
                status: 500,
                message: "<b>boom</b>".to_string(),
            }),
        );

        let html = render_page(&page);
        assert!(html.contains(
            "<div class=\"error-message\">Chyba pri analýze: &lt;b&gt;boom&lt;/b&gt;</div>"
        ));
    }

    #[test]
    fn test_trend_image_has_alt_text() {
        let mut page = page();
        let pending = page.trigger().unwrap();
        page.complete(
            pending.token,
            Ok(ViewPayload::TrendImage {
                image_url: "/static/output/trend_map.png".to_string(),
            }),
        );

        let html = render_page(&page);
        assert!(html.contains("<img src=\"/static/output/trend_map.png?t="));
        assert!(html.contains("alt=\"Mapa trendu vegetácie\""));
    }

    #[test]
    fn test_season_charts_emit_plotly_scripts() {
        let mut page = page();
        page.show_view(View::PollenSeasonOnset);
        let pending = page.trigger().unwrap();
        let mut thresholds = ThresholdMap::new();
        thresholds.insert("2024".to_string(), ThresholdAnnotation::new(1, 3));
        page.complete(
            pending.token,
            Ok(ViewPayload::SeasonPlot(season_plot(&["2023", "2024"], 6, thresholds))),
        );

        let html = render_page(&page);
        assert!(html.contains("<option value=\"strky\" selected>"));
        assert!(html.contains("<div id=\"ndvi-chart-container\"></div>"));
        assert!(html.contains("Plotly.newPlot(\"temp-chart-container\", ["));
        assert!(html.contains("2024 - Threshold"));
        assert!(!html.contains("</b><br>"));
        assert!(html.contains("\\u003cb>2024\\u003c/b>\\u003cbr>"));

        let ContentRegion::SeasonCharts(charts) = page.region() else {
            panic!("expected season charts");
        };
        let names = trace_names(charts.surface().panel(PanelId::Secondary).unwrap());
        assert_eq!(names, vec!["2023", "2024", "2024 - Threshold"]);
    }

    #[test]
    fn test_series_names_cannot_break_out_of_script() {
        let mut page = page();
        let pending = page.show_view(View::CurrentPollen).unwrap();
        let set = SeriesSet::new(vec![series("<!--<script>", 3, 1.0), series("</script>", 3, 2.0)]);
        page.complete(pending.token, Ok(ViewPayload::CurrentPollen(set)));

        let html = render_page(&page);
        assert!(html.contains("Plotly.newPlot(\"pollen-chart-container\""));
        assert!(!html.contains("<!--"));
        assert!(!html.contains("<script>\""));
        assert!(html.contains("\"\\u003c!--\\u003cscript>\""));
        assert!(html.contains("\"\\u003c/script>\""));
    }

    #[test]
    fn test_each_view_has_subtitle_and_labels() {
        let mut page = page();
        let html = render_page(&page);
        assert!(html.contains("<p class=\"hero-subtitle\">Zvoľte si roky a peľovú sezónu pre analýzu."));
        assert!(html.contains("<label>Vyberte roky (aspoň dva)</label>"));
        assert!(html.contains("<label for=\"season-select\">Peľová sezóna</label>"));

        page.show_view(View::PollenSeasonOnset);
        let html = render_page(&page);
        assert!(html.contains("<h1 class=\"hero-title\">Nástup peľovej sezóny</h1>"));
        assert!(html.contains("Analyzujte zmeny vegetácie počas peľových sezón v Trnave"));
        assert!(html.contains("<label for=\"location-select\">Nástup peľovej sezóny</label>"));

        page.show_view(View::CurrentPollen);
        let html = render_page(&page);
        assert!(html.contains("Aktuálne koncentrácie peľu za tento rok."));
        assert!(!html.contains("<label"));
    }

    #[test]
    fn test_current_view_has_no_form_controls() {
        let mut page = page();
        page.show_view(View::CurrentPollen);

        let html = render_page(&page);
        assert!(html.contains("id=\"metodika-pollen\""));
        assert!(!html.contains("<button"));
        assert!(!html.contains("<select"));
    }
}
