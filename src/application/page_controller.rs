// Page controller - views, forms, request tokens and the result region
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::chart_controller::{ChartEvent, InteractiveChartController, SelectionOutcome};
use crate::application::chart_surface::ChartSurface;
use crate::domain::analysis::{Location, Season, TrendRequest, selectable_years};
use crate::domain::dashboard::{ViewPayload, ViewRequest};
use crate::domain::error::Result;
use crate::domain::panel::{PanelId, PanelSpec};
use crate::domain::series::SeriesSet;
use crate::domain::trace::{LineTrace, PanelTrace};
use crate::infrastructure::config::ChartSettings;

pub const PLACEHOLDER_TEXT: &str = "Výsledná mapa trendu sa zobrazí tu.";
pub const LOADING_TEXT: &str = "Prebieha analýza, môže to trvať aj viac ako minútu...";
pub const TOO_FEW_YEARS_TEXT: &str = "Vyberte prosím aspoň dva roky pre analýzu trendu.";
pub const TREND_IMAGE_ALT: &str = "Mapa trendu vegetácie";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    VegetationTrend,
    PollenSeasonOnset,
    CurrentPollen,
}

impl View {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "trend" | "vegetation" => Some(View::VegetationTrend),
            "onset" | "season" => Some(View::PollenSeasonOnset),
            "current" | "pollen" => Some(View::CurrentPollen),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::VegetationTrend => "Ako sa mení vegetácia počas peľových sezón?",
            View::PollenSeasonOnset => "Nástup peľovej sezóny",
            View::CurrentPollen => "Aktuálna peľová situácia",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            View::VegetationTrend => {
                "Zvoľte si roky a peľovú sezónu pre analýzu. Nástroj vyhodnotí zeleň (NDVI) v danom období a porovná jej vývoj naprieč rokmi, čo môže pomôcť identifikovať zmeny v intenzite peľových alergénov."
            }
            View::PollenSeasonOnset => {
                "Analyzujte zmeny vegetácie počas peľových sezón v Trnave v rôznych oblastiach. Vyberte oblasť, aby ste zistili, ako sa mení množstvo zelene, čo môže indikovať intenzitu peľových alergénov."
            }
            View::CurrentPollen => {
                "Aktuálne koncentrácie peľu za tento rok. Keďže analýza peľových údajov je zložitá a časovo náročná, nie je možné ju zobraziť v reálnom čase. Grafy budú aktualizované, keď budú k dispozícii nové údaje."
            }
        }
    }

    /// Methodology block shown next to the view.
    pub fn methodology_id(&self) -> &'static str {
        match self {
            View::VegetationTrend => "metodika-vegetacia",
            View::PollenSeasonOnset => "metodika-sezona",
            View::CurrentPollen => "metodika-pollen",
        }
    }

    pub fn error_prefix(&self) -> &'static str {
        match self {
            View::VegetationTrend => "Chyba pri analýze",
            View::PollenSeasonOnset => "Chyba pri generovaní grafu",
            View::CurrentPollen => "Chyba pri načítaní aktuálnych peľových údajov",
        }
    }
}

/// Button that starts a view's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AnalyzeTrend,
    ShowSeason,
}

impl Control {
    fn label(&self, busy: bool) -> &'static str {
        match (self, busy) {
            (Control::AnalyzeTrend, false) => "Analyzovať trend",
            (Control::AnalyzeTrend, true) => "Spracúvam...",
            (Control::ShowSeason, false) => "Zobraziť vývoj peľovej sezóny",
            (Control::ShowSeason, true) => "Načítavam...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub control: Control,
    pub disabled: bool,
}

impl ControlState {
    fn idle(control: Control) -> Self {
        Self {
            control,
            disabled: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.control.label(self.disabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendForm {
    /// (year, checked), newest first.
    pub years: Vec<(i32, bool)>,
    pub season: Season,
}

impl TrendForm {
    /// The current and previous year start checked.
    pub fn new(current_year: i32, first_year: i32) -> Self {
        let years = selectable_years(current_year, first_year)
            .into_iter()
            .map(|year| (year, year >= current_year - 1))
            .collect();
        Self {
            years,
            season: Season::default(),
        }
    }

    pub fn toggle_year(&mut self, year: i32) -> bool {
        match self.years.iter_mut().find(|(y, _)| *y == year) {
            Some((_, checked)) => {
                *checked = !*checked;
                true
            }
            None => false,
        }
    }

    pub fn selected_years(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(year, _)| *year)
            .collect()
    }

    pub fn season_info(&self) -> &'static str {
        self.season.allergens()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonForm {
    pub location: Location,
}

/// Sequence number of an issued request. Only the latest one is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub request: ViewRequest,
}

pub enum ContentRegion<S> {
    Placeholder,
    Loading,
    Image { url: String },
    Error(String),
    SeasonCharts(InteractiveChartController<S>),
    Snapshot(S),
}

impl<S> ContentRegion<S> {
    /// Text the region shows, if it is a text state.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentRegion::Placeholder => Some(PLACEHOLDER_TEXT),
            ContentRegion::Loading => Some(LOADING_TEXT),
            ContentRegion::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentRegion::Placeholder => "placeholder",
            ContentRegion::Loading => "loading",
            ContentRegion::Image { .. } => "image",
            ContentRegion::Error(_) => "error",
            ContentRegion::SeasonCharts(_) => "season-charts",
            ContentRegion::Snapshot(_) => "snapshot",
        }
    }
}

pub struct PageController<S> {
    view: View,
    trend_form: TrendForm,
    season_form: SeasonForm,
    control: Option<ControlState>,
    region: ContentRegion<S>,
    latest: RequestToken,
    in_flight: Option<RequestToken>,
    settings: ChartSettings,
    current_year: i32,
}

impl<S: ChartSurface + Default> PageController<S> {
    /// Opens on the vegetation trend view, like the page does on load.
    pub fn new(settings: ChartSettings, current_year: i32) -> Self {
        Self {
            view: View::VegetationTrend,
            trend_form: TrendForm::new(current_year, settings.first_year),
            season_form: SeasonForm::default(),
            control: Some(ControlState::idle(Control::AnalyzeTrend)),
            region: ContentRegion::Placeholder,
            latest: RequestToken::default(),
            in_flight: None,
            settings,
            current_year,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn region(&self) -> &ContentRegion<S> {
        &self.region
    }

    pub fn control(&self) -> Option<&ControlState> {
        self.control.as_ref()
    }

    pub fn trend_form(&self) -> &TrendForm {
        &self.trend_form
    }

    pub fn season_form(&self) -> &SeasonForm {
        &self.season_form
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replace the page content with `view`. Anything still in flight is
    /// superseded. The current pollen view requests its data right away.
    pub fn show_view(&mut self, view: View) -> Option<PendingRequest> {
        self.latest = self.latest.next();
        self.in_flight = None;
        self.view = view;
        self.region = ContentRegion::Placeholder;
        debug!(?view, token = self.latest.value(), "view shown");

        match view {
            View::VegetationTrend => {
                self.trend_form = TrendForm::new(self.current_year, self.settings.first_year);
                self.control = Some(ControlState::idle(Control::AnalyzeTrend));
                None
            }
            View::PollenSeasonOnset => {
                self.season_form = SeasonForm::default();
                self.control = Some(ControlState::idle(Control::ShowSeason));
                None
            }
            View::CurrentPollen => {
                self.control = None;
                Some(self.issue(ViewRequest::CurrentPollen))
            }
        }
    }

    pub fn toggle_year(&mut self, year: i32) -> bool {
        self.view == View::VegetationTrend && self.trend_form.toggle_year(year)
    }

    pub fn select_season(&mut self, season: Season) -> bool {
        if self.view != View::VegetationTrend {
            return false;
        }
        self.trend_form.season = season;
        true
    }

    pub fn select_location(&mut self, location: Location) -> bool {
        if self.view != View::PollenSeasonOnset {
            return false;
        }
        self.season_form.location = location;
        true
    }

    /// Click on the view's control. Returns the request to run, if any.
    pub fn trigger(&mut self) -> Option<PendingRequest> {
        let control = self.control?;
        if control.disabled {
            debug!(?control, "control disabled while a request is pending");
            return None;
        }

        match control.control {
            Control::AnalyzeTrend => {
                let years = self.trend_form.selected_years();
                if years.len() < 2 {
                    self.region = ContentRegion::Error(TOO_FEW_YEARS_TEXT.to_string());
                    return None;
                }
                let request = TrendRequest {
                    years,
                    season: self.trend_form.season,
                };
                Some(self.issue(ViewRequest::Trend(request)))
            }
            Control::ShowSeason => {
                Some(self.issue(ViewRequest::SeasonPlot(self.season_form.location)))
            }
        }
    }

    fn issue(&mut self, request: ViewRequest) -> PendingRequest {
        self.latest = self.latest.next();
        self.in_flight = Some(self.latest);
        self.region = ContentRegion::Loading;
        if let Some(control) = self.control.as_mut() {
            control.disabled = true;
        }
        info!(token = self.latest.value(), ?request, "request issued");
        PendingRequest {
            token: self.latest,
            request,
        }
    }

    /// Apply the outcome of request `token`. Returns false when it was superseded.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<ViewPayload>) -> bool {
        if self.in_flight != Some(token) {
            debug!(
                token = token.value(),
                latest = self.latest.value(),
                "dropping superseded response"
            );
            return false;
        }

        self.in_flight = None;
        if let Some(control) = self.control.as_mut() {
            control.disabled = false;
        }

        self.region = match outcome {
            Ok(payload) => self.render(payload),
            Err(e) => self.error_region(&e),
        };
        true
    }

    /// Route a chart click to the season charts, if they are showing.
    pub fn handle_chart_event(&mut self, event: ChartEvent) -> Result<SelectionOutcome> {
        match &mut self.region {
            ContentRegion::SeasonCharts(charts) => charts.handle_event(event),
            _ => Ok(SelectionOutcome::Ignored),
        }
    }

    fn render(&self, payload: ViewPayload) -> ContentRegion<S> {
        match payload {
            ViewPayload::TrendImage { image_url } => ContentRegion::Image {
                url: format!("{}?t={}", image_url, Utc::now().timestamp_millis()),
            },
            ViewPayload::SeasonPlot(plot) => {
                match InteractiveChartController::new(S::default(), plot, &self.settings) {
                    Ok(charts) => ContentRegion::SeasonCharts(charts),
                    Err(e) => self.error_region(&e),
                }
            }
            ViewPayload::CurrentPollen(series) => ContentRegion::Snapshot(snapshot(series)),
        }
    }

    fn error_region(&self, error: &dyn std::error::Error) -> ContentRegion<S> {
        warn!(view = ?self.view, "showing error: {}", error);
        ContentRegion::Error(format!("{}: {}", self.view.error_prefix(), error))
    }
}

fn snapshot<S: ChartSurface + Default>(series: SeriesSet) -> S {
    let mut surface = S::default();
    let traces = series
        .into_inner()
        .into_iter()
        .map(|s| PanelTrace::Line(LineTrace::new(s, None)))
        .collect();
    surface.new_plot(PanelId::Snapshot, traces, &PanelSpec::current_pollen());
    surface
}
