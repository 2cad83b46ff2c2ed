// Console commands standing in for clicks on the page
use crate::application::chart_controller::ChartEvent;
use crate::application::page_controller::View;
use crate::domain::analysis::{Location, Season};
use crate::domain::panel::PanelId;
use thiserror::Error;

pub const HELP: &str = "\
view trend|onset|current    switch the page view
year <rok>                  toggle a year in the trend form
season <key>                early_spring | mid_spring | late_spring | year
location <key>              janka-krala | nemocnicny | strky | druzba | zahradkarska | kamenac | rybniky
analyze | plot              press the view's button
click <panel> <index>       click a point of trace <index> (panels: ndvi, temp, pollen)
legend <panel> <index>      click a legend entry
status                      print the page state
quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ShowView(View),
    ToggleYear(i32),
    SelectSeason(Season),
    SelectLocation(Location),
    Trigger,
    Chart(ChartEvent),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("'{value}' is not a valid {what}")]
    InvalidArgument { what: &'static str, value: String },
}

pub fn parse_command(line: &str) -> Result<UiEvent, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(CommandError::Empty);
    };

    match command {
        "view" => {
            let key = argument(&mut words, "view", "a view name")?;
            View::parse(key)
                .map(UiEvent::ShowView)
                .ok_or_else(|| invalid("view", key))
        }
        "year" => {
            let value = argument(&mut words, "year", "a year")?;
            value
                .parse()
                .map(UiEvent::ToggleYear)
                .map_err(|_| invalid("year", value))
        }
        "season" => {
            let key = argument(&mut words, "season", "a season key")?;
            Season::parse(key)
                .map(UiEvent::SelectSeason)
                .ok_or_else(|| invalid("season", key))
        }
        "location" => {
            let key = argument(&mut words, "location", "a location key")?;
            Location::parse(key)
                .map(UiEvent::SelectLocation)
                .ok_or_else(|| invalid("location", key))
        }
        "analyze" | "plot" => Ok(UiEvent::Trigger),
        "click" | "legend" => {
            let panel_name = argument(&mut words, "click", "a panel and a trace index")?;
            let panel = PanelId::parse(panel_name).ok_or_else(|| invalid("panel", panel_name))?;
            let index = argument(&mut words, "click", "a trace index")?;
            let curve_number = index.parse().map_err(|_| invalid("trace index", index))?;

            let event = if command == "click" {
                ChartEvent::PointClick {
                    panel,
                    curve_number,
                }
            } else {
                ChartEvent::LegendClick {
                    panel,
                    curve_number,
                }
            };
            Ok(UiEvent::Chart(event))
        }
        "status" => Ok(UiEvent::Status),
        "help" | "?" => Ok(UiEvent::Help),
        "quit" | "exit" => Ok(UiEvent::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn argument<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    words
        .next()
        .ok_or(CommandError::MissingArgument { command, what })
}

fn invalid(what: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        what,
        value: value.to_string(),
    }
}
