// Analysis parameters offered by the dashboard forms
use std::fmt;

/// Earliest year the trend form offers.
pub const FIRST_YEAR: i32 = 2017;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    EarlySpring,
    MidSpring,
    #[default]
    LateSpring,
    Year,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::EarlySpring,
        Season::MidSpring,
        Season::LateSpring,
        Season::Year,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Season::EarlySpring => "early_spring",
            Season::MidSpring => "mid_spring",
            Season::LateSpring => "late_spring",
            Season::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::EarlySpring => "Skorá jar (Feb-Mar)",
            Season::MidSpring => "Stredná jar (Apr-Máj)",
            Season::LateSpring => "Neskorá jar / Leto (Jún-Aug)",
            Season::Year => "Celý rok",
        }
    }

    /// Info line shown under the season select.
    pub fn allergens(&self) -> &'static str {
        match self {
            Season::EarlySpring => "Hlavné alergény: Lieska, Jelša, Tis.",
            Season::MidSpring => "Hlavné alergény: Javor, Jaseň, Bresty.",
            Season::LateSpring => "Hlavné alergény: Pagaštan, Lipa, trávy.",
            Season::Year => "Analýza pre celý kalendárny rok.",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Monitoring locations in Trnava.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    JankaKrala,
    Nemocnicny,
    #[default]
    Strky,
    Druzba,
    Zahradkarska,
    Kamenac,
    Rybniky,
}

impl Location {
    pub const ALL: [Location; 7] = [
        Location::JankaKrala,
        Location::Nemocnicny,
        Location::Strky,
        Location::Druzba,
        Location::Zahradkarska,
        Location::Kamenac,
        Location::Rybniky,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Location::JankaKrala => "janka-krala",
            Location::Nemocnicny => "nemocnicny",
            Location::Strky => "strky",
            Location::Druzba => "druzba",
            Location::Zahradkarska => "zahradkarska",
            Location::Kamenac => "kamenac",
            Location::Rybniky => "rybniky",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::JankaKrala => "Park Janka Kráľa",
            Location::Nemocnicny => "Nemocničný park",
            Location::Strky => "Štrky",
            Location::Druzba => "Park za družbou",
            Location::Zahradkarska => "Záhradkárska oblasť",
            Location::Kamenac => "Kamenáč",
            Location::Rybniky => "Rybníky",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.key() == key)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parameters of one vegetation trend analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    pub years: Vec<i32>,
    pub season: Season,
}

/// Years offered by the trend form, newest first.
pub fn selectable_years(current_year: i32, first_year: i32) -> Vec<i32> {
    (first_year..=current_year).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_keys_round_trip() {
        for season in Season::ALL {
            assert_eq!(Season::parse(season.key()), Some(season));
        }
        assert_eq!(Season::parse("winter"), None);
        assert_eq!(Season::default(), Season::LateSpring);
    }

    #[test]
    fn test_location_default_is_strky() {
        assert_eq!(Location::default().key(), "strky");
        assert_eq!(Location::parse("janka-krala"), Some(Location::JankaKrala));
    }

    #[test]
    fn test_selectable_years_newest_first() {
        assert_eq!(selectable_years(2020, FIRST_YEAR), vec![2020, 2019, 2018, 2017]);
        assert!(selectable_years(2016, FIRST_YEAR).is_empty());
    }
}
