use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A resolved postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// One row of the forecast, hourly or daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// ISO 8601, local to the forecast location (`2024-05-01T13:00` or `2024-05-01`).
    pub timestamp: String,
    pub temperature_celsius: f64,
    /// WMO weather interpretation code, 0–99.
    pub weather_code: u8,
    pub humidity_percent: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

impl ForecastEntry {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }

    /// Parse the timestamp; daily entries come back at midnight.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&self.timestamp, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}

/// Normalized forecast: the next 24 hours and the next 7 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSchedule {
    pub hourly: Vec<ForecastEntry>,
    pub daily: Vec<ForecastEntry>,
}

impl ForecastSchedule {
    pub const MAX_HOURLY: usize = 24;
    pub const MAX_DAILY: usize = 7;

    /// True when both sequences are non-decreasing in timestamp.
    pub fn is_chronological(&self) -> bool {
        fn sorted(entries: &[ForecastEntry]) -> bool {
            entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
        }
        sorted(&self.hourly) && sorted(&self.daily)
    }
}

/// A schedule together with the label it should be shown under.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedForecast {
    pub location: String,
    pub schedule: ForecastSchedule,
}

/// Coarse bands of WMO weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            4..=67 => Self::Rain,
            68..=77 => Self::Snow,
            78..=82 => Self::RainShowers,
            83..=86 => Self::SnowShowers,
            87..=99 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Rain => "Rainy",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
