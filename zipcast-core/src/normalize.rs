//! Columnar (Open-Meteo shaped) payloads and their conversion into rows.
//!
//! Upstream sends one array per field, indexed in parallel with `time`.
//! `time`, temperatures and `weather_code` are required: they must cover
//! every kept row without `null`s (rows dropped by the 24/7 caps are not
//! checked). Every other column may be missing entirely or contain `null`
//! cells, both of which surface as `None` on the entry.

use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{ForecastEntry, ForecastSchedule},
};

/// Hourly fields requested from Open-Meteo, in request order.
pub const HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "weather_code",
    "relative_humidity_2m",
    "wind_speed_10m",
    "precipitation",
];

/// Daily fields requested from Open-Meteo, in request order.
pub const DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "weather_code",
    "wind_speed_10m_max",
    "precipitation_sum",
];

type OptionalColumn = Option<Vec<Option<f64>>>;

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnarForecast {
    pub hourly: HourlyColumns,
    pub daily: DailyColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyColumns {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub weather_code: Vec<Option<u8>>,
    pub relative_humidity_2m: OptionalColumn,
    pub wind_speed_10m: OptionalColumn,
    pub precipitation: OptionalColumn,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyColumns {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub weather_code: Vec<Option<u8>>,
    pub wind_speed_10m_max: OptionalColumn,
    pub precipitation_sum: OptionalColumn,
}

/// How daily wind speed is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyWind {
    /// Take `wind_speed_10m_max` from the payload, `None` where absent.
    FromPayload,
    /// Always `0`; the combined zip endpoint does not report daily wind.
    Zero,
}

/// Parse a columnar body. Shape errors become [`WeatherError::Fetch`].
pub fn parse_columnar(body: &str) -> Result<ColumnarForecast, WeatherError> {
    serde_json::from_str(body)
        .map_err(|e| WeatherError::fetch(format!("Malformed forecast payload: {e}")))
}

impl ColumnarForecast {
    pub fn into_schedule(self, daily_wind: DailyWind) -> Result<ForecastSchedule, WeatherError> {
        Ok(ForecastSchedule {
            hourly: self.hourly.into_entries()?,
            daily: self.daily.into_entries(daily_wind)?,
        })
    }
}

impl HourlyColumns {
    fn into_entries(self) -> Result<Vec<ForecastEntry>, WeatherError> {
        let len = self.time.len().min(ForecastSchedule::MAX_HOURLY);
        let temperature = require("hourly.temperature_2m", &self.temperature_2m, len)?;
        let weather_code = require("hourly.weather_code", &self.weather_code, len)?;

        let entries = self
            .time
            .into_iter()
            .take(len)
            .enumerate()
            .map(|(i, timestamp)| ForecastEntry {
                timestamp,
                temperature_celsius: temperature[i],
                weather_code: weather_code[i],
                humidity_percent: cell(&self.relative_humidity_2m, i),
                wind_speed_kmh: cell(&self.wind_speed_10m, i),
                precipitation_mm: cell(&self.precipitation, i),
            })
            .collect();

        Ok(entries)
    }
}

impl DailyColumns {
    fn into_entries(self, daily_wind: DailyWind) -> Result<Vec<ForecastEntry>, WeatherError> {
        let len = self.time.len().min(ForecastSchedule::MAX_DAILY);
        let max = require("daily.temperature_2m_max", &self.temperature_2m_max, len)?;
        let min = require("daily.temperature_2m_min", &self.temperature_2m_min, len)?;
        let weather_code = require("daily.weather_code", &self.weather_code, len)?;

        let entries = self
            .time
            .into_iter()
            .take(len)
            .enumerate()
            .map(|(i, timestamp)| ForecastEntry {
                timestamp,
                temperature_celsius: (max[i] + min[i]) / 2.0,
                weather_code: weather_code[i],
                humidity_percent: None,
                wind_speed_kmh: match daily_wind {
                    DailyWind::FromPayload => cell(&self.wind_speed_10m_max, i),
                    DailyWind::Zero => Some(0.0),
                },
                precipitation_mm: cell(&self.precipitation_sum, i),
            })
            .collect();

        Ok(entries)
    }
}

/// The first `need` cells of a required column. Cells past `need` are
/// never read, so nulls there are tolerated.
fn require<T: Copy>(
    column: &str,
    cells: &[Option<T>],
    need: usize,
) -> Result<Vec<T>, WeatherError> {
    if cells.len() < need {
        return Err(WeatherError::fetch(format!(
            "Malformed forecast payload: {column} has {} values, expected {need}",
            cells.len()
        )));
    }

    cells[..need]
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.ok_or_else(|| {
                WeatherError::fetch(format!(
                    "Malformed forecast payload: {column} is null at index {i}"
                ))
            })
        })
        .collect()
}

fn cell(column: &OptionalColumn, i: usize) -> Option<f64> {
    column.as_ref().and_then(|c| c.get(i).copied().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(hours: usize) -> serde_json::Value {
        let time: Vec<String> = (0..hours)
            .map(|h| format!("2024-05-{:02}T{:02}:00", 1 + h / 24, h % 24))
            .collect();
        let temps: Vec<f64> = (0..hours).map(|h| h as f64 * 0.5).collect();
        let codes: Vec<u8> = (0..hours).map(|h| (h % 4) as u8).collect();
        let humidity: Vec<f64> = (0..hours).map(|h| 40.0 + h as f64).collect();

        json!({
            "hourly": {
                "time": time,
                "temperature_2m": temps,
                "weather_code": codes,
                "relative_humidity_2m": humidity,
                "wind_speed_10m": vec![12.0; hours],
                "precipitation": vec![0.0; hours],
            },
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "temperature_2m_max": [10.0, 20.0],
                "temperature_2m_min": [0.0, 10.0],
                "weather_code": [0, 61],
                "wind_speed_10m_max": [15.5, 22.0],
                "precipitation_sum": [0.0, 4.2],
            }
        })
    }

    fn normalize(value: serde_json::Value, wind: DailyWind) -> ForecastSchedule {
        parse_columnar(&value.to_string())
            .unwrap()
            .into_schedule(wind)
            .unwrap()
    }

    #[test]
    fn hourly_is_truncated_to_24_and_keeps_alignment() {
        let schedule = normalize(payload(48), DailyWind::FromPayload);

        assert_eq!(schedule.hourly.len(), 24);
        assert_eq!(schedule.hourly[5].temperature_celsius, 2.5);
        assert_eq!(schedule.hourly[5].humidity_percent, Some(45.0));
        assert_eq!(schedule.hourly[5].timestamp, "2024-05-01T05:00");
        assert_eq!(schedule.hourly[23].timestamp, "2024-05-01T23:00");
        assert!(schedule.is_chronological());
    }

    #[test]
    fn daily_temperature_is_midpoint() {
        let schedule = normalize(payload(24), DailyWind::FromPayload);

        let temps: Vec<f64> = schedule.daily.iter().map(|d| d.temperature_celsius).collect();
        assert_eq!(temps, vec![5.0, 15.0]);
        assert_eq!(schedule.daily[1].weather_code, 61);
        assert_eq!(schedule.daily[1].precipitation_mm, Some(4.2));
        assert_eq!(schedule.daily[0].humidity_percent, None);
    }

    #[test]
    fn daily_wind_from_payload_or_zero() {
        let from_payload = normalize(payload(24), DailyWind::FromPayload);
        assert_eq!(from_payload.daily[0].wind_speed_kmh, Some(15.5));

        let zeroed = normalize(payload(24), DailyWind::Zero);
        assert!(zeroed.daily.iter().all(|d| d.wind_speed_kmh == Some(0.0)));
    }

    #[test]
    fn missing_optional_columns_stay_absent() {
        let value = json!({
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                "temperature_2m": [1.0, 2.0],
                "weather_code": [0, 1],
                "precipitation": [null, 0.4],
            },
            "daily": {
                "time": ["2024-05-01"],
                "temperature_2m_max": [3.0],
                "temperature_2m_min": [1.0],
                "weather_code": [2],
            }
        });

        let schedule = normalize(value, DailyWind::FromPayload);
        assert_eq!(schedule.hourly[0].humidity_percent, None);
        assert_eq!(schedule.hourly[0].wind_speed_kmh, None);
        assert_eq!(schedule.hourly[0].precipitation_mm, None);
        assert_eq!(schedule.hourly[1].precipitation_mm, Some(0.4));
        assert_eq!(schedule.daily[0].wind_speed_kmh, None);
        assert_eq!(schedule.daily[0].precipitation_mm, None);
    }

    #[test]
    fn nulls_past_the_kept_window_are_ignored() {
        let mut value = payload(48);
        value["hourly"]["temperature_2m"][40] = json!(null);
        value["hourly"]["weather_code"][30] = json!(null);

        let schedule = normalize(value, DailyWind::FromPayload);
        assert_eq!(schedule.hourly.len(), 24);
        assert_eq!(schedule.hourly[23].temperature_celsius, 11.5);
    }

    #[test]
    fn null_inside_the_kept_window_is_a_fetch_error() {
        let mut value = payload(48);
        value["hourly"]["temperature_2m"][7] = json!(null);

        let err = parse_columnar(&value.to_string())
            .unwrap()
            .into_schedule(DailyWind::FromPayload)
            .unwrap_err();

        assert!(matches!(err, WeatherError::Fetch(_)));
        assert!(err.to_string().contains("hourly.temperature_2m is null at index 7"));
    }

    #[test]
    fn daily_is_capped_at_seven() {
        let mut value = payload(24);
        value["daily"] = json!({
            "time": (1..=9).map(|d| format!("2024-05-{d:02}")).collect::<Vec<_>>(),
            "temperature_2m_max": vec![10.0; 9],
            "temperature_2m_min": vec![0.0; 9],
            "weather_code": vec![3; 9],
        });

        let schedule = normalize(value, DailyWind::FromPayload);
        assert_eq!(schedule.daily.len(), 7);
        assert_eq!(schedule.daily[6].timestamp, "2024-05-07");
    }

    #[test]
    fn short_required_column_is_a_fetch_error() {
        let mut value = payload(4);
        value["hourly"]["temperature_2m"] = json!([1.0, 2.0]);

        let err = parse_columnar(&value.to_string())
            .unwrap()
            .into_schedule(DailyWind::FromPayload)
            .unwrap_err();

        assert!(matches!(err, WeatherError::Fetch(_)));
        assert!(err.to_string().contains("hourly.temperature_2m"));
    }

    #[test]
    fn missing_required_column_is_a_fetch_error() {
        let err = parse_columnar(r#"{"hourly": {"time": []}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Fetch(_)));
        assert!(err.to_string().starts_with("Malformed forecast payload"));
    }
}
