use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    http::fetch_body,
    model::{Coordinate, ForecastSchedule},
    normalize::{DAILY_FIELDS, DailyWind, HOURLY_FIELDS},
};

use super::{ForecastFetcher, schedule_from_body};

const FORECAST_DAYS: &str = "7";

/// Fetcher that calls the Open-Meteo forecast API directly.
#[derive(Debug, Clone)]
pub struct OpenMeteoFetcher {
    url: String,
    http: Client,
}

impl OpenMeteoFetcher {
    pub fn new(url: String, http: Client) -> Self {
        Self { url, http }
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoFetcher {
    async fn fetch(&self, coord: &Coordinate) -> Result<ForecastSchedule, WeatherError> {
        tracing::debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            "fetching forecast from Open-Meteo"
        );

        let request = self.http.get(&self.url).query(&[
            ("latitude", coord.latitude.to_string()),
            ("longitude", coord.longitude.to_string()),
            ("hourly", HOURLY_FIELDS.join(",")),
            ("daily", DAILY_FIELDS.join(",")),
            ("timezone", "auto".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ]);

        let body = fetch_body(request, "Open-Meteo forecast").await.map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "forecast fetch failed");
            WeatherError::fetch(format!("Failed to fetch weather data ({e})"))
        })?;

        schedule_from_body(&body, DailyWind::FromPayload)
    }
}
