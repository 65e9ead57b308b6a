use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Endpoints,
    error::WeatherError,
    http::fetch_body,
    model::{Coordinate, ForecastSchedule},
    normalize::DailyWind,
};

use super::{ForecastFetcher, schedule_from_body};

pub const FORECAST_PATH: &str = "/api/forecast";
pub const FORECAST_BY_ZIP_PATH: &str = "/api/forecast/zip";

/// Fetcher backed by the intermediary service.
///
/// Besides the coordinate endpoint it exposes the combined
/// zip-to-forecast call, which saves the separate geocode round trip.
#[derive(Debug, Clone)]
pub struct BackendFetcher {
    forecast_url: String,
    forecast_by_zip_url: String,
    http: Client,
}

impl BackendFetcher {
    pub fn new(endpoints: &Endpoints, http: Client) -> Self {
        Self {
            forecast_url: endpoints.backend(FORECAST_PATH),
            forecast_by_zip_url: endpoints.backend(FORECAST_BY_ZIP_PATH),
            http,
        }
    }

    /// Forecast for a postal code in one call.
    ///
    /// The combined endpoint leaves out daily wind, so every daily entry
    /// reports a wind speed of zero.
    pub async fn fetch_by_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<ForecastSchedule, WeatherError> {
        tracing::debug!(postal_code, "fetching forecast by zip from backend");

        let request = self
            .http
            .get(&self.forecast_by_zip_url)
            .query(&[("zip", postal_code)]);

        let body = self.get_body(request, "backend zip forecast").await?;
        schedule_from_body(&body, DailyWind::Zero)
    }

    async fn get_body(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<String, WeatherError> {
        fetch_body(request, what).await.map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "backend forecast fetch failed");
            WeatherError::fetch(format!("Failed to fetch weather data ({e})"))
        })
    }
}

#[async_trait]
impl ForecastFetcher for BackendFetcher {
    async fn fetch(&self, coord: &Coordinate) -> Result<ForecastSchedule, WeatherError> {
        tracing::debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            "fetching forecast from backend"
        );

        let request = self.http.get(&self.forecast_url).query(&[
            ("lat", coord.latitude.to_string()),
            ("lon", coord.longitude.to_string()),
        ]);

        let body = self.get_body(request, "backend forecast").await?;
        schedule_from_body(&body, DailyWind::FromPayload)
    }
}
