use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{
    config::Endpoints,
    error::WeatherError,
    fetcher::{backend::BackendFetcher, open_meteo::OpenMeteoFetcher},
    model::{Coordinate, ForecastSchedule},
    mode::Mode,
    normalize::{DailyWind, parse_columnar},
};

pub mod backend;
pub mod open_meteo;

/// Retrieves and normalizes the forecast for a coordinate.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch(&self, coord: &Coordinate) -> Result<ForecastSchedule, WeatherError>;
}

/// Pick the forecast fetcher for `mode`.
pub fn fetcher_for(mode: Mode, endpoints: &Endpoints, http: &Client) -> Box<dyn ForecastFetcher> {
    match mode {
        Mode::Direct => Box::new(OpenMeteoFetcher::new(
            endpoints.forecast_url.clone(),
            http.clone(),
        )),
        Mode::Backend => Box::new(BackendFetcher::new(endpoints, http.clone())),
    }
}

/// Parse and normalize a columnar body into a schedule.
pub(crate) fn schedule_from_body(
    body: &str,
    daily_wind: DailyWind,
) -> Result<ForecastSchedule, WeatherError> {
    let schedule = parse_columnar(body)?.into_schedule(daily_wind)?;
    tracing::debug!(
        hourly = schedule.hourly.len(),
        daily = schedule.daily.len(),
        "forecast normalized"
    );
    Ok(schedule)
}
