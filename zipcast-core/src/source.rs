//! The two end-to-end retrieval strategies, selected by [`Mode`].

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{
    config::Endpoints,
    error::WeatherError,
    fetcher::{ForecastFetcher, backend::BackendFetcher, fetcher_for},
    geocoder::{Geocoder, geocoder_for},
    model::LocatedForecast,
    mode::Mode,
};

/// Postal code in, labelled forecast out.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, postal_code: &str) -> Result<LocatedForecast, WeatherError>;
}

/// Geocode, then fetch by coordinate. Labelled with the geocoder's place name.
#[derive(Debug)]
pub struct DirectSource {
    geocoder: Box<dyn Geocoder>,
    fetcher: Box<dyn ForecastFetcher>,
}

impl DirectSource {
    pub fn new(geocoder: Box<dyn Geocoder>, fetcher: Box<dyn ForecastFetcher>) -> Self {
        Self { geocoder, fetcher }
    }
}

#[async_trait]
impl ForecastSource for DirectSource {
    async fn forecast(&self, postal_code: &str) -> Result<LocatedForecast, WeatherError> {
        let coord = self.geocoder.resolve(postal_code).await?;
        let schedule = self.fetcher.fetch(&coord).await?;

        Ok(LocatedForecast {
            location: coord.display_name,
            schedule,
        })
    }
}

/// One combined call to the backend. Labelled with the postal code itself.
#[derive(Debug)]
pub struct BackendSource {
    fetcher: BackendFetcher,
}

impl BackendSource {
    pub fn new(fetcher: BackendFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ForecastSource for BackendSource {
    async fn forecast(&self, postal_code: &str) -> Result<LocatedForecast, WeatherError> {
        let schedule = self.fetcher.fetch_by_postal_code(postal_code).await?;

        Ok(LocatedForecast {
            location: postal_code.to_string(),
            schedule,
        })
    }
}

/// Pick the retrieval strategy for `mode`.
pub fn source_for(mode: Mode, endpoints: &Endpoints, http: &Client) -> Box<dyn ForecastSource> {
    match mode {
        Mode::Direct => Box::new(DirectSource::new(
            geocoder_for(mode, endpoints, http),
            fetcher_for(mode, endpoints, http),
        )),
        Mode::Backend => Box::new(BackendSource::new(BackendFetcher::new(
            endpoints,
            http.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, ForecastSchedule};

    #[derive(Debug)]
    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, postal_code: &str) -> Result<Coordinate, WeatherError> {
            if postal_code == "00000" {
                return Err(WeatherError::lookup("not found"));
            }
            Ok(Coordinate {
                latitude: 1.0,
                longitude: 2.0,
                display_name: format!("Place {postal_code}"),
            })
        }
    }

    #[derive(Debug)]
    struct EmptyFetcher;

    #[async_trait]
    impl ForecastFetcher for EmptyFetcher {
        async fn fetch(&self, _coord: &Coordinate) -> Result<ForecastSchedule, WeatherError> {
            Ok(ForecastSchedule::default())
        }
    }

    #[tokio::test]
    async fn direct_source_labels_with_display_name() {
        let source = DirectSource::new(Box::new(FixedGeocoder), Box::new(EmptyFetcher));
        let located = source.forecast("10001").await.unwrap();
        assert_eq!(located.location, "Place 10001");
    }

    #[tokio::test]
    async fn direct_source_stops_at_lookup_failure() {
        let source = DirectSource::new(Box::new(FixedGeocoder), Box::new(EmptyFetcher));
        let err = source.forecast("00000").await.unwrap_err();
        assert_eq!(err, WeatherError::lookup("not found"));
    }

    #[test]
    fn source_for_follows_mode() {
        let endpoints = Endpoints::default();
        let http = Client::new();

        let direct = format!("{:?}", source_for(Mode::Direct, &endpoints, &http));
        assert!(direct.starts_with("DirectSource"));

        let backend = format!("{:?}", source_for(Mode::Backend, &endpoints, &http));
        assert!(backend.starts_with("BackendSource"));
    }
}
