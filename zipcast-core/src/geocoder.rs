use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::Endpoints,
    error::WeatherError,
    geocoder::{backend::BackendGeocoder, nominatim::NominatimGeocoder},
    model::Coordinate,
    mode::Mode,
};

pub mod backend;
pub mod nominatim;

/// Resolves a postal code to a coordinate and place name.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, WeatherError>;
}

/// Pick the geocoder for `mode`.
pub fn geocoder_for(mode: Mode, endpoints: &Endpoints, http: &Client) -> Box<dyn Geocoder> {
    match mode {
        Mode::Direct => Box::new(NominatimGeocoder::new(
            endpoints.geocoding_url.clone(),
            http.clone(),
        )),
        Mode::Backend => Box::new(BackendGeocoder::new(endpoints, http.clone())),
    }
}

/// A latitude or longitude sent either as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    pub(crate) fn value(&self) -> Option<f64> {
        let value = match self {
            Degrees::Number(v) => Some(*v),
            Degrees::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_accepts_numbers_and_strings() {
        let parsed: Vec<Degrees> = serde_json::from_str(r#"[40.75, "-73.99", "north"]"#).unwrap();
        assert_eq!(parsed[0].value(), Some(40.75));
        assert_eq!(parsed[1].value(), Some(-73.99));
        assert_eq!(parsed[2].value(), None);
    }

    #[test]
    fn geocoder_for_follows_mode() {
        let endpoints = Endpoints::default();
        let http = Client::new();

        let direct = format!("{:?}", geocoder_for(Mode::Direct, &endpoints, &http));
        assert!(direct.contains("NominatimGeocoder"));

        let backend = format!("{:?}", geocoder_for(Mode::Backend, &endpoints, &http));
        assert!(backend.contains("BackendGeocoder"));
    }
}
