use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{config::Endpoints, error::WeatherError, http::fetch_body, model::Coordinate};

use super::{Degrees, Geocoder};

pub const GEOCODE_PATH: &str = "/api/geocode";

/// Geocoder backed by the intermediary service.
#[derive(Debug, Clone)]
pub struct BackendGeocoder {
    url: String,
    http: Client,
}

impl BackendGeocoder {
    pub fn new(endpoints: &Endpoints, http: Client) -> Self {
        Self {
            url: endpoints.backend(GEOCODE_PATH),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendLocation {
    lat: Degrees,
    lon: Degrees,
    location_name: Option<String>,
}

#[async_trait]
impl Geocoder for BackendGeocoder {
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, WeatherError> {
        tracing::debug!(postal_code, url = %self.url, "geocoding via backend");

        let failed = || WeatherError::lookup("backend lookup failed");

        let request = self.http.get(&self.url).query(&[("zip", postal_code)]);
        let body = fetch_body(request, "backend geocode").await.map_err(|e| {
            tracing::warn!(postal_code, error = %format!("{e:#}"), "backend geocoding failed");
            failed()
        })?;

        let location: BackendLocation = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(postal_code, error = %e, "unexpected backend geocode payload");
            failed()
        })?;

        let (Some(latitude), Some(longitude)) = (location.lat.value(), location.lon.value()) else {
            return Err(failed());
        };

        let display_name = location
            .location_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| postal_code.to_string());

        Ok(Coordinate {
            latitude,
            longitude,
            display_name,
        })
    }
}
