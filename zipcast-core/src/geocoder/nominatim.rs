use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::WeatherError, http::fetch_body, model::Coordinate};

use super::{Degrees, Geocoder};

/// Country scope for postal code searches.
const COUNTRY_CODES: &str = "us";

/// Geocoder backed by a Nominatim (OpenStreetMap) search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(url: String, http: Client) -> Self {
        Self { url, http }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Degrees,
    lon: Degrees,
    display_name: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, WeatherError> {
        tracing::debug!(postal_code, "geocoding via Nominatim");

        let request = self.http.get(&self.url).query(&[
            ("format", "json"),
            ("q", postal_code),
            ("countrycodes", COUNTRY_CODES),
            ("limit", "1"),
        ]);

        let body = fetch_body(request, "Nominatim search").await.map_err(|e| {
            tracing::warn!(postal_code, error = %format!("{e:#}"), "geocoding failed");
            WeatherError::lookup("Failed to get coordinates from zip code")
        })?;

        let places: Vec<NominatimPlace> = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(postal_code, error = %e, "unexpected Nominatim payload");
            WeatherError::lookup("Failed to get coordinates from zip code")
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::lookup("not found"))?;

        let (latitude, longitude) = match (place.lat.value(), place.lon.value()) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(WeatherError::lookup("Failed to get coordinates from zip code")),
        };

        tracing::info!(postal_code, latitude, longitude, name = %place.display_name, "geocoded");

        Ok(Coordinate {
            latitude,
            longitude,
            display_name: place.display_name,
        })
    }
}
