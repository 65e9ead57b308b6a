//! Fixtures shared by the HTTP integration tests.

#![allow(dead_code)]

use reqwest::Client;
use serde_json::{Value, json};
use wiremock::MockServer;
use zipcast_core::{Endpoints, ForecastOrchestrator, notify::RecordingSink};

/// Endpoints that route every upstream call to `server`.
pub fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints {
        geocoding_url: format!("{}/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        backend_url: server.uri(),
    }
}

pub fn orchestrator(server: &MockServer) -> (ForecastOrchestrator, RecordingSink) {
    let sink = RecordingSink::new();
    let orch = ForecastOrchestrator::with_client(
        endpoints(server),
        Client::new(),
        Box::new(sink.clone()),
    );
    (orch, sink)
}

/// Open-Meteo shaped payload with `hours` hourly rows and a 7-day daily block.
///
/// Hourly temperature at index `i` is `i * 0.5`, humidity is `50 + i`.
pub fn columnar_payload(hours: usize) -> Value {
    let time: Vec<String> = (0..hours)
        .map(|h| format!("2024-07-{:02}T{:02}:00", 1 + h / 24, h % 24))
        .collect();

    json!({
        "latitude": 40.75,
        "longitude": -73.99,
        "timezone": "America/New_York",
        "hourly": {
            "time": time,
            "temperature_2m": (0..hours).map(|h| h as f64 * 0.5).collect::<Vec<_>>(),
            "weather_code": (0..hours).map(|h| [0, 2, 61, 95][h % 4]).collect::<Vec<u8>>(),
            "relative_humidity_2m": (0..hours).map(|h| 50.0 + h as f64).collect::<Vec<_>>(),
            "wind_speed_10m": vec![9.5; hours],
            "precipitation": vec![0.0; hours]
        },
        "daily": {
            "time": (1..=7).map(|d| format!("2024-07-{d:02}")).collect::<Vec<_>>(),
            "temperature_2m_max": [10.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0],
            "temperature_2m_min": [0.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0],
            "weather_code": [0, 3, 61, 71, 80, 85, 95],
            "wind_speed_10m_max": [18.0, 19.0, 20.0, 21.0, 22.0, 23.0, 24.0],
            "precipitation_sum": [0.0, 0.0, 5.1, 2.0, 1.2, 0.0, 8.8]
        }
    })
}
