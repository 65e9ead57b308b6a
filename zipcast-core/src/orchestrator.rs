use anyhow::Result;
use reqwest::Client;

use crate::{
    config::{Config, Endpoints},
    error::WeatherError,
    http::build_client,
    model::ForecastSchedule,
    mode::Mode,
    notify::{Notification, NotificationSink},
    source::source_for,
};

const FALLBACK_ERROR: &str = "Failed to fetch weather data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Runs postal code queries and holds the latest result.
///
/// A failed query keeps the previous schedule and location in place.
/// `query` borrows the orchestrator mutably, so queries on one orchestrator
/// never overlap.
pub struct ForecastOrchestrator {
    endpoints: Endpoints,
    http: Client,
    sink: Box<dyn NotificationSink>,
    phase: QueryPhase,
    loading: bool,
    schedule: Option<ForecastSchedule>,
    location: String,
    error: Option<WeatherError>,
}

impl ForecastOrchestrator {
    pub fn new(config: &Config, sink: Box<dyn NotificationSink>) -> Result<Self> {
        let http = build_client(&config.user_agent)?;
        Ok(Self::with_client(config.endpoints.clone(), http, sink))
    }

    pub fn with_client(endpoints: Endpoints, http: Client, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            endpoints,
            http,
            sink,
            phase: QueryPhase::Idle,
            loading: false,
            schedule: None,
            location: String::new(),
            error: None,
        }
    }

    /// Look up the forecast for `postal_code` using the strategy for `mode`.
    ///
    /// Never fails: every outcome ends up as state plus one notification.
    pub async fn query(&mut self, postal_code: &str, mode: Mode) {
        let postal_code = postal_code.trim();
        if postal_code.is_empty() {
            let err = WeatherError::Validation("Please enter a valid zip code".to_string());
            tracing::debug!(kind = err.kind(), "ignoring blank postal code");
            self.sink
                .notify(Notification::error("Invalid Input", err.message()));
            return;
        }

        self.phase = QueryPhase::Loading;
        self.loading = true;
        self.error = None;

        tracing::info!(postal_code, %mode, "querying forecast");
        let source = source_for(mode, &self.endpoints, &self.http);

        match source.forecast(postal_code).await {
            Ok(located) => {
                tracing::info!(
                    location = %located.location,
                    hourly = located.schedule.hourly.len(),
                    daily = located.schedule.daily.len(),
                    "forecast loaded"
                );
                self.sink.notify(Notification::info(
                    "Weather Updated",
                    format!("Weather data loaded for {}", located.location),
                ));
                self.location = located.location;
                self.schedule = Some(located.schedule);
                self.phase = QueryPhase::Success;
            }
            Err(err) => {
                tracing::warn!(postal_code, kind = err.kind(), error = %err, "forecast query failed");
                let description = match err.message().trim() {
                    "" => FALLBACK_ERROR.to_string(),
                    msg => msg.to_string(),
                };
                self.sink.notify(Notification::error("Error", description));
                self.error = Some(err);
                self.phase = QueryPhase::Failed;
            }
        }

        self.loading = false;
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn schedule(&self) -> Option<&ForecastSchedule> {
        self.schedule.as_ref()
    }

    /// Label of the last successful query, empty before the first one.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn error(&self) -> Option<&WeatherError> {
        self.error.as_ref()
    }
}
