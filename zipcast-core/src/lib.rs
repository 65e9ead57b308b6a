//! Core library for the `zipcast` CLI.
//!
//! This crate defines:
//! - The persisted data-source [`Mode`] and the storage behind it
//! - Geocoding and forecast retrieval, each with a direct and a backend variant
//! - Normalization of columnar forecast payloads into [`ForecastSchedule`]
//! - The [`ForecastOrchestrator`] that ties a postal code query together
//!
//! It is used by `zipcast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod geocoder;
pub mod http;
pub mod mode;
pub mod model;
pub mod normalize;
pub mod notify;
pub mod orchestrator;
pub mod source;
pub mod storage;

pub use config::{Config, Endpoints};
pub use error::WeatherError;
pub use fetcher::{ForecastFetcher, fetcher_for};
pub use geocoder::{Geocoder, geocoder_for};
pub use mode::{Mode, ModeStore};
pub use model::{Coordinate, ForecastEntry, ForecastSchedule, LocatedForecast, WeatherCondition};
pub use notify::{Notification, NotificationSink, Severity};
pub use orchestrator::{ForecastOrchestrator, QueryPhase};
pub use source::{ForecastSource, source_for};
pub use storage::{KeyValueStore, MemoryStore, TomlFileStore};
