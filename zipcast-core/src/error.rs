use thiserror::Error;

/// Failures a forecast query can end in.
///
/// The orchestrator turns every variant into a user notification; the
/// `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The postal code could not be resolved to a location.
    #[error("{0}")]
    Lookup(String),

    /// The forecast could not be retrieved or its payload was malformed.
    #[error("{0}")]
    Fetch(String),
}

impl WeatherError {
    pub fn lookup(msg: impl Into<String>) -> Self {
        WeatherError::Lookup(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        WeatherError::Fetch(msg.into())
    }

    /// Short category label, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Validation(_) => "validation",
            WeatherError::Lookup(_) => "lookup",
            WeatherError::Fetch(_) => "fetch",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            WeatherError::Validation(m) | WeatherError::Lookup(m) | WeatherError::Fetch(m) => m,
        }
    }
}
