use anyhow::Result;
use std::convert::TryFrom;

use crate::storage::KeyValueStore;

/// Key the selected mode is persisted under.
pub const MODE_STORAGE_KEY: &str = "weather-app-api-mode";

/// Where forecast data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Public geocoding and forecast services, called directly.
    #[default]
    Direct,
    /// The intermediary backend service.
    Backend,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Direct => "direct",
            Mode::Backend => "backend",
        }
    }

    pub const fn all() -> &'static [Mode] {
        &[Mode::Direct, Mode::Backend]
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Direct => Mode::Backend,
            Mode::Backend => Mode::Direct,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Mode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "direct" => Ok(Mode::Direct),
            "backend" => Ok(Mode::Backend),
            _ => Err(anyhow::anyhow!(
                "Unknown mode '{value}'. Supported modes: direct, backend."
            )),
        }
    }
}

/// Current mode, written through to durable storage on every change.
pub struct ModeStore<S: KeyValueStore> {
    storage: S,
    mode: Mode,
}

impl<S: KeyValueStore> ModeStore<S> {
    /// Read the persisted mode.
    ///
    /// A missing, unreadable, or unrecognized value falls back to
    /// [`Mode::Direct`], which is then written back to storage.
    pub fn load(mut storage: S) -> Self {
        let stored = match storage.get(MODE_STORAGE_KEY) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored mode");
                None
            }
        };

        let mode = match stored.as_deref().map(Mode::try_from) {
            Some(Ok(mode)) => mode,
            other => {
                if let Some(Err(err)) = other {
                    tracing::warn!(error = %err, "ignoring stored mode");
                }
                let mode = Mode::default();
                if let Err(err) = storage.set(MODE_STORAGE_KEY, mode.as_str()) {
                    tracing::warn!(error = %err, "could not persist default mode");
                }
                mode
            }
        };

        tracing::debug!(%mode, "mode loaded");
        Self { storage, mode }
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.mode = mode;
        self.storage.set(MODE_STORAGE_KEY, mode.as_str())?;
        tracing::info!(%mode, "mode changed");
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> Result<Mode> {
        let next = self.mode.toggled();
        self.set_mode(next)?;
        Ok(next)
    }

    pub fn is_direct(&self) -> bool {
        self.mode == Mode::Direct
    }

    pub fn is_backend(&self) -> bool {
        self.mode == Mode::Backend
    }

    #[cfg(test)]
    fn into_storage(self) -> S {
        self.storage
    }
}
