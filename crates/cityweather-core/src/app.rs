use anyhow::Result;
use std::sync::Arc;

use crate::{AppError, Config};

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance from the validated on-disk config
    pub fn new() -> Result<Self, AppError> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    /// Create an application instance around an already loaded config
    pub fn with_config(config: Config) -> Self {
        tracing::debug!(
            "Using geocoding endpoint {} and forecast endpoint {}",
            config.weather.geocoding_url,
            config.weather.forecast_url
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down City Weather");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}
