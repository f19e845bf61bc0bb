//! Application services shared by the front-end.
//!
//! `AppServices` owns the tokio runtime, the weather client and the weather
//! service channel. The client is installed after construction through
//! `init_weather_client`; until then searches fail as not initialized.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};

use cityweather_core::WeatherConfig;
use cityweather_forecast::{ClientOptions, ForecastError, WeatherClient};

use crate::models::weather_model::SearchRequest;
use crate::services::{self, WeatherServiceMessage};

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    /// Geocoding + forecast client
    weather_client: RwLock<Option<Arc<WeatherClient>>>,

    /// Weather service channel sender
    weather_service_tx: Sender<WeatherServiceMessage>,

    /// Weather service channel receiver
    weather_service_rx: Mutex<Receiver<WeatherServiceMessage>>,
}

impl AppServices {
    /// Create the runtime and channel. No client is configured yet.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("cityweather-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let (tx, rx) = std::sync::mpsc::channel();

        Ok(Self {
            runtime,
            weather_client: RwLock::new(None),
            weather_service_tx: tx,
            weather_service_rx: Mutex::new(rx),
        })
    }

    /// Create services with a client built from the weather settings.
    pub fn with_config(config: &WeatherConfig) -> Result<Self> {
        let services = Self::new()?;
        services
            .init_weather_client(client_options(config))
            .context("Failed to create weather client")?;
        Ok(services)
    }

    pub fn runtime_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    // =========== Weather Client ===========

    /// Build the weather client used by later searches.
    pub fn init_weather_client(&self, options: ClientOptions) -> Result<(), ForecastError> {
        let client = WeatherClient::new(options)?;
        *self.weather_client.write() = Some(Arc::new(client));
        tracing::info!("Weather client initialized");
        Ok(())
    }

    pub fn weather_client(&self) -> Option<Arc<WeatherClient>> {
        self.weather_client.read().clone()
    }

    // =========== Weather Service Channel ===========

    /// Run `request` in the background; the answer arrives on the weather channel.
    pub fn request_weather_fetch(&self, request: SearchRequest) {
        services::request_weather_fetch(
            &self.weather_service_tx,
            Some(self.runtime_handle()),
            self.weather_client(),
            request,
        );
    }

    /// Wait up to `timeout` for the next weather message.
    pub fn recv_weather_message_timeout(&self, timeout: Duration) -> Option<WeatherServiceMessage> {
        self.weather_service_rx.lock().recv_timeout(timeout).ok()
    }

    /// Shut the runtime down, giving in-flight requests a short grace period.
    pub fn shutdown(self) {
        tracing::info!("Shutting down application services");
        self.runtime.shutdown_timeout(Duration::from_secs(1));
    }
}

/// Translate config settings into client options.
pub fn client_options(config: &WeatherConfig) -> ClientOptions {
    ClientOptions {
        geocoding_url: config.geocoding_url.clone(),
        forecast_url: config.forecast_url.clone(),
        language: config.language.clone(),
        forecast_days: config.forecast_days,
        timeout: match config.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        },
    }
}
