use std::sync::Arc;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::types::{ForecastError, ForecastResponse, Location};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Open-Meteo forecast client
#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: String,
    forecast_days: u8,
}

impl ForecastProvider {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>, forecast_days: u8) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            forecast_days,
        }
    }

    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> Result<Url, ForecastError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let forecast_days = self.forecast_days.to_string();
        Ok(Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("forecast_days", forecast_days.as_str()),
                ("timezone", "auto"),
            ],
        )?)
    }

    /// Fetch current conditions and the daily forecast for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, ForecastError> {
        let url = self.forecast_url(latitude, longitude)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            tracing::debug!("Forecast returned status {}", response.status());
            return Err(ForecastError::ForecastStatus(response.status()));
        }

        let forecast: ForecastResponse = response.json().await?;
        tracing::debug!(
            "Forecast received for timezone {:?} with {} daily entries",
            forecast.timezone,
            forecast.daily.as_ref().map(|d| d.time.len()).unwrap_or(0)
        );
        Ok(forecast)
    }

    /// Fetch the forecast at a geocoded location.
    pub async fn fetch_for(&self, location: &Location) -> Result<ForecastResponse, ForecastError> {
        self.fetch(location.latitude, location.longitude).await
    }
}
