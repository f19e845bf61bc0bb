//! Forward geocoding: convert a free-text city name to a location.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::types::{ForecastError, GeocodingResponse, Location};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    base_url: String,
    language: String,
}

impl Geocoder {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
        }
    }

    /// Build the search URL for a trimmed, non-empty city name.
    pub fn search_url(&self, city: &str) -> Result<Url, ForecastError> {
        let mut params = vec![("name", city), ("count", "1")];
        if !self.language.is_empty() {
            params.push(("language", self.language.as_str()));
        }
        params.push(("format", "json"));
        Ok(Url::parse_with_params(&self.base_url, &params)?)
    }

    /// Resolve a city name to its best matching location.
    ///
    /// Surrounding whitespace is ignored; an empty name fails with
    /// [`ForecastError::EmptyQuery`] without touching the network.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, city: &str) -> Result<Location, ForecastError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ForecastError::EmptyQuery);
        }

        let url = self.search_url(city)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            tracing::debug!("Geocoding returned status {}", response.status());
            return Err(ForecastError::GeocodingStatus(response.status()));
        }

        let body: GeocodingResponse = response.json().await?;
        let location = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ForecastError::NoMatch(city.to_string()))?;

        tracing::info!(
            "Geocoded {:?} to {}, {} ({}, {})",
            city,
            location.name,
            location.country,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
