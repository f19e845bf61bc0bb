//! City search: geocode a name, then fetch the forecast for the match.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::geocode::{Geocoder, GEOCODING_URL};
use crate::provider::{ForecastProvider, FORECAST_URL};
use crate::types::{ForecastError, WeatherReport};

/// Endpoints and request settings for [`WeatherClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub language: String,
    pub forecast_days: u8,
    /// `None` leaves requests without a deadline
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            language: "en".to_string(),
            forecast_days: 5,
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    geocoder: Geocoder,
    provider: ForecastProvider,
}

impl WeatherClient {
    pub fn new(options: ClientOptions) -> Result<Self, ForecastError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = Arc::new(builder.build()?);

        Ok(Self {
            geocoder: Geocoder::new(client.clone(), options.geocoding_url, options.language),
            provider: ForecastProvider::new(client, options.forecast_url, options.forecast_days),
        })
    }

    /// Resolve `city` and fetch its forecast.
    ///
    /// The forecast request is only issued once geocoding succeeded; the
    /// first failing stage's error is returned as is.
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherReport, ForecastError> {
        let location = self.geocoder.search(city).await?;
        let forecast = self.provider.fetch_for(&location).await?;
        Ok(WeatherReport { location, forecast })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> WeatherClient {
        WeatherClient::new(ClientOptions {
            geocoding_url: format!("{}/v1/search", server.uri()),
            forecast_url: format!("{}/v1/forecast", server.uri()),
            ..ClientOptions::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_by_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"name": "Tokyo", "country": "Japan", "latitude": 35.69, "longitude": 139.69}]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timezone": "Asia/Tokyo",
                "current": {"temperature_2m": 18.0, "weather_code": 1}
            })))
            .mount(&mock_server)
            .await;

        let report = client(&mock_server).fetch_by_city("Tokyo").await.unwrap();
        assert_eq!(report.location.name, "Tokyo");
        assert_eq!(report.forecast.timezone.as_deref(), Some("Asia/Tokyo"));
    }

    #[tokio::test]
    async fn test_no_forecast_request_after_failed_geocode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).fetch_by_city("Nowhere").await;
        assert!(matches!(result, Err(ForecastError::NoMatch(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(ClientOptions {
            geocoding_url: format!("{}/v1/search", mock_server.uri()),
            timeout: Some(Duration::from_millis(50)),
            ..ClientOptions::default()
        })
        .unwrap();

        let result = client.fetch_by_city("Slowtown").await;
        assert!(matches!(result, Err(ForecastError::Network(e)) if e.is_timeout()));
    }
}
