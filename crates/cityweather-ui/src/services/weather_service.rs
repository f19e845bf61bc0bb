//! Weather backend: async city searches.
//! All network work runs off the input thread; results sent via mpsc.

use std::sync::Arc;

use cityweather_forecast::{ForecastError, WeatherClient, WeatherReport};

use crate::models::weather_model::SearchRequest;

/// Error type for weather operations
#[derive(Debug)]
pub enum WeatherError {
    Fetch(ForecastError),
    NotInitialized,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Fetch(e) => write!(f, "Weather error: {}", e),
            WeatherError::NotInitialized => write!(f, "Weather service not initialized"),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<ForecastError> for WeatherError {
    fn from(e: ForecastError) -> Self {
        WeatherError::Fetch(e)
    }
}

/// Messages sent from async operations back to the input thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one search, tagged with the request it answers
    FetchDone {
        request_id: u64,
        result: Result<WeatherReport, WeatherError>,
    },
}

/// Request a city search asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    runtime: Option<tokio::runtime::Handle>,
    client: Option<Arc<WeatherClient>>,
    request: SearchRequest,
) {
    let tx = tx.clone();
    let (runtime, client) = match (runtime, client) {
        (Some(r), Some(c)) => (r, c),
        _ => {
            let _ = tx.send(WeatherServiceMessage::FetchDone {
                request_id: request.id,
                result: Err(WeatherError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        tracing::info!("Searching weather for {:?} (request {})", request.city, request.id);
        let result = client
            .fetch_by_city(&request.city)
            .await
            .map_err(WeatherError::from);
        if let Err(e) = &result {
            tracing::warn!("Search {} failed: {}", request.id, e);
        }
        // Receiver gone means the front-end is shutting down
        let _ = tx.send(WeatherServiceMessage::FetchDone {
            request_id: request.id,
            result,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_display() {
        let err = WeatherError::Fetch(ForecastError::NoMatch("Atlantis".into()));
        assert!(format!("{}", err).contains("Weather"));
        assert!(format!("{}", WeatherError::NotInitialized).contains("not initialized"));
    }

    #[test]
    fn missing_runtime_reports_not_initialized() {
        let (tx, rx) = std::sync::mpsc::channel();
        request_fetch(
            &tx,
            None,
            None,
            SearchRequest {
                id: 7,
                city: "Kyiv".into(),
            },
        );

        match rx.try_recv() {
            Ok(WeatherServiceMessage::FetchDone { request_id, result }) => {
                assert_eq!(request_id, 7);
                assert!(matches!(result, Err(WeatherError::NotInitialized)));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
