//! Search workflow state.
//!
//! The whole view state is one `SearchState` value, replaced on every
//! transition. Each submission gets a new request id and only the answer to
//! the latest id is committed; older answers are dropped.

use cityweather_core::{AppError, WeatherError};
use cityweather_forecast::{WeatherReport, WeatherView};

use crate::services::WeatherServiceMessage;

/// What the front-end shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        request_id: u64,
        city: String,
    },
    Loaded(Box<WeatherView>),
    /// User-facing message of the failure. Earlier results are not kept.
    Errored(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn view(&self) -> Option<&WeatherView> {
        match self {
            SearchState::Loaded(view) => Some(&**view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Errored(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// A search the caller must run, see `services::request_weather_fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    /// Trimmed, never empty
    pub city: String,
}

#[derive(Debug, Default)]
pub struct WeatherModel {
    state: SearchState,
    latest_request_id: u64,
}

impl WeatherModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn latest_request_id(&self) -> u64 {
        self.latest_request_id
    }

    /// Start a search for `query`.
    ///
    /// Returns the request to run, or `None` when the query is blank; in that
    /// case the state is `Errored` with the empty-input message and no
    /// request may be issued. Either way any search still in flight is
    /// superseded.
    pub fn submit(&mut self, query: &str) -> Option<SearchRequest> {
        self.latest_request_id += 1;
        let city = query.trim();

        if city.is_empty() {
            tracing::debug!("Rejected blank search");
            self.state = SearchState::Errored(WeatherError::EmptyInput.user_message().to_string());
            return None;
        }

        let request = SearchRequest {
            id: self.latest_request_id,
            city: city.to_string(),
        };
        self.state = SearchState::Loading {
            request_id: request.id,
            city: request.city.clone(),
        };
        Some(request)
    }

    /// Commit the outcome of request `request_id`.
    ///
    /// Returns false, leaving the state untouched, when a newer request has
    /// been issued since.
    pub fn complete(&mut self, request_id: u64, result: Result<WeatherReport, AppError>) -> bool {
        if request_id != self.latest_request_id {
            tracing::debug!(
                "Dropping stale result for request {} (latest is {})",
                request_id,
                self.latest_request_id
            );
            return false;
        }

        self.state = match result {
            Ok(report) => {
                tracing::info!(
                    "Loaded weather for {}, {}",
                    report.location.name,
                    report.location.country
                );
                SearchState::Loaded(Box::new(WeatherView::from(report)))
            }
            Err(e) => {
                tracing::error!("Failed to fetch weather: {}", e);
                SearchState::Errored(e.user_message().to_string())
            }
        };
        true
    }

    /// Apply a message from the weather service.
    pub fn handle_message(&mut self, message: WeatherServiceMessage) -> bool {
        match message {
            WeatherServiceMessage::FetchDone { request_id, result } => {
                self.complete(request_id, result.map_err(AppError::from))
            }
        }
    }
}
