//! Centralized error types for City Weather.
//!
//! This module provides a typed error hierarchy that:
//! - Classifies every search failure into one of a handful of kinds
//! - Provides user-friendly messages suitable for display
//! - Preserves the underlying detail for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather search error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "Could not read or write the configuration file.",
        }
    }
}

/// Remote endpoint a search talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Forecast,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Geocoding => write!(f, "geocoding"),
            Endpoint::Forecast => write!(f, "forecast"),
        }
    }
}

/// Failure kinds of a city search.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Empty city name")]
    EmptyInput,

    #[error("No location matches {0:?}")]
    NotFound(String),

    #[error("The {0} service returned a non-success status")]
    ServiceUnavailable(Endpoint),

    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

impl WeatherError {
    pub const UNKNOWN_MESSAGE: &'static str = "Something went wrong while loading weather data.";

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyInput => "Please enter a city name.",
            WeatherError::NotFound(_) => "No matching city found. Try a different name.",
            WeatherError::ServiceUnavailable(Endpoint::Geocoding) => {
                "Could not find that city. Please try another search."
            }
            WeatherError::ServiceUnavailable(Endpoint::Forecast) => {
                "Weather service is unavailable right now. Please retry in a moment."
            }
            WeatherError::Unknown(_) => Self::UNKNOWN_MESSAGE,
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration file not found. Check CITYWEATHER_CONFIG.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
