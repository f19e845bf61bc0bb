//! Weather lookup for City Weather
//!
//! Resolves city names and fetches forecasts via the Open-Meteo API, and
//! shapes the responses into a display model.

pub mod client;
pub mod geocode;
pub mod meta;
pub mod provider;
pub mod types;
pub mod view;

pub use client::{ClientOptions, WeatherClient};
pub use geocode::Geocoder;
pub use meta::{weather_meta, WeatherMeta, WEATHER_CODES};
pub use provider::ForecastProvider;
pub use reqwest::StatusCode;
pub use types::*;
pub use view::{CurrentConditions, DailyForecastEntry, WeatherView};
