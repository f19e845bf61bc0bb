use crate::services::weather_service::WeatherError as UiWeatherError;
use cityweather_core::{AppError, Endpoint, ReqwestErrorExt, WeatherError};
use cityweather_forecast::ForecastError;

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Fetch(e) => AppError::Weather(classify(e)),
            UiWeatherError::NotInitialized => {
                AppError::Weather(WeatherError::Unknown("weather service not initialized".into()))
            }
        }
    }
}

/// Sort a lookup failure into the user-facing taxonomy.
fn classify(e: ForecastError) -> WeatherError {
    match e {
        ForecastError::EmptyQuery => WeatherError::EmptyInput,
        ForecastError::NoMatch(city) => WeatherError::NotFound(city),
        ForecastError::GeocodingStatus(_) => WeatherError::ServiceUnavailable(Endpoint::Geocoding),
        ForecastError::ForecastStatus(_) => WeatherError::ServiceUnavailable(Endpoint::Forecast),
        ForecastError::Network(e) => WeatherError::Unknown(e.into_network_error().to_string()),
        ForecastError::InvalidUrl(e) => WeatherError::Unknown(format!("invalid endpoint: {}", e)),
    }
}
