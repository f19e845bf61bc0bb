use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Geographic location resolved from a city name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// First-level administrative area (state, oblast, ...)
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Geocoding search response. `results` is omitted entirely when nothing matches.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<Location>>,
}

/// Forecast response as returned by the provider.
///
/// Every field is optional: a missing or mistyped value becomes `None`
/// instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub current: Option<CurrentBlock>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_units: Option<CurrentUnits>,
    #[serde(default, deserialize_with = "lenient")]
    pub daily: Option<DailyBlock>,
}

/// Current conditions snapshot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub apparent_temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_speed_10m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub weather_code: Option<i32>,
}

/// Unit labels for the current block, e.g. "°C", "%", "km/h"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentUnits {
    #[serde(default, deserialize_with = "lenient")]
    pub temperature_2m: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub apparent_temperature: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub relative_humidity_2m: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_speed_10m: Option<String>,
}

/// Daily forecast as parallel arrays indexed by day
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_code_vec")]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

/// Outcome of a completed city search
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub location: Location,
    pub forecast: ForecastResponse,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(weather_code(&value))
}

fn lenient_code_vec<'de, D>(deserializer: D) -> Result<Vec<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.iter().map(weather_code).collect(),
        _ => Vec::new(),
    })
}

/// WMO code from an integral number (`3`, `3.0`) or an integer string (`"3"`).
fn weather_code(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::Number(n) => {
            let code = n.as_f64()?;
            if code.fract() != 0.0 || code < f64::from(i32::MIN) || code > f64::from(i32::MAX) {
                return None;
            }
            Some(code as i32)
        }
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("City name is empty")]
    EmptyQuery,
    #[error("No geocoding results for {0:?}")]
    NoMatch(String),
    #[error("Geocoding request failed with status {0}")]
    GeocodingStatus(StatusCode),
    #[error("Forecast request failed with status {0}")]
    ForecastStatus(StatusCode),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocoding_response_without_results() {
        let resp: GeocodingResponse = serde_json::from_value(json!({"generationtime_ms": 0.5}))
            .unwrap();
        assert!(resp.results.is_none());
    }

    #[test]
    fn test_location_without_country() {
        let loc: Location = serde_json::from_value(json!({
            "name": "Point Nemo",
            "latitude": -48.87,
            "longitude": -123.39
        }))
        .unwrap();
        assert_eq!(loc.country, "");
        assert!(loc.admin1.is_none());
    }

    #[test]
    fn test_forecast_response_full() {
        let resp: ForecastResponse = serde_json::from_value(json!({
            "timezone": "Europe/Kyiv",
            "current": {
                "time": "2026-10-18T12:00",
                "temperature_2m": 12.3,
                "apparent_temperature": 10.1,
                "relative_humidity_2m": 71,
                "wind_speed_10m": 9.4,
                "weather_code": 61
            },
            "current_units": {
                "temperature_2m": "°C",
                "relative_humidity_2m": "%",
                "wind_speed_10m": "km/h"
            },
            "daily": {
                "time": ["2026-10-18", "2026-10-19"],
                "weather_code": [61, 3],
                "temperature_2m_max": [13.0, 15.5],
                "temperature_2m_min": [6.2, 7.0],
                "precipitation_probability_max": [80, 10]
            }
        }))
        .unwrap();

        let current = resp.current.unwrap();
        assert_eq!(current.weather_code, Some(61));
        assert_eq!(current.relative_humidity_2m, Some(71.0));
        let units = resp.current_units.unwrap();
        assert_eq!(units.wind_speed_10m.as_deref(), Some("km/h"));
        assert!(units.apparent_temperature.is_none());
        let daily = resp.daily.unwrap();
        assert_eq!(daily.time.len(), 2);
        assert_eq!(daily.precipitation_probability_max, vec![Some(80.0), Some(10.0)]);
    }

    #[test]
    fn test_forecast_response_tolerates_bad_fields() {
        let resp: ForecastResponse = serde_json::from_value(json!({
            "timezone": 42,
            "current": {
                "temperature_2m": "warm",
                "weather_code": null
            },
            "daily": {
                "time": ["2026-10-18", null],
                "weather_code": "n/a",
                "temperature_2m_max": [null, 3.5]
            }
        }))
        .unwrap();

        assert!(resp.timezone.is_none());
        assert!(resp.current_units.is_none());
        let current = resp.current.unwrap();
        assert!(current.temperature_2m.is_none());
        assert!(current.weather_code.is_none());
        let daily = resp.daily.unwrap();
        assert_eq!(daily.time, vec![Some("2026-10-18".to_string()), None]);
        assert!(daily.weather_code.is_empty());
        assert_eq!(daily.temperature_2m_max, vec![None, Some(3.5)]);
        assert!(daily.temperature_2m_min.is_empty());
    }

    #[test]
    fn test_weather_code_accepts_integral_floats() {
        let resp: ForecastResponse = serde_json::from_value(json!({
            "current": {"weather_code": 3.0},
            "daily": {"weather_code": [61.0, 3.5, "2", 45, true]}
        }))
        .unwrap();

        assert_eq!(resp.current.unwrap().weather_code, Some(3));
        assert_eq!(
            resp.daily.unwrap().weather_code,
            vec![Some(61), None, Some(2), Some(45), None]
        );
    }

    #[test]
    fn test_empty_forecast_body() {
        let resp: ForecastResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.current.is_none());
        assert!(resp.daily.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = ForecastError::GeocodingStatus(StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("502"));
        assert!(ForecastError::NoMatch("Atlantis".into())
            .to_string()
            .contains("Atlantis"));
    }
}
