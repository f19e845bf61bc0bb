//! Display model built from a forecast response.
//!
//! Everything here is pure and total: missing provider data turns into
//! empty values, never into an error.

use chrono::NaiveDate;

use crate::meta::{weather_meta, WeatherMeta};
use crate::types::{CurrentBlock, CurrentUnits, DailyBlock, ForecastResponse, Location, WeatherReport};

/// Current conditions ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: Option<i64>,
    pub temperature_unit: String,
    pub apparent_temperature: Option<i64>,
    pub apparent_temperature_unit: String,
    /// Shown as provided, not rounded
    pub humidity: Option<f64>,
    pub humidity_unit: String,
    pub wind_speed: Option<i64>,
    pub wind_speed_unit: String,
    pub weather_code: Option<i32>,
    pub meta: WeatherMeta,
}

/// One day of the forecast
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    /// Provider date, `YYYY-MM-DD`
    pub date: String,
    /// Short label such as "Mon, Oct 19"
    pub day_label: String,
    pub weather_code: Option<i32>,
    pub meta: WeatherMeta,
    pub max_temp: Option<i64>,
    pub min_temp: Option<i64>,
    pub precipitation_chance: Option<f64>,
}

/// Complete display bundle for one search
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub location: Location,
    pub timezone: Option<String>,
    pub current: Option<CurrentConditions>,
    pub daily: Vec<DailyForecastEntry>,
}

impl WeatherView {
    pub fn build(location: Location, forecast: &ForecastResponse) -> Self {
        let current = forecast
            .current
            .as_ref()
            .map(|block| current_conditions(block, forecast.current_units.as_ref()));
        let daily = forecast
            .daily
            .as_ref()
            .map(daily_entries)
            .unwrap_or_default();

        Self {
            location,
            timezone: forecast.timezone.clone(),
            current,
            daily,
        }
    }
}

impl From<WeatherReport> for WeatherView {
    fn from(report: WeatherReport) -> Self {
        Self::build(report.location, &report.forecast)
    }
}

fn current_conditions(block: &CurrentBlock, units: Option<&CurrentUnits>) -> CurrentConditions {
    CurrentConditions {
        temperature: block.temperature_2m.and_then(round_half_up),
        temperature_unit: unit_label(units, |u| u.temperature_2m.as_ref()),
        apparent_temperature: block.apparent_temperature.and_then(round_half_up),
        apparent_temperature_unit: unit_label(units, |u| u.apparent_temperature.as_ref()),
        humidity: block.relative_humidity_2m,
        humidity_unit: unit_label(units, |u| u.relative_humidity_2m.as_ref()),
        wind_speed: block.wind_speed_10m.and_then(round_half_up),
        wind_speed_unit: unit_label(units, |u| u.wind_speed_10m.as_ref()),
        weather_code: block.weather_code,
        meta: weather_meta(block.weather_code),
    }
}

fn unit_label(
    units: Option<&CurrentUnits>,
    pick: impl Fn(&CurrentUnits) -> Option<&String>,
) -> String {
    units.and_then(pick).cloned().unwrap_or_default()
}

/// Zip the parallel daily arrays by index. `time` drives the day count.
fn daily_entries(daily: &DailyBlock) -> Vec<DailyForecastEntry> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let date = date.clone().unwrap_or_default();
            let weather_code = daily.weather_code.get(i).copied().flatten();
            DailyForecastEntry {
                day_label: format_day(&date),
                date,
                weather_code,
                meta: weather_meta(weather_code),
                max_temp: daily
                    .temperature_2m_max
                    .get(i)
                    .copied()
                    .flatten()
                    .and_then(round_half_up),
                min_temp: daily
                    .temperature_2m_min
                    .get(i)
                    .copied()
                    .flatten()
                    .and_then(round_half_up),
                precipitation_chance: daily.precipitation_probability_max.get(i).copied().flatten(),
            }
        })
        .collect()
}

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    Some(rounded as i64)
}

/// Short weekday, month and day, e.g. "Mon, Oct 19". Unparsable input is returned as is.
pub fn format_day(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => day.format("%a, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kyiv() -> Location {
        Location {
            name: "Kyiv".to_string(),
            country: "Ukraine".to_string(),
            latitude: 50.45,
            longitude: 30.52,
            admin1: None,
            timezone: None,
        }
    }

    fn forecast(value: serde_json::Value) -> ForecastResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(20.4), Some(20));
        assert_eq!(round_half_up(20.5), Some(21));
        assert_eq!(round_half_up(-2.5), Some(-2));
        assert_eq!(round_half_up(-2.6), Some(-3));
        assert_eq!(round_half_up(0.0), Some(0));
        assert_eq!(round_half_up(f64::NAN), None);
        assert_eq!(round_half_up(f64::INFINITY), None);
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day("2026-10-19"), "Mon, Oct 19");
        assert_eq!(format_day("2026-01-01"), "Thu, Jan 1");
        assert_eq!(format_day("tomorrow"), "tomorrow");
        assert_eq!(format_day(""), "");
    }

    #[test]
    fn test_kyiv_current_conditions() {
        let view = WeatherView::build(
            kyiv(),
            &forecast(json!({
                "timezone": "Europe/Kyiv",
                "current": {
                    "temperature_2m": 20.4,
                    "apparent_temperature": 19.5,
                    "relative_humidity_2m": 64,
                    "wind_speed_10m": 11.6,
                    "weather_code": 3
                },
                "current_units": {
                    "temperature_2m": "°C",
                    "apparent_temperature": "°C",
                    "relative_humidity_2m": "%",
                    "wind_speed_10m": "km/h"
                }
            })),
        );

        assert_eq!(view.location.name, "Kyiv");
        assert_eq!(view.timezone.as_deref(), Some("Europe/Kyiv"));
        let current = view.current.unwrap();
        assert_eq!(current.meta.label, "Overcast");
        assert_eq!(current.meta.icon, "\u{2601}\u{fe0f}");
        assert_eq!(current.temperature, Some(20));
        assert_eq!(current.temperature_unit, "°C");
        assert_eq!(current.apparent_temperature, Some(20));
        assert_eq!(current.humidity, Some(64.0));
        assert_eq!(current.humidity_unit, "%");
        assert_eq!(current.wind_speed, Some(12));
        assert_eq!(current.wind_speed_unit, "km/h");
    }

    #[test]
    fn test_five_days_in_provider_order() {
        let view = WeatherView::build(
            kyiv(),
            &forecast(json!({
                "daily": {
                    "time": ["2026-10-18", "2026-10-19", "2026-10-20", "2026-10-21", "2026-10-22"],
                    "weather_code": [0, 3, 61, 95, 71],
                    "temperature_2m_max": [14.6, 15.2, 11.5, 9.49, -0.5],
                    "temperature_2m_min": [4.4, 6.5, 5.1, 2.0, -3.7],
                    "precipitation_probability_max": [0, 15, 80, 95, 40]
                }
            })),
        );

        assert_eq!(view.daily.len(), 5);
        let dates: Vec<&str> = view.daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            ["2026-10-18", "2026-10-19", "2026-10-20", "2026-10-21", "2026-10-22"]
        );
        let highs: Vec<Option<i64>> = view.daily.iter().map(|d| d.max_temp).collect();
        assert_eq!(highs, [Some(15), Some(15), Some(12), Some(9), Some(0)]);
        let lows: Vec<Option<i64>> = view.daily.iter().map(|d| d.min_temp).collect();
        assert_eq!(lows, [Some(4), Some(7), Some(5), Some(2), Some(-4)]);
        let rain: Vec<Option<f64>> = view.daily.iter().map(|d| d.precipitation_chance).collect();
        assert_eq!(rain, [Some(0.0), Some(15.0), Some(80.0), Some(95.0), Some(40.0)]);
        let labels: Vec<&str> = view.daily.iter().map(|d| d.meta.label).collect();
        assert_eq!(
            labels,
            ["Clear sky", "Overcast", "Slight rain", "Thunderstorm", "Slight snow"]
        );
        assert_eq!(view.daily[0].day_label, "Sun, Oct 18");
    }

    #[test]
    fn test_short_parallel_arrays_degrade() {
        let view = WeatherView::build(
            kyiv(),
            &forecast(json!({
                "daily": {
                    "time": ["2026-10-18", "2026-10-19"],
                    "weather_code": [2],
                    "temperature_2m_max": [10.0]
                }
            })),
        );

        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.daily[0].meta.label, "Partly cloudy");
        assert_eq!(view.daily[1].weather_code, None);
        assert_eq!(view.daily[1].meta, WeatherMeta::UNKNOWN);
        assert_eq!(view.daily[1].max_temp, None);
        assert_eq!(view.daily[0].min_temp, None);
        assert_eq!(view.daily[0].precipitation_chance, None);
    }

    #[test]
    fn test_unmapped_code_degrades_to_default() {
        let view = WeatherView::build(
            kyiv(),
            &forecast(json!({"current": {"weather_code": 42}})),
        );
        let current = view.current.unwrap();
        assert_eq!(current.meta, WeatherMeta::UNKNOWN);
        assert_eq!(current.temperature, None);
        assert_eq!(current.temperature_unit, "");
    }

    #[test]
    fn test_float_code_resolves_label() {
        let view = WeatherView::build(
            kyiv(),
            &forecast(json!({"current": {"weather_code": 3.0}})),
        );
        let current = view.current.unwrap();
        assert_eq!(current.meta.label, "Overcast");
        assert_eq!(current.weather_code, Some(3));
    }

    #[test]
    fn test_missing_blocks_give_empty_view() {
        let view = WeatherView::build(kyiv(), &ForecastResponse::default());
        assert!(view.current.is_none());
        assert!(view.daily.is_empty());
        assert!(view.timezone.is_none());
    }

    #[test]
    fn test_from_report() {
        let report = WeatherReport {
            location: kyiv(),
            forecast: forecast(json!({"daily": {"time": ["2026-10-18"]}})),
        };
        let view = WeatherView::from(report);
        assert_eq!(view.location, kyiv());
        assert_eq!(view.daily.len(), 1);
    }
}
