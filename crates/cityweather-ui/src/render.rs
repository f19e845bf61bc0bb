//! Plain-text rendering of the search state.

use std::fmt::{Display, Write};

use cityweather_forecast::{CurrentConditions, DailyForecastEntry, WeatherView};

use crate::models::SearchState;

pub const TITLE: &str = "City Weather";
pub const LOADING: &str = "Loading...";

/// Placeholder for values the provider did not send
const MISSING: &str = "--";

/// Header line under the title, e.g. "Current conditions and 5-day forecast ...".
pub fn subtitle(forecast_days: u8) -> String {
    format!(
        "Current conditions and {}-day forecast powered by Open-Meteo.",
        forecast_days
    )
}

/// Render `state` under the header for a `forecast_days` forecast.
pub fn render(state: &SearchState, forecast_days: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", subtitle(forecast_days));

    match state {
        SearchState::Idle => {}
        SearchState::Loading { .. } => {
            let _ = writeln!(out, "\n{}", LOADING);
        }
        SearchState::Errored(message) => {
            let _ = writeln!(out, "\n{}", message);
        }
        SearchState::Loaded(view) => render_view(&mut out, view),
    }

    out
}

fn render_view(out: &mut String, view: &WeatherView) {
    let location = &view.location;
    let _ = writeln!(out);
    if location.country.is_empty() {
        let _ = writeln!(out, "{}", location.name);
    } else {
        let _ = writeln!(out, "{}, {}", location.name, location.country);
    }
    if let Some(timezone) = &view.timezone {
        let _ = writeln!(out, "Timezone: {}", timezone);
    }

    if let Some(current) = &view.current {
        render_current(out, current);
    }

    if !view.daily.is_empty() {
        let _ = writeln!(out);
        for day in &view.daily {
            render_day(out, day);
        }
    }
}

fn render_current(out: &mut String, current: &CurrentConditions) {
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} {}{}",
        current.meta.icon,
        value(current.temperature),
        current.temperature_unit
    );
    let _ = writeln!(out, "{}", current.meta.label);
    let _ = writeln!(
        out,
        "Feels like: {}{}   Humidity: {}{}   Wind: {} {}",
        value(current.apparent_temperature),
        current.apparent_temperature_unit,
        value(current.humidity),
        current.humidity_unit,
        value(current.wind_speed),
        current.wind_speed_unit
    );
}

fn render_day(out: &mut String, day: &DailyForecastEntry) {
    let _ = writeln!(
        out,
        "{:<12} {} {:<24} {}° / {}°   Rain: {}%",
        day.day_label,
        day.meta.icon,
        day.meta.label,
        value(day.max_temp),
        value(day.min_temp),
        value(day.precipitation_chance)
    );
}

fn value<T: Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}
