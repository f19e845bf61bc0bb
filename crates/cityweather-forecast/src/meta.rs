//! WMO weather code lookup.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Display label and icon for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherMeta {
    pub label: &'static str,
    pub icon: &'static str,
}

impl WeatherMeta {
    /// Shown for codes missing from [`WEATHER_CODES`] and for absent codes.
    pub const UNKNOWN: WeatherMeta = WeatherMeta::new("Unknown conditions", "🌡️");

    pub const fn new(label: &'static str, icon: &'static str) -> Self {
        Self { label, icon }
    }

    /// Look up a code. Never fails: unmapped codes yield [`WeatherMeta::UNKNOWN`].
    pub fn from_code(code: i32) -> Self {
        WEATHER_CODES
            .binary_search_by_key(&code, |(c, _)| *c)
            .map(|idx| WEATHER_CODES[idx].1)
            .unwrap_or(Self::UNKNOWN)
    }
}

/// Static code table, sorted by code.
pub static WEATHER_CODES: [(i32, WeatherMeta); 28] = [
    (0, WeatherMeta::new("Clear sky", "☀️")),
    (1, WeatherMeta::new("Mainly clear", "🌤️")),
    (2, WeatherMeta::new("Partly cloudy", "⛅")),
    (3, WeatherMeta::new("Overcast", "☁️")),
    (45, WeatherMeta::new("Fog", "🌫️")),
    (48, WeatherMeta::new("Depositing rime fog", "🌫️")),
    (51, WeatherMeta::new("Light drizzle", "🌦️")),
    (53, WeatherMeta::new("Moderate drizzle", "🌦️")),
    (55, WeatherMeta::new("Dense drizzle", "🌧️")),
    (56, WeatherMeta::new("Light freezing drizzle", "🌧️")),
    (57, WeatherMeta::new("Dense freezing drizzle", "🌧️")),
    (61, WeatherMeta::new("Slight rain", "🌦️")),
    (63, WeatherMeta::new("Moderate rain", "🌧️")),
    (65, WeatherMeta::new("Heavy rain", "🌧️")),
    (66, WeatherMeta::new("Light freezing rain", "🌧️")),
    (67, WeatherMeta::new("Heavy freezing rain", "🌧️")),
    (71, WeatherMeta::new("Slight snow", "🌨️")),
    (73, WeatherMeta::new("Moderate snow", "🌨️")),
    (75, WeatherMeta::new("Heavy snow", "❄️")),
    (77, WeatherMeta::new("Snow grains", "❄️")),
    (80, WeatherMeta::new("Rain showers", "🌦️")),
    (81, WeatherMeta::new("Moderate rain showers", "🌧️")),
    (82, WeatherMeta::new("Violent rain showers", "⛈️")),
    (85, WeatherMeta::new("Snow showers", "🌨️")),
    (86, WeatherMeta::new("Heavy snow showers", "❄️")),
    (95, WeatherMeta::new("Thunderstorm", "⛈️")),
    (96, WeatherMeta::new("Thunderstorm with hail", "⛈️")),
    (99, WeatherMeta::new("Thunderstorm with heavy hail", "⛈️")),
];

/// Resolve an optional provider code; a missing code is treated as unmapped.
pub fn weather_meta(code: Option<i32>) -> WeatherMeta {
    code.map(WeatherMeta::from_code).unwrap_or(WeatherMeta::UNKNOWN)
}
