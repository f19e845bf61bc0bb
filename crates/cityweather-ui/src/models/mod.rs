pub mod weather_model;

pub use weather_model::{SearchRequest, SearchState, WeatherModel};
