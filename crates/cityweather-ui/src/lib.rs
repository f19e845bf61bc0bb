//! Front-end plumbing for City Weather: search workflow state, background
//! weather service and text rendering.

pub mod app_services;
mod error_mapping;
pub mod models;
pub mod render;
pub mod services;

pub use app_services::AppServices;
pub use models::{SearchRequest, SearchState, WeatherModel};
pub use render::render;
