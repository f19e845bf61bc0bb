//! Maps UI service errors to cityweather_core::AppError for consistent user-facing messages.

mod weather;
