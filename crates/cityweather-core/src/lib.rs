pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{Config, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ConfigError, Endpoint, NetworkError, ReqwestErrorExt, WeatherError,
};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr, stdout carries the rendered weather.
    // Quiet by default; RUST_LOG=info shows the request flow.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    tracing::info!("City Weather core initialized");
    Ok(())
}
