use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use cityweather_ui::{render, AppServices, WeatherModel};

/// How long to block on the weather channel between loading checks
const POLL_INTERVAL: Duration = Duration::from_millis(200);

fn main() -> Result<()> {
    // Initialize core
    cityweather_core::init()?;

    let mut once = false;
    let mut city = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--once" => once = true,
            _ if city.is_none() => city = Some(arg),
            _ => tracing::warn!("Ignoring extra argument {:?}", arg),
        }
    }

    // Create application from the on-disk config
    let mut app = match cityweather_core::App::new() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };
    let services = AppServices::with_config(&app.config().weather)?;
    let mut model = WeatherModel::new();
    let forecast_days = app.config().weather.forecast_days;

    tracing::info!("City Weather started");

    let city = city.unwrap_or_else(|| app.config().weather.default_city.clone());
    search(&services, &mut model, forecast_days, &city)?;

    if !once {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim() == "quit" {
                break;
            }
            search(&services, &mut model, forecast_days, &line)?;
        }
    }

    // Graceful shutdown
    services.shutdown();
    app.shutdown()?;

    Ok(())
}

/// Run one search to completion, printing the loading and final views.
fn search(
    services: &AppServices,
    model: &mut WeatherModel,
    forecast_days: u8,
    query: &str,
) -> Result<()> {
    let mut stdout = std::io::stdout();

    if let Some(request) = model.submit(query) {
        write!(stdout, "{}", render(model.state(), forecast_days))?;
        stdout.flush()?;
        services.request_weather_fetch(request);

        while model.state().is_loading() {
            if let Some(message) = services.recv_weather_message_timeout(POLL_INTERVAL) {
                model.handle_message(message);
            }
        }
        writeln!(stdout)?;
    }

    writeln!(stdout, "{}", render(model.state(), forecast_days))?;
    stdout.flush()?;
    Ok(())
}
