use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select};
use weather_core::{
    Config, Coordinates, LocationMode, RecordingRenderer, RefreshOutcome, TemperatureUnit,
    WeatherApp,
};

use crate::render::TerminalRenderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geo-weather", version, about = "Current weather for where you are")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and show the current weather once.
    Show {
        /// Latitude to use instead of the configured location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude to use instead of the configured location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the final display state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep the weather on screen, refreshing on the configured interval.
    Watch,

    /// Interactively choose the location source and units.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Show { lat, lon, json } => {
                let mut config = Config::load_from(&config_path)?;
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    config.set_fixed_location(Coordinates::new(lat, lon));
                }
                config.validate()?;
                show(&config, json).await
            }
            Command::Watch => {
                let config = Config::load_from(&config_path)?;
                watch(&config).await
            }
            Command::Configure => configure(&config_path),
            Command::ConfigPath => {
                println!("{}", config_path.display());
                Ok(())
            }
        }
    }
}

async fn show(config: &Config, json: bool) -> Result<()> {
    let app = WeatherApp::from_config(config)?;

    let outcome = if json {
        let recorder = RecordingRenderer::new();
        let outcome = app.refresh(&recorder).await;
        if let Some(state) = recorder.last() {
            let out = serde_json::to_string_pretty(&state)
                .context("Failed to serialize display state")?;
            println!("{out}");
        }
        outcome
    } else {
        app.refresh(&TerminalRenderer::new()).await
    };

    match outcome {
        RefreshOutcome::Error(kind) => bail!("weather refresh failed ({kind:?})"),
        _ => Ok(()),
    }
}

async fn watch(config: &Config) -> Result<()> {
    let app = WeatherApp::from_config(config)?;
    let renderer = TerminalRenderer::redrawing();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    app.run_periodic(&renderer, config.refresh_interval(), shutdown).await;
    Ok(())
}

fn configure(path: &std::path::Path) -> Result<()> {
    let mut config = Config::load_from(path)?;

    let mode = Select::new("Where should your location come from?", LocationMode::all().to_vec())
        .with_help_message("auto: IP lookup, fixed: coordinates you enter, disabled: no location access")
        .prompt()
        .context("Location mode selection cancelled")?;

    match mode {
        LocationMode::Fixed => {
            let latitude = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please enter a number, e.g. 48.85")
                .prompt()
                .context("Latitude input cancelled")?;
            let longitude = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please enter a number, e.g. 2.35")
                .prompt()
                .context("Longitude input cancelled")?;
            config.set_fixed_location(Coordinates::new(latitude, longitude));
        }
        other => config.location.mode = other,
    }

    config.temperature_unit =
        Select::new("Temperature unit:", TemperatureUnit::all().to_vec())
            .prompt()
            .context("Unit selection cancelled")?;

    config.validate()?;
    config.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}
