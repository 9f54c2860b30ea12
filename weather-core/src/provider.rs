use crate::{config::Config, error::WeatherError, model::{Coordinates, CurrentWeather}};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod openmeteo;

pub use openmeteo::OpenMeteoProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, coords: Coordinates) -> Result<CurrentWeather, WeatherError>;
}

/// Construct the weather provider described by the config.
pub fn provider_from_config(config: &Config, http: Client) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(
        config.weather_url.clone(),
        config.temperature_unit,
        http,
    ))
}
