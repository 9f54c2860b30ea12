use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    http::truncate_body,
    model::{Coordinates, CurrentWeather, TemperatureUnit},
};

use super::WeatherProvider;

pub const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,weather_code,wind_speed_10m";

/// Open-Meteo forecast API. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    unit: TemperatureUnit,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, unit: TemperatureUnit, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            unit,
            http,
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    weather_code: i32,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current_weather(&self, coords: Coordinates) -> Result<CurrentWeather, WeatherError> {
        let url = self.forecast_url();
        tracing::debug!(%url, lat = coords.latitude, lon = coords.longitude, "fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("temperature_unit", self.unit.as_str().to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::HttpError {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        let current = parsed.current;

        Ok(CurrentWeather {
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            relative_humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            weather_code: current.weather_code,
        })
    }
}
