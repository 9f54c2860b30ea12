//! Sources for the current position.
//!
//! A desktop has no browser-style geolocation prompt, so the position comes
//! from one of three places: an IP geolocation lookup, coordinates pinned in
//! the config, or nowhere at all when the user has turned location off.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::{Config, LocationMode},
    error::LocationError,
    http::truncate_body,
    model::Coordinates,
};

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// Location access turned off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
}

/// Approximate position from the public IP address (ipapi.co format).
#[derive(Debug, Clone)]
pub struct IpLocation {
    url: String,
    http: Client,
}

impl IpLocation {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(url = %self.url, "requesting IP geolocation");

        let res = self.http.get(&self.url).send().await.map_err(transport_error)?;

        let status = res.status();
        let body = res.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "IP geolocation failed with status {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let parsed: IpApiResponse = serde_json::from_str(&body).map_err(|e| {
            LocationError::Unavailable(format!("Failed to parse IP geolocation JSON: {e}"))
        })?;

        match (parsed.latitude, parsed.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coords = Coordinates::new(latitude, longitude);
                tracing::debug!(lat = latitude, lon = longitude, "IP geolocation resolved");
                Ok(coords)
            }
            _ => Err(LocationError::Unavailable(
                parsed
                    .reason
                    .unwrap_or_else(|| "IP geolocation response had no coordinates".to_string()),
            )),
        }
    }
}

fn transport_error(err: reqwest::Error) -> LocationError {
    if err.is_timeout() {
        LocationError::Timeout
    } else {
        LocationError::Unavailable(err.to_string())
    }
}

/// Construct the location source selected in the config.
pub fn location_provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    let boxed: Box<dyn LocationProvider> = match config.location.mode {
        LocationMode::Auto => Box::new(IpLocation::new(config.ip_location_url.clone(), http)),
        LocationMode::Fixed => {
            let coords = config.location.coordinates().ok_or_else(|| {
                anyhow::anyhow!(
                    "Location mode is 'fixed' but no coordinates are configured.\n\
                     Hint: run `geo-weather configure` first."
                )
            })?;
            Box::new(FixedLocation::new(coords))
        }
        LocationMode::Disabled => Box::new(DeniedLocation),
    };

    Ok(boxed)
}
