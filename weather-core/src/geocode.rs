//! Reverse geocoding: coordinates to a "city, country" label.
//!
//! Speaks the Nominatim `/reverse` format. Failures never escape; the label
//! degrades to the coordinates themselves.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::Coordinates;

/// Turns coordinates into a place label. Implementations must not fail.
#[async_trait]
pub trait PlaceResolver: Send + Sync + Debug {
    async fn resolve(&self, coords: Coordinates) -> String;
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Address,
}

/// The parts of a Nominatim address used for the label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    url: String,
    http: Client,
}

impl ReverseGeocoder {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }

    async fn lookup(&self, coords: Coordinates) -> anyhow::Result<Address> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: NominatimResponse = res.json().await?;
        Ok(body.address)
    }
}

#[async_trait]
impl PlaceResolver for ReverseGeocoder {
    async fn resolve(&self, coords: Coordinates) -> String {
        match self.lookup(coords).await {
            Ok(address) => {
                let label = address_label(&address);
                tracing::debug!(%label, "reverse geocoded");
                label
            }
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocoding failed; using coordinates");
                coordinate_label(coords)
            }
        }
    }
}

/// First present of city, town, village, municipality; then the country.
pub fn address_label(address: &Address) -> String {
    let locality = [&address.city, &address.town, &address.village, &address.municipality]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or("Unknown");
    let country = address.country.as_deref().unwrap_or("");

    format!("{locality}, {country}")
}

/// Coordinates to two decimals with degree marks, e.g. `"48.86°, 2.35°"`.
pub fn coordinate_label(coords: Coordinates) -> String {
    format!("{:.2}°, {:.2}°", coords.latitude, coords.longitude)
}
