//! Core library for the `geo-weather` CLI.
//!
//! This crate defines:
//! - Weather code to icon lookup
//! - Location sources and reverse geocoding
//! - The Open-Meteo weather provider
//! - The refresh run and the display states it renders
//! - Configuration on disk
//!
//! It is used by `geo-weather-cli`, but any front end can drive it by
//! implementing [`Renderer`].

pub mod app;
pub mod config;
pub mod error;
pub mod geocode;
pub mod http;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;

pub use app::WeatherApp;
pub use config::{Config, LocationConfig, LocationMode};
pub use error::{LocationError, WeatherError};
pub use geocode::{PlaceResolver, ReverseGeocoder};
pub use icon::{UNKNOWN_ICON, weather_description, weather_icon};
pub use location::{DeniedLocation, FixedLocation, IpLocation, LocationProvider};
pub use model::{
    Coordinates, CurrentWeather, DisplayState, ErrorKind, RefreshOutcome, TemperatureUnit,
    WeatherView,
};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use render::{RecordingRenderer, Renderer};
