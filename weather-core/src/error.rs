//! Error types for a weather refresh.
//!
//! Only two messages ever reach the user: one asking to enable location
//! access, and a generic retry-later message for everything else.

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::ErrorKind;

pub const PERMISSION_DENIED_MESSAGE: &str = "Please enable location access to see weather.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to load weather data. Please try again later.";

/// Failures from the location source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Location request timed out")]
    Timeout,
}

/// Failures that abort a refresh run.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Weather request failed with status {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("Failed to parse weather response: {0}")]
    ParseFailure(String),
}

impl WeatherError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, WeatherError::PermissionDenied)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::PermissionDenied => ErrorKind::PermissionDenied,
            WeatherError::LocationUnavailable(_) => ErrorKind::LocationUnavailable,
            WeatherError::NetworkFailure(_) => ErrorKind::Network,
            WeatherError::HttpError { .. } => ErrorKind::Http,
            WeatherError::ParseFailure(_) => ErrorKind::Parse,
        }
    }

    /// Message suitable for the error view.
    pub fn user_message(&self) -> &'static str {
        if self.is_permission_denied() {
            PERMISSION_DENIED_MESSAGE
        } else {
            GENERIC_FAILURE_MESSAGE
        }
    }
}

impl From<LocationError> for WeatherError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => WeatherError::PermissionDenied,
            other => WeatherError::LocationUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::ParseFailure(err.to_string())
    }
}
