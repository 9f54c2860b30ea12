use serde::{Deserialize, Serialize, Serializer};

use crate::icon::{weather_description, weather_icon};

pub const STATUS_LOCATING: &str = "Getting your location...";
pub const STATUS_LOADING_WEATHER: &str = "Loading weather data...";

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Value of Open-Meteo's `temperature_unit` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius]
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions as reported by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub relative_humidity: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
}

/// Everything the content state shows, already rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub temperature: i64,
    pub feels_like: i64,
    #[serde(serialize_with = "serialize_as_given")]
    pub humidity: f64,
    pub wind_speed: i64,
    pub location: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub unit: TemperatureUnit,
}

impl WeatherView {
    pub fn new(weather: &CurrentWeather, location: String, unit: TemperatureUnit) -> Self {
        Self {
            temperature: round_half_up(weather.temperature),
            feels_like: round_half_up(weather.apparent_temperature),
            humidity: weather.relative_humidity,
            wind_speed: round_half_up(weather.wind_speed),
            location,
            icon: weather_icon(weather.weather_code),
            description: weather_description(weather.weather_code),
            unit,
        }
    }
}

/// Rounds to the nearest integer with halves going toward positive infinity,
/// so `72.5 -> 73` and `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    // `value - floor` is exact, unlike `value + 0.5`.
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Whole numbers are written without a fraction, the way the API sent them.
fn serialize_as_given<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Category of a failed run, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PermissionDenied,
    LocationUnavailable,
    Network,
    Http,
    Parse,
}

/// The single view currently shown. Only one is visible at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    Loading { status: &'static str },
    Content(WeatherView),
    Error { kind: ErrorKind, message: String },
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading { .. })
    }

    pub fn is_content(&self) -> bool {
        matches!(self, DisplayState::Content(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::Error { .. })
    }
}

/// How a refresh run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Content,
    Error(ErrorKind),
    /// Another run was still in flight; nothing was rendered.
    Skipped,
}
