use serde::{Deserialize, Serialize};

pub const DEFAULT_CITY: &str = "London";

/// A geographic position as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where to fetch weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates(Coordinates { latitude, longitude })
    }

    /// Builds a query from free-text search input; blank input yields `None`.
    pub fn from_search(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| Self::City(trimmed.to_string()))
    }
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self::City(DEFAULT_CITY.to_string())
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates(c) => write!(f, "{:.4}, {:.4}", c.latitude, c.longitude),
        }
    }
}

/// Current conditions as reported by the provider, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentConditions {
    pub name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub visibility_m: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    pub timestamp: i64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// Normalized, display-ready weather. Temperatures are Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub current: CurrentView,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentView {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub visibility_km: Option<f64>,
    pub pressure: Option<f64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    /// Not provided by this data source; always `None`.
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: i64,
    pub day: String,
    pub date: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub description: String,
    pub humidity: u8,
}
