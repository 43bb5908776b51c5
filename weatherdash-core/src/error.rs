use thiserror::Error;

/// Everything that can go wrong during one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Missing, placeholder or rejected API key.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The location query matched nothing.
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Transport failure or a server-side status.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl WeatherError {
    /// Message shown in the dashboard's error state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(msg) => msg.clone(),
            Self::NotFound(_) => "City not found".to_string(),
            Self::Network(_) => "Failed to fetch weather data".to_string(),
            Self::Unknown(msg) => msg.clone(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Unknown(format!("Failed to decode provider response: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unknown(format!("Failed to parse provider response: {err}"))
    }
}

/// Errors from the device position capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location error: {0}")]
    Other(String),
}
