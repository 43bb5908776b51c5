//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather client
//! - Normalization of raw provider records into a [`WeatherView`]
//! - Condition visuals, unit conversion and the dashboard state machine
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod state;
pub mod units;
pub mod view;

pub use condition::{ConditionKey, Visual};
pub use config::Config;
pub use dashboard::{Dashboard, fetch_view};
pub use error::{LocationError, WeatherError};
pub use location::{FixedPosition, Geolocator};
pub use model::{
    Coordinates, CurrentView, ForecastDay, LocationQuery, RawCurrentConditions,
    RawForecastEntry, WeatherView,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use state::{DashboardState, Event};
pub use units::{TemperatureUnit, to_display_temp};
pub use view::build_view;
