use crate::{
    Config, WeatherError,
    model::{LocationQuery, RawCurrentConditions, RawForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The fetch stage of a refresh. Implementations do no retrying or caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<RawCurrentConditions, WeatherError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RawForecastEntry>, WeatherError>;

    /// Name of the nearest known location to a coordinate pair.
    async fn resolve_location(&self, latitude: f64, longitude: f64)
    -> Result<String, WeatherError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<RawCurrentConditions, WeatherError> {
        (**self).fetch_current(query).await
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RawForecastEntry>, WeatherError> {
        (**self).fetch_forecast(query).await
    }

    async fn resolve_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, WeatherError> {
        (**self).resolve_location(latitude, longitude).await
    }
}

/// Construct the OpenWeather provider from config.
///
/// Fails with [`WeatherError::Configuration`] before any request is made if
/// the key is missing or still the placeholder.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key()?;

    let provider = match config.base_url.as_deref() {
        Some(base) => OpenWeatherProvider::new_with_base_url(api_key.to_owned(), base),
        None => OpenWeatherProvider::new(api_key.to_owned()),
    };

    Ok(provider)
}
