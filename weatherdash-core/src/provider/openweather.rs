use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    WeatherError,
    model::{LocationQuery, RawCurrentConditions, RawForecastEntry},
};

use super::WeatherProvider;

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::new_with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    pub fn new_with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        path: &str,
        location: Vec<(&'static str, String)>,
        what: &str,
        query: &LocationQuery,
    ) -> Result<String, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let mut params = location;
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        tracing::debug!(%query, what, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                WeatherError::Network(format!("Failed to send request to OpenWeather ({what}): {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Network(format!("Failed to read OpenWeather {what} response body: {e}"))
        })?;

        tracing::debug!(%status, what, "OpenWeather responded");

        if !status.is_success() {
            return Err(status_error(status, &body, what, query));
        }

        Ok(body)
    }
}

fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    match query {
        LocationQuery::City(name) => vec![("q", name.clone())],
        LocationQuery::Coordinates(c) => vec![
            ("lat", c.latitude.to_string()),
            ("lon", c.longitude.to_string()),
        ],
    }
}

/// Maps a non-success status to the error taxonomy. Both calls share it.
///
/// Unlike a blanket "not found", a rejected key surfaces as a configuration
/// error and a 5xx as a network error; every other failure status is
/// `NotFound`.
fn status_error(status: StatusCode, body: &str, what: &str, query: &LocationQuery) -> WeatherError {
    let detail = format!(
        "OpenWeather {what} request failed with status {status}: {}",
        truncate_body(body)
    );

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        WeatherError::Configuration(format!(
            "OpenWeather rejected the API key. Check your configuration. ({detail})"
        ))
    } else if status.is_server_error() {
        WeatherError::Network(detail)
    } else {
        tracing::info!(%query, %status, "location not found");
        WeatherError::NotFound(query.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    pressure: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Condition, description and icon of the first weather item.
fn first_weather(weather: Vec<OwWeather>) -> (String, String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string(), String::new()))
}

impl From<OwCurrentResponse> for RawCurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description, icon) = first_weather(parsed.weather);

        Self {
            name: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            pressure_hpa: parsed.main.pressure,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            condition,
            description,
            icon,
        }
    }
}

impl From<OwForecastEntry> for RawForecastEntry {
    fn from(entry: OwForecastEntry) -> Self {
        let (condition, description, icon) = first_weather(entry.weather);

        Self {
            timestamp: entry.dt,
            temp_min_c: entry.main.temp_min,
            temp_max_c: entry.main.temp_max,
            humidity_pct: entry.main.humidity,
            condition,
            description,
            icon,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<RawCurrentConditions, WeatherError> {
        let body = self
            .get(CURRENT_PATH, location_params(query), "current weather", query)
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RawForecastEntry>, WeatherError> {
        let body = self
            .get(FORECAST_PATH, location_params(query), "5-day forecast", query)
            .await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        Ok(parsed.list.into_iter().map(Into::into).collect())
    }

    async fn resolve_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, WeatherError> {
        let query = LocationQuery::coordinates(latitude, longitude);
        let current = self.fetch_current(&query).await?;

        if current.name.trim().is_empty() {
            return Err(WeatherError::NotFound(query.to_string()));
        }

        tracing::info!(%query, name = %current.name, "resolved coordinates");
        Ok(current.name)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
