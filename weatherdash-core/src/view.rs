//! Raw provider records to [`WeatherView`].

use chrono::{DateTime, Local, TimeZone};

use crate::model::{CurrentView, ForecastDay, RawCurrentConditions, RawForecastEntry, WeatherView};

/// Samples per day in the 3-hourly feed.
pub const SAMPLES_PER_DAY: usize = 8;
pub const FORECAST_DAYS: usize = 5;

/// Builds the view in the viewer's local time zone.
pub fn build_view(current: &RawCurrentConditions, entries: &[RawForecastEntry]) -> WeatherView {
    build_view_in(current, entries, &Local)
}

pub fn build_view_in<Tz>(
    current: &RawCurrentConditions,
    entries: &[RawForecastEntry],
    tz: &Tz,
) -> WeatherView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    WeatherView {
        current: current_view(current),
        forecast: daily_samples(entries)
            .map(|entry| forecast_day(entry, tz))
            .collect(),
    }
}

fn current_view(raw: &RawCurrentConditions) -> CurrentView {
    CurrentView {
        location: format!("{}, {}", raw.name, raw.country),
        temperature: raw.temperature_c,
        feels_like: raw.feels_like_c,
        description: raw.description.clone(),
        condition: raw.condition.clone(),
        humidity: raw.humidity_pct,
        wind_speed: raw.wind_speed_mps,
        visibility_km: raw.visibility_m.map(|m| m / 1000.0),
        pressure: raw.pressure_hpa,
        sunrise: raw.sunrise,
        sunset: raw.sunset,
        uv_index: None,
    }
}

/// Every 8th sample from index 0, at most five of them.
///
/// The feed is assumed to start near midnight; samples are not re-anchored
/// to the local day boundary.
pub fn daily_samples(entries: &[RawForecastEntry]) -> impl Iterator<Item = &RawForecastEntry> {
    entries.iter().step_by(SAMPLES_PER_DAY).take(FORECAST_DAYS)
}

fn forecast_day<Tz>(entry: &RawForecastEntry, tz: &Tz) -> ForecastDay
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let (day, date) = match DateTime::from_timestamp(entry.timestamp, 0) {
        Some(utc) => {
            let local = utc.with_timezone(tz);
            (local.format("%a").to_string(), local.format("%-m/%-d/%Y").to_string())
        }
        None => {
            tracing::warn!(timestamp = entry.timestamp, "forecast timestamp out of range");
            (String::new(), String::new())
        }
    };

    ForecastDay {
        timestamp: entry.timestamp,
        day,
        date,
        high: entry.temp_max_c,
        low: entry.temp_min_c,
        condition: entry.condition.clone(),
        description: entry.description.clone(),
        humidity: entry.humidity_pct,
    }
}
