//! Terminal rendering of the dashboard state.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;
use weatherdash_core::{
    ConditionKey, DashboardState, TemperatureUnit, Visual, WeatherView, condition::Gradient,
};

/// Glyph shown for a visual's icon name.
fn glyph(icon: &str) -> &'static str {
    match icon {
        "cloud" => "☁",
        "cloud-rain" => "🌧",
        "snowflake" => "❄",
        "zap" => "⚡",
        _ => "☀",
    }
}

fn temp(unit: TemperatureUnit, celsius: f64) -> String {
    format!("{}°", unit.display(celsius))
}

fn clock(ts: Option<i64>) -> String {
    ts.and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|utc| utc.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn or_na<T: fmt::Display>(value: Option<T>, suffix: &str) -> String {
    value
        .map(|v| format!("{v}{suffix}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn gradient(g: &Gradient) -> String {
    format!("{} → {} → {}", g.from, g.via, g.to)
}

pub fn render_state(state: &DashboardState) -> String {
    if state.loading {
        return "Loading weather data...".to_string();
    }

    if let Some(error) = &state.error {
        return format!("⚠ Weather Data Unavailable\n{error}");
    }

    match &state.view {
        Some(view) => render_view(view, state.unit),
        None => String::new(),
    }
}

pub fn render_view(view: &WeatherView, unit: TemperatureUnit) -> String {
    ViewDisplay { view, unit }.to_string()
}

/// Text layout of a view in a given display unit.
struct ViewDisplay<'a> {
    view: &'a WeatherView,
    unit: TemperatureUnit,
}

impl fmt::Display for ViewDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit;
        let current = &self.view.current;
        let visual = ConditionKey::from_provider(&current.condition).visual();

        writeln!(f, "{}  {}", glyph(visual.icon), current.location)?;
        writeln!(f, "{}", current.description)?;
        writeln!(
            f,
            "{}  (feels like {})   units: °{}",
            temp(unit, current.temperature),
            temp(unit, current.feels_like),
            unit.symbol()
        )?;
        writeln!(f, "theme: {}", gradient(&visual.gradient))?;
        writeln!(f)?;
        writeln!(f, "  Wind        {} m/s", current.wind_speed)?;
        writeln!(f, "  Humidity    {}%", current.humidity)?;
        writeln!(f, "  Visibility  {}", or_na(current.visibility_km, " km"))?;
        writeln!(f, "  Pressure    {}", or_na(current.pressure, " hPa"))?;
        writeln!(f, "  UV index    {}", or_na(current.uv_index, ""))?;
        writeln!(
            f,
            "  Sun         {} / {}",
            clock(current.sunrise),
            clock(current.sunset)
        )?;

        if self.view.forecast.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "{}-Day Forecast", self.view.forecast.len())?;
        for day in &self.view.forecast {
            let icon = glyph(ConditionKey::from_provider(&day.condition).visual().icon);
            writeln!(
                f,
                "  {:<4}{:<11}{}  {:>5} {:>5}  {:>3}%  {}",
                day.day,
                day.date,
                icon,
                temp(unit, day.high),
                temp(unit, day.low),
                day.humidity,
                day.description
            )?;
        }

        Ok(())
    }
}

/// JSON payload for `--json`: the stored view plus display values.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub unit: TemperatureUnit,
    pub view: &'a WeatherView,
    pub display: DisplayValues,
    pub visual: Visual,
    pub forecast_visuals: Vec<Visual>,
}

#[derive(Debug, Serialize)]
pub struct DisplayValues {
    pub temperature: i64,
    pub feels_like: i64,
    pub forecast: Vec<(i64, i64)>,
}

pub fn json_output(view: &WeatherView, unit: TemperatureUnit) -> JsonOutput<'_> {
    JsonOutput {
        unit,
        view,
        display: DisplayValues {
            temperature: unit.display(view.current.temperature),
            feels_like: unit.display(view.current.feels_like),
            forecast: view
                .forecast
                .iter()
                .map(|d| (unit.display(d.high), unit.display(d.low)))
                .collect(),
        },
        visual: ConditionKey::from_provider(&view.current.condition).visual(),
        forecast_visuals: view
            .forecast
            .iter()
            .map(|d| ConditionKey::from_provider(&d.condition).visual())
            .collect(),
    }
}
