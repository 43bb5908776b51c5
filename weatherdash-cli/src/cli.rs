use anyhow::{Context, bail};
use clap::{ArgGroup, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weatherdash_core::{
    Config, Dashboard, FixedPosition, LocationQuery, TemperatureUnit, provider_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key, default city and units.
    Configure,

    /// Show current weather and the 5-day forecast.
    #[command(group(ArgGroup::new("unit").args(["celsius", "fahrenheit"])))]
    Show {
        /// City name; defaults to the configured city, then London.
        city: Option<String>,

        /// Latitude of the position to look up (requires --lon).
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the position to look up (requires --lat).
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long)]
        celsius: bool,

        #[arg(long)]
        fahrenheit: bool,

        /// Print the view as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard: search, locate, toggle units, try again.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                lat,
                lon,
                celsius,
                fahrenheit,
                json,
            } => {
                let config = Config::load()?;
                let unit = match (celsius, fahrenheit) {
                    (true, _) => TemperatureUnit::Celsius,
                    (_, true) => TemperatureUnit::Fahrenheit,
                    _ => config.units,
                };
                show(&config, city, lat.zip(lon), unit, json).await
            }
            Command::Interactive => {
                let config = Config::load()?;
                interactive::run(&config).await
            }
        }
    }
}

async fn show(
    config: &Config,
    city: Option<String>,
    position: Option<(f64, f64)>,
    unit: TemperatureUnit,
    json: bool,
) -> anyhow::Result<()> {
    tracing::debug!(%unit, json, "show");
    let provider = provider_from_config(config)?;
    let mut dashboard = Dashboard::new(provider, unit, config.default_query());

    let state = match (position, city.as_deref()) {
        (Some((lat, lon)), _) => dashboard.locate(&FixedPosition::new(lat, lon)).await,
        (None, Some(city)) => dashboard.search(city).await,
        (None, None) => dashboard.retry().await,
    };

    if let Some(error) = &state.error {
        bail!("{error}");
    }

    let Some(view) = &state.view else {
        bail!("Could not determine a location for the given coordinates");
    };

    if json {
        let out = serde_json::to_string_pretty(&render::json_output(view, state.unit))
            .context("Failed to serialize weather view")?;
        println!("{out}");
    } else {
        print!("{}", render::render_view(view, state.unit));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt()
        .context("API key prompt cancelled")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_query().to_string())
        .prompt()
        .context("City prompt cancelled")?;

    let units = Select::new(
        "Temperature units:",
        vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit],
    )
    .with_starting_cursor(usize::from(!config.units.is_celsius()))
    .prompt()
    .context("Units prompt cancelled")?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }
    config.default_city = LocationQuery::from_search(&default_city).map(|q| q.to_string());
    config.units = units;

    config.api_key()?;

    config.save_to(&path)?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_city_and_unit() {
        let cli = Cli::try_parse_from(["weatherdash", "show", "Paris", "--fahrenheit"]).unwrap();
        match cli.command {
            Command::Show {
                city, fahrenheit, ..
            } => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert!(fahrenheit);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_parses_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["weatherdash", "show", "--lat", "51.5", "--lon", "-0.12"]).unwrap();
        match cli.command {
            Command::Show { lat, lon, .. } => {
                assert_eq!(lat, Some(51.5));
                assert_eq!(lon, Some(-0.12));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["weatherdash", "show", "--lat", "51.5"]).is_err());
    }

    #[test]
    fn both_units_are_rejected() {
        assert!(
            Cli::try_parse_from(["weatherdash", "show", "--celsius", "--fahrenheit"]).is_err()
        );
    }
}
