//! Menu-driven dashboard loop.

use async_trait::async_trait;
use inquire::{CustomType, InquireError, Select, Text};
use weatherdash_core::{
    Config, Coordinates, Dashboard, Geolocator, LocationError, provider_from_config,
};

use crate::render::render_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseMyLocation,
    ToggleUnits,
    TryAgain,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Search => "Search for a city",
            Self::UseMyLocation => "Use my location",
            Self::ToggleUnits => "Toggle °C / °F",
            Self::TryAgain => "Try again",
            Self::Quit => "Quit",
        })
    }
}

/// "Try again" is only offered from the error state.
fn actions(has_error: bool) -> Vec<Action> {
    let mut actions = vec![Action::Search, Action::UseMyLocation];
    if has_error {
        actions.push(Action::TryAgain);
    } else {
        actions.push(Action::ToggleUnits);
    }
    actions.push(Action::Quit);
    actions
}

/// Asks the user for coordinates in place of a device position sensor.
struct PromptGeolocator;

#[async_trait]
impl Geolocator for PromptGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let latitude = prompt_degrees("Latitude:", 90.0)?;
        let longitude = prompt_degrees("Longitude:", 180.0)?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

fn prompt_degrees(label: &str, limit: f64) -> Result<f64, LocationError> {
    let value = CustomType::<f64>::new(label)
        .with_error_message("Please enter a number")
        .prompt()
        .map_err(|e| match e {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                LocationError::PermissionDenied
            }
            other => LocationError::Other(other.to_string()),
        })?;

    if value.abs() > limit {
        return Err(LocationError::Other(format!(
            "{value} is outside ±{limit} degrees"
        )));
    }
    Ok(value)
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn loading() {
    eprintln!("Loading weather data...");
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let provider = match provider_from_config(config) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("⚠ Weather Data Unavailable\n{}", err.user_message());
            return Err(err.into());
        }
    };

    let mut dashboard = Dashboard::new(provider, config.units, config.default_query());

    loading();
    println!("{}", render_state(dashboard.retry().await));

    loop {
        let has_error = dashboard.state().error.is_some();
        let action = match Select::new("What next?", actions(has_error)).prompt() {
            Ok(action) => action,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        let state = match action {
            Action::Search => {
                let input = match Text::new("Search for a city...").prompt() {
                    Ok(input) => input,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };
                loading();
                dashboard.search(&input).await
            }
            Action::UseMyLocation => {
                loading();
                dashboard.locate(&PromptGeolocator).await
            }
            Action::ToggleUnits => dashboard.toggle_unit(),
            Action::TryAgain => {
                loading();
                dashboard.retry().await
            }
            Action::Quit => break,
        };

        println!("{}", render_state(state));
    }

    Ok(())
}
