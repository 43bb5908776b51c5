//! Dashboard UI state as immutable snapshots.
//!
//! Every transition goes through [`reduce`], which returns a new snapshot and
//! never patches the view in place.

use serde::Serialize;

use crate::{model::WeatherView, units::TemperatureUnit};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardState {
    pub view: Option<WeatherView>,
    pub loading: bool,
    pub error: Option<String>,
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RefreshStarted,
    RefreshSucceeded(WeatherView),
    RefreshFailed(String),
    ToggleUnit,
}

impl DashboardState {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    /// A new refresh may start only when none is pending.
    pub fn can_refresh(&self) -> bool {
        !self.loading
    }
}

pub fn reduce(state: &DashboardState, event: Event) -> DashboardState {
    match event {
        Event::RefreshStarted if state.loading => state.clone(),
        Event::RefreshStarted => DashboardState {
            loading: true,
            error: None,
            ..state.clone()
        },
        Event::RefreshSucceeded(view) => DashboardState {
            view: Some(view),
            loading: false,
            error: None,
            unit: state.unit,
        },
        Event::RefreshFailed(message) => DashboardState {
            view: None,
            loading: false,
            error: Some(message),
            unit: state.unit,
        },
        Event::ToggleUnit => DashboardState {
            unit: state.unit.toggle(),
            ..state.clone()
        },
    }
}
