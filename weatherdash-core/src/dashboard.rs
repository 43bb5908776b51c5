//! Refresh orchestration: fetch raw records, build the view, update state.

use crate::{
    WeatherError,
    location::Geolocator,
    model::{LocationQuery, WeatherView},
    provider::WeatherProvider,
    state::{DashboardState, Event, reduce},
    units::TemperatureUnit,
    view::build_view,
};

/// Fetches both feeds for `query` and builds the view.
///
/// Coordinates are first resolved to a location name so the result has the
/// same shape as a text search. The refresh is all-or-nothing: a failed
/// forecast fails the whole call even if current conditions arrived.
pub async fn fetch_view<P>(provider: &P, query: &LocationQuery) -> Result<WeatherView, WeatherError>
where
    P: WeatherProvider + ?Sized,
{
    let query = match query {
        LocationQuery::Coordinates(c) => {
            LocationQuery::City(provider.resolve_location(c.latitude, c.longitude).await?)
        }
        city => city.clone(),
    };

    let current = provider.fetch_current(&query).await?;
    let forecast = provider.fetch_forecast(&query).await?;

    let view = build_view(&current, &forecast);
    tracing::info!(
        location = %view.current.location,
        days = view.forecast.len(),
        "weather view built"
    );
    Ok(view)
}

/// A refresh that has set `loading` but not yet applied its outcome.
///
/// Dropping it unfinished (the refresh future was cancelled) puts back the
/// snapshot from before the refresh started.
struct PendingRefresh<'a> {
    state: &'a mut DashboardState,
    previous: Option<DashboardState>,
}

impl PendingRefresh<'_> {
    fn finish(mut self, event: Event) {
        self.previous = None;
        *self.state = reduce(&*self.state, event);
    }
}

impl Drop for PendingRefresh<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::warn!("refresh cancelled before completing, restoring previous state");
            *self.state = previous;
        }
    }
}

/// Owns the provider and the current state snapshot.
#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    state: DashboardState,
    last_query: LocationQuery,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, unit: TemperatureUnit, initial: LocationQuery) -> Self {
        Self {
            provider,
            state: DashboardState::new(unit),
            last_query: initial,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn last_query(&self) -> &LocationQuery {
        &self.last_query
    }

    fn apply(&mut self, event: Event) {
        self.state = reduce(&self.state, event);
    }

    /// Runs one refresh. Ignored if another is still pending.
    pub async fn refresh(&mut self, query: LocationQuery) -> &DashboardState {
        if !self.state.can_refresh() {
            tracing::warn!(%query, "refresh already in flight, ignoring trigger");
            return &self.state;
        }

        let previous = self.state.clone();
        self.apply(Event::RefreshStarted);
        self.last_query = query;

        let pending = PendingRefresh {
            state: &mut self.state,
            previous: Some(previous),
        };

        let event = match fetch_view(&self.provider, &self.last_query).await {
            Ok(view) => Event::RefreshSucceeded(view),
            Err(err) => {
                tracing::error!(query = %self.last_query, error = %err, "refresh failed");
                Event::RefreshFailed(err.user_message())
            }
        };
        pending.finish(event);

        &self.state
    }

    /// Refresh from free-text search input. Blank input does nothing.
    pub async fn search(&mut self, input: &str) -> &DashboardState {
        match LocationQuery::from_search(input) {
            Some(query) => self.refresh(query).await,
            None => &self.state,
        }
    }

    /// Re-runs the last refresh from scratch.
    pub async fn retry(&mut self) -> &DashboardState {
        let query = self.last_query.clone();
        self.refresh(query).await
    }

    /// Refresh for the device position.
    ///
    /// A position failure, or failure to resolve the position to a name,
    /// is logged and leaves the state untouched.
    pub async fn locate<G>(&mut self, geolocator: &G) -> &DashboardState
    where
        G: Geolocator + ?Sized,
    {
        let position = match geolocator.current_position().await {
            Ok(position) => position,
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                return &self.state;
            }
        };

        let name = match self
            .provider
            .resolve_location(position.latitude, position.longitude)
            .await
        {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    error = %err,
                    "could not resolve current location"
                );
                return &self.state;
            }
        };

        self.refresh(LocationQuery::City(name)).await
    }

    pub fn toggle_unit(&mut self) -> &DashboardState {
        self.apply(Event::ToggleUnit);
        &self.state
    }
}
