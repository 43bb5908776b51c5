//! Device position capability.

use async_trait::async_trait;

use crate::{LocationError, model::Coordinates};

/// Supplies the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Option<Coordinates>);

impl FixedPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(Some(Coordinates { latitude, longitude }))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.0.ok_or(LocationError::Unavailable)
    }
}
