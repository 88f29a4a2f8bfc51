//! Mock location fix.
//!
//! There is no GPS and no geocoding: a fix waits a fixed delay and then
//! returns a fresh random code, a locality from the mock table and a point
//! near the centre of Lagos.

use std::time::Duration;

use rand::Rng;

use geoaddress_core::{Coordinates, GeoCode, random_locality};

/// Result of a location fix.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub code: GeoCode,
    /// Human-readable locality, e.g. "Ikoyi, Lagos State".
    pub locality: String,
    pub coordinates: Coordinates,
}

impl Located {
    /// Build a fix from the given random source.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            code: GeoCode::generate_with(rng),
            locality: random_locality(rng).to_owned(),
            coordinates: Coordinates::mock_fix(rng),
        }
    }
}

/// Produces mock location fixes after a simulated delay.
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    latency: Duration,
}

impl Locator {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Wait for the simulated fix, then return it. Always succeeds.
    pub async fn locate(&self) -> Located {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let located = Located::random_with(&mut rand::rng());
        tracing::debug!(code = %located.code, locality = %located.locality, "Location fixed");
        located
    }
}
