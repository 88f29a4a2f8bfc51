//! Mock geography: coordinates and the locality table used in place of real
//! geocoding.

use core::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Centre of the mock coverage area (Lagos).
pub const LAGOS_CENTRE: Coordinates = Coordinates {
    latitude: 6.5244,
    longitude: 3.3792,
};

/// Total width of the jitter window applied to each axis, in degrees.
const JITTER_SPAN: f64 = 0.1;

/// General address used when no locality is known.
pub const DEFAULT_GENERAL_ADDRESS: &str = "Lagos State, Nigeria";

/// Localities reported by the mock location fix.
pub const LOCALITIES: [&str; 5] = [
    "Victoria Island, Lagos State",
    "Ikoyi, Lagos State",
    "Lekki Phase 1, Lagos State",
    "Surulere, Lagos State",
    "Ikeja GRA, Lagos State",
];

/// Pick a locality uniformly from [`LOCALITIES`].
pub fn random_locality<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOCALITIES
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_GENERAL_ADDRESS)
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// A point within ±0.05° of `self` on each axis.
    pub fn jittered<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let half = JITTER_SPAN / 2.0;
        Self {
            latitude: self.latitude + rng.random_range(-half..half),
            longitude: self.longitude + rng.random_range(-half..half),
        }
    }

    /// A mock position fix somewhere in Lagos.
    pub fn mock_fix<R: Rng + ?Sized>(rng: &mut R) -> Self {
        LAGOS_CENTRE.jittered(rng)
    }
}

/// Formats as `lat,lng`, the form used in maps deep links.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
