//! Core types for GeoAddress.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod code;
pub mod email;
pub mod geo;
pub mod id;
pub mod status;

pub use code::{GeoCode, GeoCodeError};
pub use email::{Email, EmailError};
pub use geo::{Coordinates, DEFAULT_GENERAL_ADDRESS, LAGOS_CENTRE, LOCALITIES, random_locality};
pub use id::*;
pub use status::SessionState;
