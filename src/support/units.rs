//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, power, mass flow).
//! This module provides extensions that are useful for modeling but aren't included in [`uom`].
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use plant_models::support::units::TemperatureDifference;
//!
//! let entering = ThermodynamicTemperature::new::<degree_celsius>(12.0);
//! let leaving = ThermodynamicTemperature::new::<degree_celsius>(6.67);
//! let delta_t = entering.minus(leaving);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! ## Curve variables
//!
//! Performance curves are fitted against temperatures in degrees Celsius.
//! [`celsius`] and [`from_celsius`] convert at that boundary.

mod temperature_difference;

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

pub use temperature_difference::TemperatureDifference;

/// Returns `temperature` in degrees Celsius.
#[must_use]
pub fn celsius(temperature: ThermodynamicTemperature) -> f64 {
    temperature.get::<degree_celsius>()
}

/// Creates a temperature from a value in degrees Celsius.
#[must_use]
pub fn from_celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}
