//! Liquid property capability for hydronic loops.
//!
//! Plant models need a loop fluid's specific heat and density at the current
//! node temperature. [`LiquidProperties`] is the seam: a model takes
//! `&impl LiquidProperties` and never knows which backend supplies values.
//!
//! [`Incompressible`] is the built-in backend. It treats the liquid as having
//! constant density and constant heat capacity, which is the usual
//! engineering approximation for chilled and condenser water.

mod water;

use std::marker::PhantomData;

use thiserror::Error;
use uom::si::f64::{MassDensity, SpecificHeatCapacity, ThermodynamicTemperature};

use crate::support::constraint::{Constraint, StrictlyPositive};

pub use water::Water;

/// Temperature-dependent liquid properties.
pub trait LiquidProperties {
    /// Returns the isobaric specific heat at `temperature`.
    fn specific_heat(&self, temperature: ThermodynamicTemperature) -> SpecificHeatCapacity;

    /// Returns the density at `temperature`.
    fn density(&self, temperature: ThermodynamicTemperature) -> MassDensity;
}

/// Constants for a liquid used with [`Incompressible`].
pub trait IncompressibleFluid {
    fn parameters() -> IncompressibleParameters;
}

/// Constant property values for an [`Incompressible`] liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleParameters {
    pub cp: SpecificHeatCapacity,
    pub density: MassDensity,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncompressibleParametersError {
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid density: {density:?}")]
    Density { density: MassDensity },
}

/// Liquid with constant density and constant heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incompressible<Fluid> {
    cp: SpecificHeatCapacity,
    density: MassDensity,
    _marker: PhantomData<Fluid>,
}

impl<Fluid: IncompressibleFluid> Incompressible<Fluid> {
    /// Creates a model from the constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`IncompressibleParametersError`] if a constant is not strictly positive.
    pub fn new() -> Result<Self, IncompressibleParametersError> {
        Self::with_parameters(Fluid::parameters())
    }
}

impl<Fluid> Incompressible<Fluid> {
    /// Creates a model from explicit constants, e.g. for a glycol mixture.
    ///
    /// # Errors
    ///
    /// Returns [`IncompressibleParametersError`] if a constant is not strictly positive.
    pub fn with_parameters(
        parameters: IncompressibleParameters,
    ) -> Result<Self, IncompressibleParametersError> {
        let IncompressibleParameters { cp, density } = parameters;
        if StrictlyPositive::check(&cp.value).is_err() {
            return Err(IncompressibleParametersError::Cp { cp });
        }
        if StrictlyPositive::check(&density.value).is_err() {
            return Err(IncompressibleParametersError::Density { density });
        }
        Ok(Self {
            cp,
            density,
            _marker: PhantomData,
        })
    }
}

impl<Fluid> LiquidProperties for Incompressible<Fluid> {
    fn specific_heat(&self, _temperature: ThermodynamicTemperature) -> SpecificHeatCapacity {
        self.cp
    }

    fn density(&self, _temperature: ThermodynamicTemperature) -> MassDensity {
        self.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_density::kilogram_per_cubic_meter,
        specific_heat_capacity::{joule_per_kilogram_kelvin, kilojoule_per_kilogram_kelvin},
        thermodynamic_temperature::degree_celsius,
    };

    #[test]
    fn water_is_constant_across_temperatures() {
        let water = Incompressible::<Water>::new().unwrap();
        let cold = ThermodynamicTemperature::new::<degree_celsius>(6.67);
        let warm = ThermodynamicTemperature::new::<degree_celsius>(35.0);

        assert_eq!(water.specific_heat(cold), water.specific_heat(warm));
        assert_relative_eq!(
            water.specific_heat(cold).get::<kilojoule_per_kilogram_kelvin>(),
            4.184
        );
        assert_relative_eq!(
            water.density(warm).get::<kilogram_per_cubic_meter>(),
            997.047
        );
    }

    #[test]
    fn rejects_non_physical_parameters() {
        let result = Incompressible::<()>::with_parameters(IncompressibleParameters {
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(0.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
        });
        assert!(matches!(
            result,
            Err(IncompressibleParametersError::Cp { .. })
        ));
    }
}
