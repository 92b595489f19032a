//! Root-finding formulation of the condenser outlet temperature.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::f64::ThermodynamicTemperature;

use crate::support::units::{celsius, from_celsius};

use super::super::{
    input::Conditions,
    performance::{self, OperatingPoint},
    spec::ChillerSpec,
    state::ChillerState,
};

/// Chiller performance as a function of the trial condenser outlet temperature.
pub(super) struct PerformanceModel<'a> {
    spec: &'a ChillerSpec,
    state: &'a ChillerState,
    conditions: &'a Conditions,
}

impl<'a> PerformanceModel<'a> {
    pub(super) fn new(
        spec: &'a ChillerSpec,
        state: &'a ChillerState,
        conditions: &'a Conditions,
    ) -> Self {
        Self {
            spec,
            state,
            conditions,
        }
    }

    /// Evaluates at a trial temperature in °C.
    pub(super) fn at(&self, trial: f64) -> OperatingPoint {
        performance::evaluate(self.spec, self.state, self.conditions, trial)
    }
}

impl Model for PerformanceModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = OperatingPoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.at(celsius(*input)))
    }
}

/// Residual `trial - computed` condenser outlet temperature, in K.
pub(super) struct CondenserOutletProblem;

impl EquationProblem<1> for CondenserOutletProblem {
    type Input = ThermodynamicTemperature;
    type Output = OperatingPoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(from_celsius(x[0]))
    }

    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([celsius(*input) - output.condenser_outlet])
    }
}
