//! Zone contaminant mass balance.
//!
//! A well-mixed zone exchanges air with its surroundings and with an HVAC
//! system. Over one timestep the balance is
//!
//! ```text
//! ρ·V·M · dc/dt = B - A·c
//! ```
//!
//! where `A` is the mass flow of air leaving at the zone concentration and
//! `B` is the contaminant carried in by inflows plus internal generation. The
//! derivative is discretized by the selected [`Scheme`].
//!
//! Each timestep runs in two phases. [`ZoneContaminantBalance::predict`]
//! returns the system load that would hold the zone at its setpoint. Once the
//! system has responded, [`ZoneContaminantBalance::correct`] folds the actual
//! supply into the terms and returns the resulting concentration.

mod balance;
mod error;
mod scheme;
mod state;

use std::convert::Infallible;

use twine_core::Model;
use uom::si::{
    f64::{MassDensity, MassRate, Ratio, Time, Volume},
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::part_per_million,
    time::second,
    volume::cubic_meter,
};

use crate::support::{
    constraint::{ConstraintError, StrictlyPositive},
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
};

pub use error::ContaminantError;
pub use scheme::Scheme;
pub use state::ZoneContaminantState;

use balance::Coefficients;

/// Physical description of a zone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneParameters {
    pub volume: Volume,
    pub air_density: MassDensity,

    /// Scales the zone air capacitance to stand in for furnishings and
    /// other storage.
    pub capacitance_multiplier: f64,
}

/// Flows acting on a zone during one timestep.
///
/// Contaminant quantities are carried as mass flow of air times
/// concentration, so `1 kg/s` of air at `1 ppm` is `1e-6 kg/s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceTerms {
    /// Air leaving the zone at the zone concentration.
    pub removal: MassRate,

    /// Contaminant entering the zone.
    pub source: MassRate,
}

impl Default for BalanceTerms {
    /// No flows and no generation.
    fn default() -> Self {
        Self {
            removal: MassRate::new::<kilogram_per_second>(0.0),
            source: MassRate::new::<kilogram_per_second>(0.0),
        }
    }
}

impl BalanceTerms {
    /// Adds an airflow entering at `concentration` and leaving at the zone's.
    #[must_use]
    pub fn with_inflow(mut self, flow: MassRate, concentration: Ratio) -> Self {
        let carried: MassRate = flow * concentration;
        self.removal += flow;
        self.source += carried;
        self
    }

    /// Adds contaminant generated inside the zone.
    ///
    /// A negative rate models a sink.
    #[must_use]
    pub fn with_generation(mut self, rate: MassRate) -> Self {
        self.source += rate;
        self
    }

    fn coefficients(&self, capacitance: f64) -> Coefficients {
        Coefficients {
            removal: self.removal.get::<kilogram_per_second>(),
            source: self.source.get::<kilogram_per_second>() * 1e6,
            capacitance,
        }
    }
}

/// Contaminant balance of one zone at a fixed timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneContaminantBalance {
    name: String,
    scheme: Scheme,
    /// `ρ·V·M/Δt` [kg/s]
    capacitance: f64,
}

/// Input to [`ZoneContaminantBalance`] as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContaminantCall {
    pub state: ZoneContaminantState,

    /// Terms including the system's actual supply.
    pub terms: BalanceTerms,
}

/// Output of [`ZoneContaminantBalance`] as a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContaminantStep {
    pub concentration: Ratio,
    pub state: ZoneContaminantState,
    pub diagnostics: Vec<Diagnostic>,
}

impl ZoneContaminantBalance {
    /// Builds the balance for `zone` stepped every `timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`ContaminantError::InvalidParameter`] if the volume, density,
    /// multiplier, or timestep is not strictly positive.
    pub fn new(
        name: impl Into<String>,
        zone: &ZoneParameters,
        timestep: Time,
        scheme: Scheme,
    ) -> Result<Self, ContaminantError> {
        let name = name.into();
        let invalid = |field: &'static str| {
            let zone = name.clone();
            move |source: ConstraintError| ContaminantError::InvalidParameter {
                zone,
                field,
                source,
            }
        };

        let volume = StrictlyPositive::new(zone.volume)
            .map_err(invalid("volume"))?
            .into_inner()
            .get::<cubic_meter>();
        let density = StrictlyPositive::new(zone.air_density)
            .map_err(invalid("air density"))?
            .into_inner()
            .get::<kilogram_per_cubic_meter>();
        let multiplier = StrictlyPositive::new(zone.capacitance_multiplier)
            .map_err(invalid("capacitance multiplier"))?
            .into_inner();
        let timestep = StrictlyPositive::new(timestep)
            .map_err(invalid("timestep"))?
            .into_inner()
            .get::<second>();

        Ok(Self {
            name,
            scheme,
            capacitance: density * volume * multiplier / timestep,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// System contribution that would hold the zone at `setpoint`.
    ///
    /// Positive when the system must add contaminant, negative when it must
    /// remove it, and zero without a setpoint.
    #[must_use]
    pub fn predict(
        &self,
        state: &ZoneContaminantState,
        terms: &BalanceTerms,
        setpoint: Option<Ratio>,
    ) -> MassRate {
        let Some(setpoint) = setpoint else {
            return MassRate::new::<kilogram_per_second>(0.0);
        };
        let load = balance::predict(
            self.scheme,
            state,
            &terms.coefficients(self.capacitance),
            setpoint.get::<part_per_million>(),
        );
        MassRate::new::<kilogram_per_second>(load * 1e-6)
    }

    /// Concentration at the end of the timestep.
    ///
    /// `terms` must include the system's actual supply. A negative result is
    /// reported and floored at zero.
    pub fn correct(
        &self,
        state: &ZoneContaminantState,
        terms: &BalanceTerms,
        sink: &mut impl DiagnosticSink,
    ) -> Ratio {
        let concentration =
            balance::correct(self.scheme, state, &terms.coefficients(self.capacitance));
        if concentration < 0.0 {
            sink.report(Diagnostic::recurring(
                &self.name,
                DiagnosticKind::NegativeConcentration,
                format!("corrected concentration {concentration:.3} ppm is negative; reset to 0"),
                concentration,
            ));
            return Ratio::new::<part_per_million>(0.0);
        }
        Ratio::new::<part_per_million>(concentration)
    }

    /// Corrects and returns the concentration with the state that follows.
    pub fn step(
        &self,
        state: &ZoneContaminantState,
        terms: &BalanceTerms,
        sink: &mut impl DiagnosticSink,
    ) -> (Ratio, ZoneContaminantState) {
        let concentration = self.correct(state, terms, sink);
        (concentration, state.advance(concentration))
    }
}

impl Model for ZoneContaminantBalance {
    type Input = ContaminantCall;
    type Output = ContaminantStep;
    type Error = Infallible;

    fn call(&self, call: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut diagnostics = Vec::new();
        let (concentration, state) = self.step(&call.state, &call.terms, &mut diagnostics);
        Ok(ContaminantStep {
            concentration,
            state,
            diagnostics,
        })
    }
}
