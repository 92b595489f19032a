//! Reformulated-EIR electric chiller.
//!
//! The chiller maps cooling load and loop inlet conditions to outlet
//! temperatures, mass flows, and electric power using three performance curves:
//! capacity and EIR as functions of the evaporator and condenser outlet
//! temperatures, and EIR as a function of part load. Because the curves use
//! the condenser *outlet*, each call solves for it with a bracketed root finder.
//!
//! Two entry points are provided:
//!
//! - [`ChillerModel`] implements [`twine_core::Model`] for one chiller. The
//!   caller owns its [`ChillerState`] and threads it between calls.
//! - [`ChillerRegistry`] loads a set of named chillers, hands out
//!   [`ChillerHandle`]s, and keeps each chiller's state itself.
//!
//! # Example
//!
//! ```
//! # use plant_models::{
//! #     models::plant::chiller::{
//! #         ChillerConfig, ChillerInput, ChillerRegistry, CondenserInlet, EvaporatorInlet,
//! #         FlowLock, FlowMode, PartLoadCurveType,
//! #     },
//! #     support::{
//! #         curve::{Bounds, CurveDefinition, CurveForm, CurveLibrary, OutputLimits},
//! #         diagnostics::Diagnostic,
//! #         fluid::{Incompressible, Water},
//! #     },
//! # };
//! # use uom::si::{
//! #     f64::{MassRate, Power, ThermodynamicTemperature, VolumeRate},
//! #     mass_rate::kilogram_per_second,
//! #     power::{kilowatt, watt},
//! #     thermodynamic_temperature::degree_celsius,
//! #     volume_rate::cubic_meter_per_second,
//! # };
//! # let celsius = ThermodynamicTemperature::new::<degree_celsius>;
//! # let flow = MassRate::new::<kilogram_per_second>;
//! # let mut curves = CurveLibrary::new();
//! # for (name, form, coefficients, domain) in [
//! #     ("CapFT", CurveForm::Biquadratic, vec![1.1499, 0.03, 0.0, -0.01, 0.0, 0.0],
//! #      [(5.0, 10.0), (20.0, 40.0)]),
//! #     ("EIRFT", CurveForm::Biquadratic, vec![0.4334, -0.02, 0.0, 0.02, 0.0, 0.0],
//! #      [(5.0, 10.0), (20.0, 40.0)]),
//! #     ("EIRFPLR", CurveForm::Bicubic, vec![0.1, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
//! #      [(20.0, 40.0), (0.0, 1.0)]),
//! # ] {
//! #     let domain = domain
//! #         .into_iter()
//! #         .map(|(min, max)| Bounds::new(min, max))
//! #         .collect::<Result<Vec<_>, _>>()?;
//! #     let output = OutputLimits::default();
//! #     curves.insert(name, CurveDefinition { form, coefficients, domain, output })?;
//! # }
//! # let config = ChillerConfig {
//! #     name: "Chiller 1".to_owned(),
//! #     reference_capacity: Power::new::<kilowatt>(500.0),
//! #     reference_cop: 5.5,
//! #     reference_evaporator_outlet: celsius(6.67),
//! #     reference_condenser_outlet: celsius(35.0),
//! #     design_evaporator_flow: VolumeRate::new::<cubic_meter_per_second>(0.02),
//! #     design_condenser_flow: VolumeRate::new::<cubic_meter_per_second>(0.03),
//! #     min_part_load_ratio: 0.1,
//! #     max_part_load_ratio: 1.0,
//! #     optimum_part_load_ratio: 1.0,
//! #     min_unloading_ratio: 0.2,
//! #     compressor_heat_to_condenser: 1.0,
//! #     evaporator_outlet_low_limit: celsius(2.0),
//! #     capacity_curve: "CapFT".to_owned(),
//! #     eir_temperature_curve: "EIRFT".to_owned(),
//! #     eir_part_load_curve: "EIRFPLR".to_owned(),
//! #     part_load_curve_type: PartLoadCurveType::LeavingCondenserTemperature,
//! #     flow_mode: FlowMode::NotModulated,
//! #     heat_recovery: None,
//! # };
//! # let input = ChillerInput {
//! #     load: Power::new::<kilowatt>(-300.0),
//! #     running: true,
//! #     first_iteration: false,
//! #     warmup: false,
//! #     flow_lock: FlowLock::Locked,
//! #     setpoint_based_scheme: false,
//! #     evaporator: EvaporatorInlet {
//! #         temperature: celsius(12.0),
//! #         mass_flow: flow(19.94),
//! #         max_available_flow: flow(19.94),
//! #         outlet_setpoint: celsius(6.67),
//! #         outlet_min: None,
//! #     },
//! #     condenser: CondenserInlet {
//! #         temperature: celsius(29.4),
//! #         max_available_flow: flow(100.0),
//! #     },
//! #     heat_recovery: None,
//! # };
//! let water = Incompressible::<Water>::new()?;
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let mut registry = ChillerRegistry::load([&config], &curves, water, &mut diagnostics)?;
//!
//! let handle = registry.handle("Chiller 1").ok_or("unknown chiller")?;
//! let output = registry.simulate(handle, &input, &mut diagnostics)?;
//!
//! assert!(output.power.get::<watt>() > 0.0);
//! assert!(diagnostics.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod core;
mod error;
mod registry;
mod report;

use std::convert::Infallible;

use twine_core::Model;

use crate::support::{
    curve::CurveLibrary,
    diagnostics::{Diagnostic, DiagnosticSink},
    fluid::LiquidProperties,
};

pub use config::{
    BoundaryCheckConfig, ChillerConfig, CondenserSolveConfig, FlowMode, HeatRecoveryConfig,
    PartLoadCurveType,
};
pub use error::{ChillerConfigError, ChillerError};
pub use registry::{ChillerHandle, ChillerRegistry};
pub use report::ChillerReport;
pub use self::core::{
    ChillerInput, ChillerOutput, ChillerState, CondenserInlet, EvaporatorInlet, FlowLock,
    HeatRecoveryInlet, Resolution,
};

use self::core::ChillerSpec;

/// A single loaded chiller.
#[derive(Debug, Clone)]
pub struct ChillerModel<F> {
    spec: ChillerSpec,
    fluid: F,
    solve: CondenserSolveConfig,
    checks: BoundaryCheckConfig,
}

/// Input to [`ChillerModel`] as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillerCall {
    pub input: ChillerInput,
    pub state: ChillerState,
}

/// Output of [`ChillerModel`] as a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChillerStep {
    pub output: ChillerOutput,

    /// State to pass into the next call.
    pub state: ChillerState,

    /// Everything reported during the call.
    pub diagnostics: Vec<Diagnostic>,
}

impl<F: LiquidProperties> ChillerModel<F> {
    /// Validates `config` against `curves` and builds the model.
    ///
    /// Reference-condition warnings are reported to `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`ChillerConfigError`] if the configuration is inconsistent.
    pub fn new(
        config: &ChillerConfig,
        curves: &CurveLibrary,
        fluid: F,
        sink: &mut impl DiagnosticSink,
    ) -> Result<Self, ChillerConfigError> {
        let spec = ChillerSpec::load(config, curves, &fluid, sink)?;
        Ok(Self {
            spec,
            fluid,
            solve: CondenserSolveConfig::default(),
            checks: BoundaryCheckConfig::default(),
        })
    }

    #[must_use]
    pub fn with_solve_config(mut self, solve: CondenserSolveConfig) -> Self {
        self.solve = solve;
        self
    }

    #[must_use]
    pub fn with_boundary_checks(mut self, checks: BoundaryCheckConfig) -> Self {
        self.checks = checks;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Runs one call from `state` and returns the output and the next state.
    pub fn step(
        &self,
        input: &ChillerInput,
        state: &ChillerState,
        sink: &mut impl DiagnosticSink,
    ) -> (ChillerOutput, ChillerState) {
        self::core::simulate(
            &self.spec,
            state,
            input,
            &self.fluid,
            &self.solve,
            &self.checks,
            sink,
        )
    }
}

impl<F: LiquidProperties> Model for ChillerModel<F> {
    type Input = ChillerCall;
    type Output = ChillerStep;
    type Error = Infallible;

    fn call(&self, call: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut diagnostics = Vec::new();
        let (output, state) = self.step(&call.input, &call.state, &mut diagnostics);
        Ok(ChillerStep {
            output,
            state,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Power, power::watt, thermodynamic_temperature::degree_celsius};

    use crate::support::fluid::{Incompressible, Water};

    use super::core::test_support::{CP, EVAPORATOR_FLOW, config, curves, input, water};

    fn model() -> ChillerModel<Incompressible<Water>> {
        ChillerModel::new(&config(), &curves(), water(), &mut Vec::new()).unwrap()
    }

    #[test]
    fn model_call_matches_step() {
        let model = model();
        let input = input(-300_000.0);

        let step = model
            .call(&ChillerCall {
                input,
                state: ChillerState::default(),
            })
            .unwrap();
        let (output, state) = model.step(&input, &ChillerState::default(), &mut Vec::new());

        assert_eq!(step.output, output);
        assert_eq!(step.state, state);
        assert!(step.diagnostics.is_empty());
        assert!(matches!(step.output.resolution, Resolution::Converged { .. }));
    }

    #[test]
    fn meets_load_in_range() {
        let model = model();
        let (output, _) = model.step(&input(-300_000.0), &ChillerState::default(), &mut Vec::new());

        assert_relative_eq!(output.evaporator_heat_rate.get::<watt>(), 300_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            output.evaporator_outlet.get::<degree_celsius>(),
            12.0 - 300_000.0 / (EVAPORATOR_FLOW * CP),
            epsilon = 1e-6
        );
        assert!(output.power > Power::new::<watt>(0.0));
    }

    #[test]
    fn configuration_knobs_are_kept() {
        let solve = CondenserSolveConfig {
            max_iters: 7,
            ..CondenserSolveConfig::default()
        };
        let model = model()
            .with_solve_config(solve)
            .with_boundary_checks(BoundaryCheckConfig {
                check_curve_ranges: false,
                check_negative_outputs: false,
            });

        assert_eq!(model.name(), "Chiller 1");
        assert_eq!(model.solve, solve);
        assert!(!model.checks.check_curve_ranges);
    }
}
