use uom::si::{
    f64::{Power, TemperatureInterval, ThermodynamicTemperature, VolumeRate},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::equation::regula_falsi;

/// Static description of one reformulated-EIR chiller.
///
/// Validated and resolved against the curve library by
/// [`ChillerRegistry::load`](super::ChillerRegistry::load).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChillerConfig {
    pub name: String,

    /// Cooling capacity at the reference temperatures.
    pub reference_capacity: Power,

    /// Cooling COP at the reference temperatures and full load.
    pub reference_cop: f64,

    pub reference_evaporator_outlet: ThermodynamicTemperature,
    pub reference_condenser_outlet: ThermodynamicTemperature,

    pub design_evaporator_flow: VolumeRate,
    pub design_condenser_flow: VolumeRate,

    pub min_part_load_ratio: f64,
    pub max_part_load_ratio: f64,
    pub optimum_part_load_ratio: f64,

    /// Part-load ratio below which the compressor is false-loaded.
    pub min_unloading_ratio: f64,

    /// Fraction of compressor power rejected to the condenser.
    pub compressor_heat_to_condenser: f64,

    /// Lowest evaporator outlet temperature the chiller will produce.
    pub evaporator_outlet_low_limit: ThermodynamicTemperature,

    /// Capacity modifier over `(evaporator outlet, condenser outlet)` in °C.
    pub capacity_curve: String,

    /// EIR modifier over `(evaporator outlet, condenser outlet)` in °C.
    pub eir_temperature_curve: String,

    /// EIR modifier over part load; its variables depend on `part_load_curve_type`.
    pub eir_part_load_curve: String,

    pub part_load_curve_type: PartLoadCurveType,
    pub flow_mode: FlowMode,

    #[cfg_attr(feature = "serde", serde(default))]
    pub heat_recovery: Option<HeatRecoveryConfig>,
}

/// Independent variables of the EIR part-load curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartLoadCurveType {
    /// `(condenser outlet °C, part-load ratio)`
    #[default]
    LeavingCondenserTemperature,

    /// `(lift / reference lift, part-load ratio, |evaporator outlet - reference| / reference lift)`
    Lift,
}

/// How the chiller requests evaporator flow while loop flow is unlocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowMode {
    ConstantFlow,
    #[default]
    NotModulated,
    LeavingSetpointModulated,
}

/// Optional heat-recovery condenser.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatRecoveryConfig {
    /// Recovery capacity as a fraction of reference condenser heat.
    pub capacity_fraction: f64,

    /// Recovery shuts off when the recovery inlet is hotter than this.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inlet_high_limit: Option<ThermodynamicTemperature>,
}

/// Solver settings for the condenser outlet temperature iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CondenserSolveConfig {
    /// Converged once `|trial - computed|` is no larger than this.
    pub tolerance: TemperatureInterval,

    pub max_iters: usize,
}

impl Default for CondenserSolveConfig {
    fn default() -> Self {
        Self {
            tolerance: TemperatureInterval::new::<delta_kelvin>(1e-4),
            max_iters: 500,
        }
    }
}

impl CondenserSolveConfig {
    pub(super) fn regula_falsi(&self) -> regula_falsi::Config {
        regula_falsi::Config {
            max_iters: self.max_iters,
            x_abs_tol: 1e-10,
            residual_tol: self.tolerance.get::<delta_kelvin>(),
        }
    }
}

/// Which operating-point checks run after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryCheckConfig {
    /// Report operating points outside the curves' declared domains.
    pub check_curve_ranges: bool,

    /// Report curves that evaluate negative at the operating point.
    pub check_negative_outputs: bool,
}

impl Default for BoundaryCheckConfig {
    fn default() -> Self {
        Self {
            check_curve_ranges: true,
            check_negative_outputs: true,
        }
    }
}
